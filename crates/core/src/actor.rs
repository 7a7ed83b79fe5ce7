//! Actor draft: the in-progress record a user composes in the create form.
//!
//! Numeric fields are kept as the raw text the user typed so validation can
//! report exactly which field is wrong. [`validate`] is a pure function over
//! one snapshot of the draft; [`DraftActor::options`] turns a validated
//! draft into the optional-field bundle sent to the backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, RangeError};
use crate::image::PickedImage;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Age bounds in years (inclusive).
pub const AGE_RANGE: (i64, i64) = (1, 99);

/// Height bounds in centimeters (inclusive).
pub const HEIGHT_RANGE: (i64, i64) = (50, 250);

/// Weight bounds in kilograms (inclusive).
pub const WEIGHT_RANGE: (i64, i64) = (20, 200);

// ---------------------------------------------------------------------------
// Choice enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(CoreError::Validation(format!(
                "Unknown gender '{other}'. Must be one of: male, female"
            ))),
        }
    }
}

/// Closed set of genres accepted by the backend collection. The serialized
/// names must match the backend enum exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedic,
    Dramatic,
    Thrilling,
    Adventurous,
    Generic,
}

impl Genre {
    /// All genres in display order.
    pub const ALL: [Genre; 6] = [
        Genre::Action,
        Genre::Comedic,
        Genre::Dramatic,
        Genre::Thrilling,
        Genre::Adventurous,
        Genre::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Comedic => "Comedic",
            Self::Dramatic => "Dramatic",
            Self::Thrilling => "Thrilling",
            Self::Adventurous => "Adventurous",
            Self::Generic => "Generic",
        }
    }
}

impl FromStr for Genre {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown genre '{wanted}'. Must be one of: {}",
                    Genre::ALL.map(Genre::as_str).join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Numeric fields
// ---------------------------------------------------------------------------

/// The range-checked numeric fields of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Age,
    Height,
    Weight,
}

impl NumericField {
    /// Inclusive `(min, max)` bounds.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Self::Age => AGE_RANGE,
            Self::Height => HEIGHT_RANGE,
            Self::Weight => WEIGHT_RANGE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Height => "height",
            Self::Weight => "weight",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Height => "Height",
            Self::Weight => "Weight",
        }
    }

    pub fn unit(self) -> Option<&'static str> {
        match self {
            Self::Age => None,
            Self::Height => Some("cm"),
            Self::Weight => Some("kg"),
        }
    }

    /// Parse `raw` as an integer and check it against this field's bounds.
    pub fn parse(self, raw: &str) -> Result<i64, RangeError> {
        let (min, max) = self.bounds();
        let err = RangeError {
            field: self,
            min,
            max,
        };
        let value: i64 = raw.trim().parse().map_err(|_| err)?;
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(err)
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Transient field state of one create-actor form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftActor {
    name: String,
    age: String,
    weight: String,
    height: String,
    gender: Option<Gender>,
    genre: Option<Genre>,
    bio: String,
    image: Option<PickedImage>,
}

impl DraftActor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn weight(&self) -> &str {
        &self.weight
    }

    pub fn height(&self) -> &str {
        &self.height
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn genre(&self) -> Option<Genre> {
        self.genre
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn image(&self) -> Option<&PickedImage> {
        self.image.as_ref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_age(&mut self, age: impl Into<String>) {
        self.age = age.into();
    }

    pub fn set_weight(&mut self, weight: impl Into<String>) {
        self.weight = weight.into();
    }

    pub fn set_height(&mut self, height: impl Into<String>) {
        self.height = height.into();
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = Some(gender);
    }

    /// Select `genre`, or clear the selection if it is already selected.
    pub fn toggle_genre(&mut self, genre: Genre) {
        self.genre = if self.genre == Some(genre) {
            None
        } else {
            Some(genre)
        };
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) {
        self.bio = bio.into();
    }

    pub fn set_image(&mut self, image: PickedImage) {
        self.image = Some(image);
    }

    /// The name as it will be submitted.
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// Build the optional-field bundle. Unset fields are left out entirely.
    ///
    /// Runs [`validate`] first so an out-of-range value can never reach the
    /// backend.
    pub fn options(&self) -> Result<ActorOptions, RangeError> {
        validate(self)?;
        Ok(ActorOptions {
            bio: non_empty(&self.bio).map(str::to_string),
            age: parse_if_set(NumericField::Age, &self.age)?,
            height: parse_if_set(NumericField::Height, &self.height)?,
            weight: parse_if_set(NumericField::Weight, &self.weight)?,
            gender: self.gender,
            genre: self.genre,
        })
    }
}

/// Optional actor attributes sent alongside the name and image.
///
/// Serializes only the keys that are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Range-check the numeric fields of `draft`.
///
/// Checks run in the order age, height, weight and stop at the first
/// failure. Empty fields are skipped. The name is not checked here.
pub fn validate(draft: &DraftActor) -> Result<(), RangeError> {
    for (field, raw) in [
        (NumericField::Age, &draft.age),
        (NumericField::Height, &draft.height),
        (NumericField::Weight, &draft.weight),
    ] {
        parse_if_set(field, raw)?;
    }
    Ok(())
}

fn parse_if_set(field: NumericField, raw: &str) -> Result<Option<i64>, RangeError> {
    non_empty(raw).map(|s| field.parse(s)).transpose()
}

fn non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn draft_with(field: NumericField, value: &str) -> DraftActor {
        let mut draft = DraftActor::new();
        match field {
            NumericField::Age => draft.set_age(value),
            NumericField::Height => draft.set_height(value),
            NumericField::Weight => draft.set_weight(value),
        }
        draft
    }

    fn rejected_field(draft: &DraftActor) -> Option<NumericField> {
        validate(draft).err().map(|e| e.field)
    }

    #[test]
    fn age_boundaries() {
        assert!(validate(&draft_with(NumericField::Age, "1")).is_ok());
        assert!(validate(&draft_with(NumericField::Age, "99")).is_ok());
        assert_eq!(
            rejected_field(&draft_with(NumericField::Age, "0")),
            Some(NumericField::Age)
        );
        assert_eq!(
            rejected_field(&draft_with(NumericField::Age, "100")),
            Some(NumericField::Age)
        );
    }

    #[test]
    fn height_boundaries() {
        assert!(validate(&draft_with(NumericField::Height, "50")).is_ok());
        assert!(validate(&draft_with(NumericField::Height, "250")).is_ok());
        assert!(validate(&draft_with(NumericField::Height, "49")).is_err());
        assert!(validate(&draft_with(NumericField::Height, "251")).is_err());
    }

    #[test]
    fn weight_boundaries() {
        assert!(validate(&draft_with(NumericField::Weight, "20")).is_ok());
        assert!(validate(&draft_with(NumericField::Weight, "200")).is_ok());
        assert!(validate(&draft_with(NumericField::Weight, "19")).is_err());
        assert!(validate(&draft_with(NumericField::Weight, "201")).is_err());
    }

    #[test]
    fn non_integer_input_is_a_range_error() {
        for raw in ["abc", "30.5", "3 0", "-"] {
            let err = validate(&draft_with(NumericField::Age, raw)).unwrap_err();
            assert_eq!(
                err,
                RangeError {
                    field: NumericField::Age,
                    min: 1,
                    max: 99
                },
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(validate(&draft_with(NumericField::Age, " 42 ")).is_ok());
    }

    #[test]
    fn empty_fields_are_skipped() {
        let mut draft = DraftActor::new();
        draft.set_age("");
        draft.set_height("   ");
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn first_failure_wins_in_age_height_weight_order() {
        let mut draft = DraftActor::new();
        draft.set_weight("5");
        draft.set_height("5");
        draft.set_age("500");
        assert_eq!(rejected_field(&draft), Some(NumericField::Age));

        draft.set_age("30");
        assert_eq!(rejected_field(&draft), Some(NumericField::Height));

        draft.set_height("180");
        assert_eq!(rejected_field(&draft), Some(NumericField::Weight));
    }

    #[test]
    fn toggling_same_genre_twice_clears_it() {
        let mut draft = DraftActor::new();
        draft.toggle_genre(Genre::Comedic);
        assert_eq!(draft.genre(), Some(Genre::Comedic));
        draft.toggle_genre(Genre::Comedic);
        assert_eq!(draft.genre(), None);
    }

    #[test]
    fn toggling_other_genre_replaces_selection() {
        let mut draft = DraftActor::new();
        draft.toggle_genre(Genre::Action);
        draft.toggle_genre(Genre::Thrilling);
        assert_eq!(draft.genre(), Some(Genre::Thrilling));
    }

    #[test]
    fn gender_is_replaced_not_toggled() {
        let mut draft = DraftActor::new();
        draft.set_gender(Gender::Male);
        draft.set_gender(Gender::Male);
        assert_eq!(draft.gender(), Some(Gender::Male));
        draft.set_gender(Gender::Female);
        assert_eq!(draft.gender(), Some(Gender::Female));
    }

    #[test]
    fn empty_draft_serializes_no_option_keys() {
        let options = DraftActor::new().options().unwrap();
        assert_eq!(options, ActorOptions::default());
        assert_eq!(serde_json::to_value(&options).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn options_include_only_populated_fields() {
        let mut draft = DraftActor::new();
        draft.set_name("Jane");
        draft.set_age("30");
        draft.set_bio("  ");
        draft.toggle_genre(Genre::Dramatic);

        let value = serde_json::to_value(draft.options().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "age": 30, "genre": "Dramatic" }));
    }

    #[test]
    fn options_reject_invalid_draft() {
        let draft = draft_with(NumericField::Weight, "900");
        assert_matches!(
            draft.options(),
            Err(RangeError {
                field: NumericField::Weight,
                ..
            })
        );
    }

    #[test]
    fn gender_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Gender::Female).unwrap(), "female");
    }

    #[test]
    fn genre_parses_case_insensitively() {
        assert_eq!("adventurous".parse::<Genre>().unwrap(), Genre::Adventurous);
        assert!("Horror".parse::<Genre>().is_err());
    }

    #[test]
    fn unknown_gender_is_a_validation_error() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_matches!(
            "other".parse::<Gender>(),
            Err(CoreError::Validation(msg)) if msg.contains("other")
        );
    }
}
