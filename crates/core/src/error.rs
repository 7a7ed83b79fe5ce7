use crate::actor::NumericField;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// A numeric form field failed to parse or fell outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be an integer between {min} and {max}")]
pub struct RangeError {
    pub field: NumericField,
    pub min: i64,
    pub max: i64,
}

impl RangeError {
    /// Message shown to the user, e.g. "Height must be a number between 50 and 250 cm".
    pub fn user_message(&self) -> String {
        let unit = match self.field.unit() {
            Some(unit) => format!(" {unit}"),
            None => String::new(),
        };
        format!(
            "{} must be a number between {} and {}{unit}",
            self.field.label(),
            self.min,
            self.max
        )
    }
}

/// A picked image could not be turned into an upload descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// The picker did not report a required attribute (`"size"` or `"mime type"`).
    #[error("Picked image is missing its {0}")]
    MissingMetadata(&'static str),

    #[error("Picked image locator is not a valid URI: {0}")]
    MalformedLocator(String),
}
