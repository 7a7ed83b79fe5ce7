//! Stored record shapes as the backend returns them.

use serde::{Deserialize, Serialize};

use crate::actor::{Gender, Genre};
use crate::types::{RecordId, Timestamp};

/// A document from the actors collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRecord {
    #[serde(rename = "$id")]
    pub id: RecordId,
    pub name: String,
    /// Storage file id of the portrait.
    pub image_id: RecordId,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<Timestamp>,
}

/// A document from the outfits collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRecord {
    #[serde(rename = "$id")]
    pub id: RecordId,
    pub outfit_name: String,
    pub image_id: RecordId,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<Timestamp>,
}

/// A record paired with the viewable URL of its image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithImage<T> {
    #[serde(flatten)]
    pub record: T,
    pub image_url: String,
}

pub type ActorWithImage = WithImage<ActorRecord>;
pub type OutfitWithImage = WithImage<OutfitRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_document_deserializes_with_missing_optionals() {
        let doc = serde_json::json!({
            "$id": "act_1",
            "$createdAt": "2025-03-01T12:00:00.000+00:00",
            "$collectionId": "actors",
            "name": "Jane",
            "imageId": "file_1",
            "age": 30,
            "genre": "Comedic",
        });
        let actor: ActorRecord = serde_json::from_value(doc).unwrap();
        assert_eq!(actor.id, "act_1");
        assert_eq!(actor.age, Some(30));
        assert_eq!(actor.genre, Some(Genre::Comedic));
        assert_eq!(actor.gender, None);
        assert!(actor.created_at.is_some());
    }

    #[test]
    fn with_image_flattens_record() {
        let outfit = OutfitWithImage {
            record: OutfitRecord {
                id: "out_1".into(),
                outfit_name: "Blazer".into(),
                image_id: "file_9".into(),
                created_at: None,
            },
            image_url: "https://cloud.example.com/v1/view".into(),
        };
        let value = serde_json::to_value(&outfit).unwrap();
        assert_eq!(value["outfitName"], "Blazer");
        assert_eq!(value["imageUrl"], "https://cloud.example.com/v1/view");
    }
}
