use dressup_backend::StoreError;
use dressup_core::error::{ImageError, RangeError};

/// Message shown when the upload could not be prepared or the backend failed.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to add actor. Please try again.";

/// Why a submit attempt did not create an actor.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("Actor name is empty")]
    EmptyName,

    #[error("No image selected")]
    MissingImage,

    #[error("Failed to prepare upload: {0}")]
    PrepareUpload(#[from] ImageError),

    #[error("Backend rejected the actor: {0}")]
    Remote(#[from] StoreError),

    /// Another submission is in flight, or this form already completed.
    #[error("A submission is already in progress")]
    Busy,

    /// The form was closed while the submission was in flight.
    #[error("Submission cancelled")]
    Cancelled,
}

impl SubmitError {
    /// The single message to surface to the user, if any.
    ///
    /// `Busy` and `Cancelled` are silent: the user either already sees a
    /// submission in progress or has left the screen.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Range(err) => Some(err.user_message()),
            Self::EmptyName => Some("Please enter a name for your actor".to_string()),
            Self::MissingImage => Some("Please select an image for your actor".to_string()),
            Self::PrepareUpload(_) | Self::Remote(_) => Some(GENERIC_FAILURE_MESSAGE.to_string()),
            Self::Busy | Self::Cancelled => None,
        }
    }
}
