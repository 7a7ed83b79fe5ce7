//! Picked-image handles and their upload descriptors.
//!
//! [`resolve`] is pure data transformation: it never touches the disk or
//! the network. Reading the bytes is the store's job.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ImageError;

/// What the host image picker hands back for one selected image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickedImage {
    /// Resource locator, e.g. `file:///data/picks/IMG_0042.jpg`.
    pub uri: String,
    /// Byte count, when the picker knows it.
    pub file_size: Option<u64>,
    /// MIME type, when the picker knows it.
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl PickedImage {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            file_size: None,
            mime_type: None,
            width: None,
            height: None,
        }
    }

    pub fn with_size(mut self, bytes: u64) -> Self {
        self.file_size = Some(bytes);
        self
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

/// Portable descriptor of an image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImagePayload {
    /// File name taken from the last path segment of the locator.
    pub name: String,
    pub size: u64,
    /// Normalized locator.
    pub uri: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Turn a picked image into an upload descriptor.
///
/// Fails with [`ImageError::MalformedLocator`] if the locator does not parse
/// as a URI or has no file name, and with [`ImageError::MissingMetadata`] if
/// the size or MIME type is unknown.
pub fn resolve(picked: &PickedImage) -> Result<ResolvedImagePayload, ImageError> {
    let url = Url::parse(&picked.uri)
        .map_err(|e| ImageError::MalformedLocator(format!("{}: {e}", picked.uri)))?;

    let name = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| ImageError::MalformedLocator(format!("{}: no file name", picked.uri)))?;

    let size = picked
        .file_size
        .ok_or(ImageError::MissingMetadata("size"))?;

    let mime_type = picked
        .mime_type
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or(ImageError::MissingMetadata("mime type"))?
        .to_string();

    Ok(ResolvedImagePayload {
        name,
        size,
        uri: url.into(),
        mime_type,
    })
}
