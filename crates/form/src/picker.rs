//! Image picking behind the host's permission check.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use url::Url;

use dressup_core::image::PickedImage;

/// Bytes read from the start of a file to sniff its format.
const SNIFF_LEN: u64 = 64;

/// Host facility that lets the user choose one image.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Ask for access to the photo library. `false` means denied.
    async fn request_permission(&self) -> bool;

    /// Present the chooser. `None` means the user cancelled.
    async fn pick(&self) -> Option<PickedImage>;
}

/// Picker over one local file, for hosts without a photo library.
///
/// There is no photo library to gate, so permission is always granted. A
/// path that cannot be read picks nothing, like a cancelled chooser. The
/// MIME type comes from the file header, not the extension; an unrecognised
/// format is reported as unknown and the upload will later be refused.
#[derive(Debug, Clone)]
pub struct FileImagePicker {
    path: PathBuf,
}

impl FileImagePicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn describe(&self) -> std::io::Result<PickedImage> {
        let path = tokio::fs::canonicalize(&self.path).await?;
        let metadata = tokio::fs::metadata(&path).await?;

        let mut header = Vec::with_capacity(SNIFF_LEN as usize);
        tokio::fs::File::open(&path)
            .await?
            .take(SNIFF_LEN)
            .read_to_end(&mut header)
            .await?;
        let mime_type = image::guess_format(&header)
            .ok()
            .map(|format| format.to_mime_type().to_string());

        let dimensions = {
            let path = path.clone();
            tokio::task::spawn_blocking(move || image::image_dimensions(&path).ok())
                .await
                .ok()
                .flatten()
        };

        let uri = Url::from_file_path(&path).map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not an absolute path", path.display()),
            )
        })?;

        Ok(PickedImage {
            uri: uri.into(),
            file_size: Some(metadata.len()),
            mime_type,
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ImagePicker for FileImagePicker {
    async fn request_permission(&self) -> bool {
        true
    }

    async fn pick(&self) -> Option<PickedImage> {
        match self.describe().await {
            Ok(picked) => Some(picked),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cannot read picked image");
                None
            }
        }
    }
}
