//! Upload port for task image attachments.
//!
//! The uploader turns a local image into a hosted URL. The task manager only
//! ever stores that URL; the bytes never pass through it.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for image upload operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// MIME types accepted for task images.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Largest accepted image, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Image selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name.
    pub file_name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Creates an image file descriptor.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Checks type and size limits before any bytes are transmitted.
///
/// The declared type is matched after trimming and ASCII lower-casing; the
/// canonical entry of [`ALLOWED_IMAGE_TYPES`] is returned so callers send
/// that rather than the raw declaration.
///
/// # Errors
///
/// Returns [`UploadError::UnsupportedMimeType`] for types outside
/// [`ALLOWED_IMAGE_TYPES`] and [`UploadError::TooLarge`] above
/// [`MAX_IMAGE_BYTES`].
pub fn validate_image(image: &ImageFile) -> UploadResult<&'static str> {
    let declared = image.mime_type.trim();
    let mime_type = ALLOWED_IMAGE_TYPES
        .iter()
        .find(|allowed| allowed.eq_ignore_ascii_case(declared))
        .copied()
        .ok_or_else(|| UploadError::UnsupportedMimeType(image.mime_type.clone()))?;
    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge {
            actual_bytes: image.bytes.len(),
            limit_bytes: MAX_IMAGE_BYTES,
        });
    }
    Ok(mime_type)
}

/// Image hosting contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Uploads an image and returns the URL to store on the task.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] when validation fails or the host does not
    /// confirm the upload.
    async fn upload(&self, image: &ImageFile) -> UploadResult<String>;
}

/// Errors returned while uploading task images.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// The image type is not accepted.
    #[error("unsupported image type '{0}', expected JPEG, PNG, GIF, or WebP")]
    UnsupportedMimeType(String),

    /// The image exceeds the size ceiling.
    #[error("image is {actual_bytes} bytes, limit is {limit_bytes}")]
    TooLarge {
        /// Size of the rejected image.
        actual_bytes: usize,
        /// Configured ceiling.
        limit_bytes: usize,
    },

    /// The upload did not complete at the transport level.
    #[error("network failure: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),

    /// The host refused or could not describe the upload.
    #[error("upload rejected: {0}")]
    Rejected(String),
}

impl UploadError {
    /// Wraps a transport error.
    #[must_use]
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }
}
