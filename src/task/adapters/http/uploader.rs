//! Multipart image uploader.

use async_trait::async_trait;
use reqwest::{Client, multipart};
use serde::Deserialize;

use crate::config::TodoClientConfig;
use crate::task::ports::{ImageFile, ImageUploader, UploadError, UploadResult, validate_image};

/// Body returned by the upload endpoint.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    path: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Uploads task images to the store's file host.
#[derive(Debug, Clone)]
pub struct HttpImageUploader {
    client: Client,
    upload_url: String,
    asset_base_url: String,
}

impl HttpImageUploader {
    /// Creates an uploader for the configured endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Network`] when the HTTP client cannot be built.
    pub fn new(config: &TodoClientConfig) -> UploadResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(UploadError::network)?;
        Ok(Self::with_client(
            client,
            &config.upload_url,
            &config.asset_base_url,
        ))
    }

    /// Creates an uploader around an existing client.
    #[must_use]
    pub fn with_client(client: Client, upload_url: &str, asset_base_url: &str) -> Self {
        Self {
            client,
            upload_url: upload_url.to_owned(),
            asset_base_url: asset_base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl ImageUploader for HttpImageUploader {
    async fn upload(&self, image: &ImageFile) -> UploadResult<String> {
        let mime_type = validate_image(image)?;
        tracing::debug!(
            file_name = %image.file_name,
            mime_type,
            bytes = image.bytes.len(),
            "uploading task image"
        );

        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(mime_type)
            .map_err(|_| UploadError::UnsupportedMimeType(image.mime_type.clone()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(UploadError::network)?;
        let status = response.status();
        let body = response.text().await.map_err(UploadError::network)?;
        let parsed: Option<UploadResponse> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = parsed
                .and_then(|reply| reply.error.or(reply.message))
                .unwrap_or_else(|| format!("upload failed with status {status}"));
            tracing::warn!(status = status.as_u16(), %message, "image upload rejected");
            return Err(UploadError::Rejected(message));
        }

        let path = parsed
            .and_then(|reply| reply.path)
            .ok_or_else(|| UploadError::Rejected("upload response is missing `path`".to_owned()))?;
        Ok(format!(
            "{}/{}",
            self.asset_base_url,
            path.trim_start_matches('/')
        ))
    }
}
