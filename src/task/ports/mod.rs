//! Port contracts for the task manager.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod gateway;
pub mod uploader;

pub use gateway::{GatewayError, GatewayResult, TaskGateway};
pub use uploader::{
    ALLOWED_IMAGE_TYPES, ImageFile, ImageUploader, MAX_IMAGE_BYTES, UploadError, UploadResult,
    validate_image,
};
