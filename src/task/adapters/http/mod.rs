//! HTTP adapters for the remote task store and image host.

mod gateway;
mod uploader;
pub(crate) mod wire;

pub use gateway::HttpTaskGateway;
pub use uploader::HttpImageUploader;
