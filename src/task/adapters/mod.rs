//! Adapter implementations of the task ports.
//!
//! - [`http`]: the remote task store and image host over HTTP
//! - [`memory`]: an in-process task store for tests and demos

pub mod http;
pub mod memory;
