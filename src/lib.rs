//! Taskdeck: client-side task management against a remote task store.
//!
//! The crate owns the in-memory task collection of a todo application,
//! synchronizes it with a REST task store, and derives filtered, ordered
//! views for presentation.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Task records, recurrence metadata, and view parameters
//! - **Ports**: Abstract trait interfaces for the task store and image host
//! - **Adapters**: HTTP and in-memory implementations of the ports
//! - **Services**: The task state manager, validation, and view derivation
//!
//! # Modules
//!
//! - [`task`]: Task model, ports, adapters, and services
//! - [`config`]: Endpoint and timeout configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;
