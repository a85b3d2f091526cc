//! Task management for Taskdeck.
//!
//! This module owns the client-side task collection: every create, edit,
//! completion toggle, and deletion is confirmed by the remote store before
//! local state changes, and presentation reads derived views computed from
//! that state. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
