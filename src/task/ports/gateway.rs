//! Gateway port for the remote task store.

use crate::task::domain::{NewTask, Task, TaskChanges, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Remote task store contract.
///
/// Every operation is a single round trip. Implementations never retry and
/// never swallow failures; retry policy belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Returns every task in store order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the exchange fails or the response does
    /// not carry a task list.
    async fn list(&self) -> GatewayResult<Vec<Task>>;

    /// Returns a single task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Rejected`] when the store does not know the
    /// identifier.
    async fn find(&self, id: &TaskId) -> GatewayResult<Task>;

    /// Creates a task and returns the record with its store-assigned
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the store does not confirm creation.
    async fn create(&self, input: &NewTask) -> GatewayResult<Task>;

    /// Applies changes to a task and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the store does not confirm the update.
    async fn update(&self, id: &TaskId, changes: &TaskChanges) -> GatewayResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Rejected`] when the store does not report
    /// success explicitly, even if the transport call succeeded.
    async fn delete(&self, id: &TaskId) -> GatewayResult<()>;
}

/// Errors returned by task gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The request did not complete at the transport level.
    #[error("network failure: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),

    /// The response does not have the expected envelope or field shapes.
    #[error("malformed store response: {0}")]
    Format(String),

    /// The store explicitly reported failure.
    #[error(
        "store rejected the request{}: {message}",
        .status.map_or_else(String::new, |code| format!(" (status {code})"))
    )]
    Rejected {
        /// HTTP status, when the rejection came with one.
        status: Option<u16>,
        /// Message reported by the store.
        message: String,
    },
}

impl GatewayError {
    /// Wraps a transport error.
    #[must_use]
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }

    /// Creates a format failure.
    #[must_use]
    pub fn format(detail: impl Into<String>) -> Self {
        Self::Format(detail.into())
    }

    /// Creates a rejection without a transport status.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            status: None,
            message: message.into(),
        }
    }
}
