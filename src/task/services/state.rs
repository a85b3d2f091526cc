//! Client-side owner of the authoritative task collection.
//!
//! Every mutation is a round trip: local state changes only after the
//! gateway confirms it, so a failed call leaves the collection exactly as it
//! was. The state lock is held for synchronous transitions only and never
//! across a gateway call. Operations therefore interleave freely; callers are
//! expected to await one intent per entity before issuing the next, and two
//! concurrent updates of the same task resolve last-response-wins.

use crate::task::{
    domain::{FilterUpdate, NewTask, Task, TaskChanges, TaskId, TodoFilters},
    ports::{GatewayError, TaskGateway},
    services::{
        validation::{TaskLimits, TaskValidationError, validate_changes, validate_new_task},
        view::derive_view,
    },
};
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Errors surfaced to callers of state manager intents.
#[derive(Debug, Error)]
pub enum TaskStateError {
    /// The payload was rejected before reaching the gateway.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// The gateway reported a failure.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result type for state manager intents.
pub type TaskStateResult<T> = Result<T, TaskStateError>;

/// Read-only copy of the manager's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Tasks in collection order.
    pub tasks: Vec<Task>,
    /// Current view parameters.
    pub filters: TodoFilters,
    /// Whether any gateway call is in flight.
    pub loading: bool,
    /// Message describing the most recent failure, if any.
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct ManagerState {
    tasks: Vec<Task>,
    filters: TodoFilters,
    error: Option<String>,
    in_flight: usize,
}

impl ManagerState {
    fn replace(&mut self, id: &TaskId, task: Task) -> bool {
        let Some(slot) = self.tasks.iter_mut().find(|existing| existing.id() == id) else {
            return false;
        };
        *slot = task;
        true
    }
}

fn read_state(lock: &RwLock<ManagerState>) -> RwLockReadGuard<'_, ManagerState> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_state(lock: &RwLock<ManagerState>) -> RwLockWriteGuard<'_, ManagerState> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a gateway call as in flight for the guard's lifetime.
///
/// Dropping the guard releases the mark on every exit path, including a
/// caller abandoning the future mid-request.
struct InFlight<'a> {
    state: &'a RwLock<ManagerState>,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a RwLock<ManagerState>) -> Self {
        write_state(state).in_flight += 1;
        Self { state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = write_state(self.state);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

/// Task state manager.
///
/// Construct one instance and hand an [`Arc`] of it to every consumer.
pub struct TaskStateManager<G, C>
where
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    clock: Arc<C>,
    limits: TaskLimits,
    state: RwLock<ManagerState>,
}

impl<G, C> TaskStateManager<G, C>
where
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    /// Creates a manager with default field limits and an empty collection.
    #[must_use]
    pub fn new(gateway: Arc<G>, clock: Arc<C>) -> Self {
        Self::with_limits(gateway, clock, TaskLimits::default())
    }

    /// Creates a manager with custom field limits.
    #[must_use]
    pub fn with_limits(gateway: Arc<G>, clock: Arc<C>, limits: TaskLimits) -> Self {
        Self {
            gateway,
            clock,
            limits,
            state: RwLock::new(ManagerState::default()),
        }
    }

    /// Returns the tasks in collection order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        read_state(&self.state).tasks.clone()
    }

    /// Returns the current view parameters.
    #[must_use]
    pub fn filters(&self) -> TodoFilters {
        read_state(&self.state).filters
    }

    /// Returns `true` while any gateway call is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        read_state(&self.state).in_flight > 0
    }

    /// Returns the most recent failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        read_state(&self.state).error.clone()
    }

    /// Returns the collection filtered and ordered by the current filters.
    #[must_use]
    pub fn view(&self) -> Vec<Task> {
        let state = read_state(&self.state);
        derive_view(&state.tasks, &state.filters)
    }

    /// Returns a consistent copy of all observable state.
    #[must_use]
    pub fn snapshot(&self) -> TaskSnapshot {
        let state = read_state(&self.state);
        TaskSnapshot {
            tasks: state.tasks.clone(),
            filters: state.filters,
            loading: state.in_flight > 0,
            error: state.error.clone(),
        }
    }

    /// Replaces the collection with the store's task list.
    ///
    /// Failures are recorded in [`Self::error`] and the previous collection
    /// is kept.
    pub async fn fetch_all(&self) {
        let _in_flight = InFlight::begin(&self.state);
        match self.gateway.list().await {
            Ok(tasks) => {
                tracing::info!(count = tasks.len(), "replaced task collection from store");
                let mut state = write_state(&self.state);
                state.tasks = tasks;
                state.error = None;
            }
            Err(err) => self.record_failure("Failed to fetch tasks", &err),
        }
    }

    /// Creates a task and prepends the stored record to the collection.
    ///
    /// A missing due date defaults to the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStateError::Validation`] without calling the gateway
    /// when the payload is invalid, or [`TaskStateError::Gateway`] when the
    /// store does not confirm creation.
    pub async fn add_task(&self, input: NewTask) -> TaskStateResult<Task> {
        validate_new_task(&input, &self.limits)?;
        let request = if input.due_date().is_some() {
            input
        } else {
            input.with_due_date(self.clock.utc())
        };

        let _in_flight = InFlight::begin(&self.state);
        match self.gateway.create(&request).await {
            Ok(task) => {
                tracing::debug!(task_id = %task.id(), "task created");
                let mut state = write_state(&self.state);
                state.tasks.insert(0, task.clone());
                state.error = None;
                Ok(task)
            }
            Err(err) => {
                self.record_failure("Failed to add task", &err);
                Err(err.into())
            }
        }
    }

    /// Updates a task, replacing it in place once the store confirms.
    ///
    /// The store expects a full record, so untouched fields are filled from
    /// the local copy. When the task is not held locally the changes are
    /// forwarded as given.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStateError::Validation`] without calling the gateway
    /// when a changed field is invalid, or [`TaskStateError::Gateway`] when
    /// the store does not confirm the update.
    pub async fn update_task(&self, id: &TaskId, changes: TaskChanges) -> TaskStateResult<Task> {
        validate_changes(&changes, &self.limits)?;
        let request = match self.find_local(id) {
            Some(current) => changes.merged_onto(&current),
            None => changes,
        };
        self.apply_update(id, &request, "Failed to update task")
            .await
            .map_err(TaskStateError::from)
    }

    /// Deletes a task, removing it locally once the store confirms.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStateError::Gateway`] when the store does not confirm
    /// deletion; the collection is left untouched.
    pub async fn delete_task(&self, id: &TaskId) -> TaskStateResult<()> {
        let _in_flight = InFlight::begin(&self.state);
        match self.gateway.delete(id).await {
            Ok(()) => {
                tracing::debug!(task_id = %id, "task deleted");
                let mut state = write_state(&self.state);
                state.tasks.retain(|task| task.id() != id);
                state.error = None;
                Ok(())
            }
            Err(err) => {
                self.record_failure("Failed to delete task", &err);
                Err(err.into())
            }
        }
    }

    /// Flips the completion flag of a locally held task.
    ///
    /// Unknown identifiers are ignored without contacting the store. Every
    /// other field is sent unchanged. Failures are recorded in
    /// [`Self::error`] rather than returned.
    pub async fn toggle_complete(&self, id: &TaskId) {
        let Some(current) = self.find_local(id) else {
            tracing::debug!(task_id = %id, "toggle ignored for unknown task");
            return;
        };
        let changes = TaskChanges::from_task(&current).with_completed(!current.is_completed());
        if self
            .apply_update(id, &changes, "Failed to toggle task")
            .await
            .is_err()
        {
            tracing::debug!(task_id = %id, "toggle failed, error recorded");
        }
    }

    /// Re-reads one task from the store and replaces the local copy.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStateError::Gateway`] when the store lookup fails.
    pub async fn refresh_task(&self, id: &TaskId) -> TaskStateResult<Task> {
        let _in_flight = InFlight::begin(&self.state);
        match self.gateway.find(id).await {
            Ok(task) => {
                let mut state = write_state(&self.state);
                state.replace(id, task.clone());
                state.error = None;
                Ok(task)
            }
            Err(err) => {
                self.record_failure("Failed to refresh task", &err);
                Err(err.into())
            }
        }
    }

    /// Merges a filter change. Purely local and synchronous.
    pub fn set_filters(&self, update: FilterUpdate) {
        let mut state = write_state(&self.state);
        state.filters = state.filters.merge(update);
    }

    fn find_local(&self, id: &TaskId) -> Option<Task> {
        read_state(&self.state)
            .tasks
            .iter()
            .find(|task| task.id() == id)
            .cloned()
    }

    async fn apply_update(
        &self,
        id: &TaskId,
        changes: &TaskChanges,
        context: &str,
    ) -> Result<Task, GatewayError> {
        let _in_flight = InFlight::begin(&self.state);
        match self.gateway.update(id, changes).await {
            Ok(task) => {
                let mut state = write_state(&self.state);
                if !state.replace(id, task.clone()) {
                    tracing::debug!(task_id = %id, "update confirmed for task not held locally");
                }
                state.error = None;
                Ok(task)
            }
            Err(err) => {
                self.record_failure(context, &err);
                Err(err)
            }
        }
    }

    fn record_failure(&self, context: &str, err: &GatewayError) {
        tracing::warn!(error = %err, "{context}");
        write_state(&self.state).error = Some(format!("{context}: {err}"));
    }
}
