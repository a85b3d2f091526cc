//! In-memory task store for tests and offline demos.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::task::{
    domain::{NewTask, StoredTaskData, Task, TaskChanges, TaskId},
    ports::{GatewayError, GatewayResult, TaskGateway},
};

/// Thread-safe in-memory task store.
///
/// Assigns identifiers on creation, keeps tasks in creation order, and can
/// be primed to fail upcoming calls.
pub struct InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryStoreState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    tasks: Vec<Task>,
    queued_failures: VecDeque<GatewayError>,
}

impl<C> Clone for InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
            clock,
        }
    }

    /// Creates a store holding `tasks` in the given order.
    #[must_use]
    pub fn with_tasks(clock: Arc<C>, tasks: impl IntoIterator<Item = Task>) -> Self {
        let gateway = Self::new(clock);
        gateway
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .tasks
            .extend(tasks);
        gateway
    }

    /// Makes the next gateway call fail with `error`.
    ///
    /// Queued failures are consumed in order, one per call.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] when the store lock is poisoned.
    pub fn fail_next(&self, error: GatewayError) -> GatewayResult<()> {
        self.write()?.queued_failures.push_back(error);
        Ok(())
    }

    /// Returns the stored tasks in store order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] when the store lock is poisoned.
    pub fn stored_tasks(&self) -> GatewayResult<Vec<Task>> {
        Ok(self.read()?.tasks.clone())
    }

    fn read(&self) -> GatewayResult<RwLockReadGuard<'_, InMemoryStoreState>> {
        self.state
            .read()
            .map_err(|err| GatewayError::network(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> GatewayResult<RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state
            .write()
            .map_err(|err| GatewayError::network(std::io::Error::other(err.to_string())))
    }

    fn take_queued_failure(&self) -> GatewayResult<()> {
        self.write()?.queued_failures.pop_front().map_or(Ok(()), Err)
    }
}

fn not_found(id: &TaskId) -> GatewayError {
    GatewayError::Rejected {
        status: Some(404),
        message: format!("task {id} not found"),
    }
}

fn apply_changes(data: &mut StoredTaskData, changes: &TaskChanges) {
    if let Some(title) = changes.title() {
        title.clone_into(&mut data.title);
    }
    if let Some(description) = changes.description() {
        data.description = description.map(str::to_owned);
    }
    if let Some(completed) = changes.completed() {
        data.completed = completed;
    }
    if let Some(due_date) = changes.due_date() {
        data.due_date = due_date;
    }
    if let Some(priority) = changes.priority() {
        data.priority = priority;
    }
    if let Some(recurrence) = changes.recurrence() {
        data.recurrence = *recurrence;
    }
    if let Some(image_url) = changes.image_url() {
        data.image_url = image_url.map(str::to_owned);
    }
}

#[async_trait]
impl<C> TaskGateway for InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self) -> GatewayResult<Vec<Task>> {
        self.take_queued_failure()?;
        Ok(self.read()?.tasks.clone())
    }

    async fn find(&self, id: &TaskId) -> GatewayResult<Task> {
        self.take_queued_failure()?;
        self.read()?
            .tasks
            .iter()
            .find(|task| task.id() == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, input: &NewTask) -> GatewayResult<Task> {
        self.take_queued_failure()?;
        let now = self.clock.utc();
        let id = TaskId::new(Uuid::new_v4().to_string())
            .map_err(|err| GatewayError::format(err.to_string()))?;
        let task = Task::from_stored(StoredTaskData {
            id,
            title: input.title().to_owned(),
            description: input.description().map(str::to_owned),
            completed: false,
            created_at: now,
            updated_at: Some(now),
            due_date: input.due_date().unwrap_or(now),
            priority: input.priority(),
            recurrence: *input.recurrence(),
            image_url: input.image_url().map(str::to_owned),
        });
        self.write()?.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: &TaskId, changes: &TaskChanges) -> GatewayResult<Task> {
        self.take_queued_failure()?;
        let now = self.clock.utc();
        let mut state = self.write()?;
        let slot = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| not_found(id))?;
        let mut data = slot.to_stored();
        apply_changes(&mut data, changes);
        data.updated_at = Some(now);
        *slot = Task::from_stored(data);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &TaskId) -> GatewayResult<()> {
        self.take_queued_failure()?;
        let mut state = self.write()?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != id);
        if state.tasks.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
