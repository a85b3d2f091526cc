//! Shared world state for task management BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::task::{
    adapters::memory::InMemoryTaskGateway,
    domain::{Task, TaskId},
    services::{TaskStateError, TaskStateManager},
};

/// Manager type used by the BDD world.
pub type TestTaskManager = TaskStateManager<InMemoryTaskGateway<DefaultClock>, DefaultClock>;

/// Scenario world for task management behaviour tests.
pub struct TaskManagementWorld {
    pub store: InMemoryTaskGateway<DefaultClock>,
    pub manager: TestTaskManager,
    pub last_result: Option<Result<(), TaskStateError>>,
}

impl TaskManagementWorld {
    /// Creates a world with an empty store and collection.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryTaskGateway::new(Arc::new(DefaultClock));
        let manager = TaskStateManager::new(Arc::new(store.clone()), Arc::new(DefaultClock));

        Self {
            store,
            manager,
            last_result: None,
        }
    }

    /// Looks up the identifier of a locally held task by title.
    ///
    /// # Errors
    ///
    /// Returns an error when no local task carries `title`.
    pub fn id_of(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.manager
            .tasks()
            .iter()
            .find(|task| task.title() == title)
            .map(|task| task.id().clone())
            .ok_or_else(|| eyre::eyre!("no local task titled {title:?}"))
    }

    /// Looks up a locally held task by title.
    ///
    /// # Errors
    ///
    /// Returns an error when no local task carries `title`.
    pub fn local_task(&self, title: &str) -> Result<Task, eyre::Report> {
        self.manager
            .tasks()
            .into_iter()
            .find(|task| task.title() == title)
            .ok_or_else(|| eyre::eyre!("no local task titled {title:?}"))
    }
}

impl Default for TaskManagementWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskManagementWorld {
    TaskManagementWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
