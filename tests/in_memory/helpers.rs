//! Shared test helpers for in-memory gateway integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::task::{
    adapters::memory::InMemoryTaskGateway,
    domain::{Priority, Recurrence, StoredTaskData, Task, TaskId},
    services::TaskStateManager,
};

/// Manager type used by the in-memory tests.
pub type TestManager = TaskStateManager<InMemoryTaskGateway<DefaultClock>, DefaultClock>;

/// Provides a clock for store timestamps.
#[fixture]
pub fn clock() -> Arc<DefaultClock> {
    Arc::new(DefaultClock)
}

/// Provides an empty in-memory store.
#[fixture]
pub fn gateway(clock: Arc<DefaultClock>) -> InMemoryTaskGateway<DefaultClock> {
    InMemoryTaskGateway::new(clock)
}

/// Builds a manager sharing `gateway`'s storage.
pub fn manager_for(gateway: &InMemoryTaskGateway<DefaultClock>) -> TestManager {
    TaskStateManager::new(Arc::new(gateway.clone()), Arc::new(DefaultClock))
}

/// Builds a UTC timestamp.
///
/// # Panics
///
/// Panics when the components do not form a valid timestamp.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid test timestamp")
}

/// Builds a stored task with fixed timestamps.
///
/// # Panics
///
/// Panics when `id` is blank.
pub fn seeded_task(id: &str, title: &str, priority: Priority) -> Task {
    Task::from_stored(StoredTaskData {
        id: TaskId::new(id).expect("valid test task id"),
        title: title.to_owned(),
        description: None,
        completed: false,
        created_at: at(2025, 2, 1, 9),
        updated_at: None,
        due_date: at(2025, 2, 14, 18),
        priority,
        recurrence: Recurrence::none(),
        image_url: None,
    })
}
