//! Interleaving tests for concurrent intents on one manager.
//!
//! The scripted gateway parks each update until the test releases it, so
//! the order in which responses arrive is fully under test control.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::helpers::seeded_task;
use async_trait::async_trait;
use mockable::DefaultClock;
use taskdeck::task::{
    domain::{NewTask, Priority, Task, TaskChanges, TaskId},
    ports::{GatewayError, GatewayResult, TaskGateway},
    services::TaskStateManager,
};
use tokio::sync::oneshot;

/// Gateway whose updates resolve only when the test sends a response.
struct ScriptedGateway {
    listing: Vec<Task>,
    responses: Mutex<VecDeque<oneshot::Receiver<Task>>>,
    updates_started: AtomicUsize,
}

impl ScriptedGateway {
    fn new(listing: Vec<Task>, responses: Vec<oneshot::Receiver<Task>>) -> Self {
        Self {
            listing,
            responses: Mutex::new(responses.into()),
            updates_started: AtomicUsize::new(0),
        }
    }

    fn updates_started(&self) -> usize {
        self.updates_started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskGateway for ScriptedGateway {
    async fn list(&self) -> GatewayResult<Vec<Task>> {
        Ok(self.listing.clone())
    }

    async fn find(&self, _id: &TaskId) -> GatewayResult<Task> {
        Err(GatewayError::rejected("not scripted"))
    }

    async fn create(&self, _input: &NewTask) -> GatewayResult<Task> {
        Err(GatewayError::rejected("not scripted"))
    }

    async fn update(&self, _id: &TaskId, _changes: &TaskChanges) -> GatewayResult<Task> {
        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        self.updates_started.fetch_add(1, Ordering::SeqCst);
        match next {
            Some(response) => response.await.map_err(GatewayError::network),
            None => Err(GatewayError::rejected("no scripted response left")),
        }
    }

    async fn delete(&self, _id: &TaskId) -> GatewayResult<()> {
        Err(GatewayError::rejected("not scripted"))
    }
}

fn titled(title: &str) -> Task {
    seeded_task("1", title, Priority::Medium)
}

fn local_title(manager: &TaskStateManager<ScriptedGateway, DefaultClock>) -> Option<String> {
    manager.tasks().first().map(|task| task.title().to_owned())
}

#[tokio::test]
async fn concurrent_updates_of_one_task_resolve_last_response_wins() {
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let gateway = Arc::new(ScriptedGateway::new(
        vec![titled("original")],
        vec![first_rx, second_rx],
    ));
    let manager = TaskStateManager::new(Arc::clone(&gateway), Arc::new(DefaultClock));
    manager.fetch_all().await;
    let id = TaskId::new("1").expect("valid id");

    let first = manager.update_task(&id, TaskChanges::new().with_title("first"));
    let second = manager.update_task(&id, TaskChanges::new().with_title("second"));
    let driver = async {
        while gateway.updates_started() < 2 {
            tokio::task::yield_now().await;
        }
        assert!(manager.is_loading(), "both updates are in flight");

        // The later request is answered first.
        second_tx
            .send(titled("second"))
            .expect("second update still waiting");
        while local_title(&manager).as_deref() != Some("second") {
            tokio::task::yield_now().await;
        }
        assert!(manager.is_loading(), "first update is still in flight");

        first_tx
            .send(titled("first"))
            .expect("first update still waiting");
    };

    let (first_result, second_result, ()) = tokio::join!(first, second, driver);

    assert!(first_result.is_ok());
    assert!(second_result.is_ok());
    assert_eq!(local_title(&manager).as_deref(), Some("first"));
    assert!(!manager.is_loading());
    assert_eq!(manager.error(), None);
}

#[tokio::test]
async fn abandoned_request_releases_loading_flag() {
    let (pending_tx, pending_rx) = oneshot::channel::<Task>();
    let gateway = Arc::new(ScriptedGateway::new(
        vec![titled("original")],
        vec![pending_rx],
    ));
    let manager = TaskStateManager::new(Arc::clone(&gateway), Arc::new(DefaultClock));
    manager.fetch_all().await;
    let id = TaskId::new("1").expect("valid id");

    {
        let update = manager.update_task(&id, TaskChanges::new().with_title("never"));
        tokio::pin!(update);
        let polled = tokio::select! {
            biased;
            _ = &mut update => false,
            () = async {
                while gateway.updates_started() < 1 {
                    tokio::task::yield_now().await;
                }
            } => true,
        };
        assert!(polled);
        assert!(manager.is_loading());
    }

    assert!(!manager.is_loading());
    assert_eq!(local_title(&manager).as_deref(), Some("original"));
    drop(pending_tx);
}

#[tokio::test]
async fn failed_update_during_another_leaves_the_other_result() {
    let (first_tx, first_rx) = oneshot::channel::<Task>();
    let (second_tx, second_rx) = oneshot::channel();
    let gateway = Arc::new(ScriptedGateway::new(
        vec![titled("original")],
        vec![first_rx, second_rx],
    ));
    let manager = TaskStateManager::new(Arc::clone(&gateway), Arc::new(DefaultClock));
    manager.fetch_all().await;
    let id = TaskId::new("1").expect("valid id");

    let first = manager.update_task(&id, TaskChanges::new().with_title("lost"));
    let second = manager.update_task(&id, TaskChanges::new().with_title("kept"));
    let driver = async {
        while gateway.updates_started() < 2 {
            tokio::task::yield_now().await;
        }
        second_tx.send(titled("kept")).expect("second update still waiting");
        drop(first_tx);
    };

    let (first_result, second_result, ()) = tokio::join!(first, second, driver);

    assert!(first_result.is_err());
    assert!(second_result.is_ok());
    assert_eq!(local_title(&manager).as_deref(), Some("kept"));
    assert!(!manager.is_loading());
}
