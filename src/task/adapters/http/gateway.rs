//! HTTP gateway for the remote task store.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url, header};

use super::wire::{
    CreateTaskBody, UpdateTaskBody, decode_deletion, decode_single_task, decode_task_list,
    rejection_message,
};
use crate::config::TodoClientConfig;
use crate::task::{
    domain::{NewTask, Task, TaskChanges, TaskId},
    ports::{GatewayError, GatewayResult, TaskGateway},
};

/// Task store client speaking the REST task API.
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: Client,
    tasks_url: Url,
}

impl HttpTaskGateway {
    /// Creates a gateway for the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] when the HTTP client cannot be
    /// built or the base URL cannot address a task collection.
    pub fn new(config: &TodoClientConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(GatewayError::network)?;
        Self::with_client(client, &config.api_base_url)
    }

    /// Creates a gateway around an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] when `api_base_url` does not parse
    /// as a hierarchical URL.
    pub fn with_client(client: Client, api_base_url: &str) -> GatewayResult<Self> {
        let mut tasks_url = Url::parse(api_base_url).map_err(GatewayError::network)?;
        push_segment(&mut tasks_url, "tasks")?;
        Ok(Self { client, tasks_url })
    }

    /// Builds `{tasks_url}/{id}` with the id percent-encoded as one segment.
    fn task_url(&self, id: &TaskId) -> GatewayResult<Url> {
        let mut url = self.tasks_url.clone();
        push_segment(&mut url, id.as_str())?;
        Ok(url)
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> GatewayResult<String> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(GatewayError::network)?;
        let status = response.status();
        let body = response.text().await.map_err(GatewayError::network)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "task store returned an error status");
            return Err(GatewayError::Rejected {
                status: Some(status.as_u16()),
                message: rejection_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }
        Ok(body)
    }
}

fn push_segment(url: &mut Url, segment: &str) -> GatewayResult<()> {
    let base = url.to_string();
    url.path_segments_mut()
        .map_err(|()| GatewayError::network(CannotBeABase(base)))?
        .pop_if_empty()
        .push(segment);
    Ok(())
}

/// A URL such as `mailto:` that has no path segments to extend.
#[derive(Debug, thiserror::Error)]
#[error("task store URL `{0}` cannot carry path segments")]
struct CannotBeABase(String);

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn list(&self) -> GatewayResult<Vec<Task>> {
        tracing::debug!(url = %self.tasks_url, "listing tasks");
        let body = self.send(self.client.get(self.tasks_url.clone())).await?;
        decode_task_list(&body)
    }

    async fn find(&self, id: &TaskId) -> GatewayResult<Task> {
        tracing::debug!(task_id = %id, "fetching task");
        let body = self.send(self.client.get(self.task_url(id)?)).await?;
        decode_single_task(&body)
    }

    async fn create(&self, input: &NewTask) -> GatewayResult<Task> {
        tracing::debug!(title = input.title(), "creating task");
        let payload = CreateTaskBody::from_input(input);
        let body = self
            .send(self.client.post(self.tasks_url.clone()).json(&payload))
            .await?;
        decode_single_task(&body)
    }

    async fn update(&self, id: &TaskId, changes: &TaskChanges) -> GatewayResult<Task> {
        tracing::debug!(task_id = %id, "updating task");
        let payload = UpdateTaskBody::from_changes(changes);
        let body = self
            .send(self.client.put(self.task_url(id)?).json(&payload))
            .await?;
        decode_single_task(&body)
    }

    async fn delete(&self, id: &TaskId) -> GatewayResult<()> {
        tracing::debug!(task_id = %id, "deleting task");
        let body = self.send(self.client.delete(self.task_url(id)?)).await?;
        decode_deletion(&body)
    }
}
