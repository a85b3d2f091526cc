//! Wire shapes of the remote task store and their validation.
//!
//! Responses are decoded into permissive structures first and then checked
//! field by field, so every shape violation surfaces as a
//! [`GatewayError::Format`] naming the offending field.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{
    domain::{
        DaysOfWeek, Frequency, NewTask, Priority, Recurrence, StoredTaskData, Task, TaskChanges,
        TaskId,
    },
    ports::{GatewayError, GatewayResult},
};

/// Response envelope shared by every store endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) success: Option<bool>,
    pub(crate) message: Option<String>,
    pub(crate) error: Option<String>,
    pub(crate) data: Option<T>,
}

/// Payload of the list endpoint. Pagination metadata is accepted and ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct TaskListData {
    pub(crate) tasks: Option<Vec<WireTask>>,
}

/// Store identifiers arrive as either JSON numbers or strings.
///
/// Any JSON number is kept as its textual form, so ids beyond `i64` and
/// fractional ids survive. Other JSON values are held until conversion so the
/// failure can name the field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireId {
    Number(serde_json::Number),
    Text(String),
    Unsupported(serde_json::Value),
}

/// Task record as sent by the store.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireTask {
    pub(crate) id: WireId,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) completed: bool,
    pub(crate) created_at: String,
    pub(crate) updated_at: Option<String>,
    pub(crate) due_date: String,
    pub(crate) priority: Option<String>,
    pub(crate) recurring: Option<WireRecurrence>,
    pub(crate) image_url: Option<String>,
}

/// Recurrence block, passed through in both directions.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireRecurrence {
    #[serde(default)]
    pub(crate) is_recurring: bool,
    pub(crate) frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) days_of_week: Option<Vec<u8>>,
}

/// Body of `POST /tasks`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTaskBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    priority: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
    recurring: WireRecurrence,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
}

/// Body of `PUT /tasks/{id}`. Absent fields are omitted; cleared fields are
/// sent as `null`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTaskBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurring: Option<WireRecurrence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<Option<&'a str>>,
}

impl<'a> CreateTaskBody<'a> {
    pub(crate) fn from_input(input: &'a NewTask) -> Self {
        Self {
            title: input.title(),
            description: input.description(),
            priority: input.priority().as_str(),
            due_date: input.due_date().map(format_timestamp),
            recurring: WireRecurrence::from_domain(input.recurrence()),
            image_url: input.image_url(),
        }
    }
}

impl<'a> UpdateTaskBody<'a> {
    pub(crate) fn from_changes(changes: &'a TaskChanges) -> Self {
        Self {
            title: changes.title(),
            description: changes.description(),
            completed: changes.completed(),
            due_date: changes.due_date().map(format_timestamp),
            priority: changes.priority().map(Priority::as_str),
            recurring: changes.recurrence().map(WireRecurrence::from_domain),
            image_url: changes.image_url(),
        }
    }
}

impl WireRecurrence {
    fn from_domain(recurrence: &Recurrence) -> Self {
        let days = recurrence.days_of_week();
        Self {
            is_recurring: recurrence.is_recurring(),
            frequency: recurrence.frequency().map(|frequency| frequency.as_str().to_owned()),
            days_of_week: (recurrence.frequency() == Some(Frequency::Weekly))
                .then(|| days.indices()),
        }
    }

    fn into_domain(self) -> GatewayResult<Recurrence> {
        let frequency = self
            .frequency
            .as_deref()
            .map(Frequency::try_from)
            .transpose()
            .map_err(|err| GatewayError::format(format!("field `recurring.frequency`: {err}")))?;
        let days = DaysOfWeek::from_indices(self.days_of_week.unwrap_or_default())
            .map_err(|err| GatewayError::format(format!("field `recurring.daysOfWeek`: {err}")))?;
        Ok(Recurrence::from_parts(self.is_recurring, frequency, days))
    }
}

impl WireTask {
    pub(crate) fn into_task(self) -> GatewayResult<Task> {
        let id = match self.id {
            WireId::Number(number) => TaskId::new(number.to_string()),
            WireId::Text(text) => TaskId::new(text),
            WireId::Unsupported(value) => {
                return Err(GatewayError::format(format!(
                    "field `id`: expected a string or number, got {value}"
                )));
            }
        }
        .map_err(|err| GatewayError::format(format!("field `id`: {err}")))?;

        let priority = self
            .priority
            .as_deref()
            .map(Priority::try_from)
            .transpose()
            .map_err(|err| GatewayError::format(format!("field `priority`: {err}")))?
            .unwrap_or_default();

        let recurrence = self
            .recurring
            .map(WireRecurrence::into_domain)
            .transpose()?
            .unwrap_or_else(Recurrence::none);

        let updated_at = self
            .updated_at
            .as_deref()
            .map(|value| parse_timestamp("updatedAt", value))
            .transpose()?;

        Ok(Task::from_stored(StoredTaskData {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: parse_timestamp("createdAt", &self.created_at)?,
            updated_at,
            due_date: parse_timestamp("dueDate", &self.due_date)?,
            priority,
            recurrence,
            image_url: self.image_url.filter(|url| !url.is_empty()),
        }))
    }
}

/// Formats a timestamp the way the store expects (`2024-05-01T09:30:00.000Z`).
pub(crate) fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 timestamp; a value without offset is read as UTC.
pub(crate) fn parse_timestamp(field: &str, value: &str) -> GatewayResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| GatewayError::format(format!("field `{field}` is not a timestamp: {value}")))
}

fn decode<T>(body: &str) -> GatewayResult<Envelope<T>>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str(body)
        .map_err(|err| GatewayError::format(format!("response is not a valid envelope: {err}")))
}

fn ensure_not_rejected<T>(envelope: &Envelope<T>) -> GatewayResult<()> {
    if envelope.success == Some(false) {
        return Err(GatewayError::rejected(failure_text(envelope)));
    }
    Ok(())
}

fn failure_text<T>(envelope: &Envelope<T>) -> String {
    envelope
        .message
        .clone()
        .or_else(|| envelope.error.clone())
        .unwrap_or_else(|| "store reported failure".to_owned())
}

/// Decodes `GET /tasks`, preserving store order.
pub(crate) fn decode_task_list(body: &str) -> GatewayResult<Vec<Task>> {
    let envelope: Envelope<TaskListData> = decode(body)?;
    ensure_not_rejected(&envelope)?;
    let data = envelope
        .data
        .ok_or_else(|| GatewayError::format("response is missing `data`"))?;
    let tasks = data
        .tasks
        .ok_or_else(|| GatewayError::format("response is missing `data.tasks`"))?;
    tasks.into_iter().map(WireTask::into_task).collect()
}

/// Decodes a single-task response.
pub(crate) fn decode_single_task(body: &str) -> GatewayResult<Task> {
    let envelope: Envelope<WireTask> = decode(body)?;
    ensure_not_rejected(&envelope)?;
    envelope
        .data
        .ok_or_else(|| GatewayError::format("response is missing `data`"))?
        .into_task()
}

/// Decodes `DELETE /tasks/{id}`, which must report success explicitly.
pub(crate) fn decode_deletion(body: &str) -> GatewayResult<()> {
    let envelope: Envelope<serde_json::Value> = decode(body)?;
    match envelope.success {
        Some(true) => Ok(()),
        Some(false) => Err(GatewayError::rejected(failure_text(&envelope))),
        None => Err(GatewayError::format("response is missing `success`")),
    }
}

/// Extracts a human-readable message from an error response body.
pub(crate) fn rejection_message(body: &str) -> Option<String> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(body).ok()?;
    envelope.message.or(envelope.error)
}
