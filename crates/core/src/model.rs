use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ClientError;

/// Workflow position of a task. The server speaks Spanish on the wire;
/// transitions only ever move forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "en progreso")]
    InProgress,
    #[serde(rename = "completada")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Wire value, as the server stores and filters it.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pendiente",
            TaskStatus::InProgress => "en progreso",
            TaskStatus::Completed => "completada",
        }
    }

    /// The single forward transition, or `None` once the workflow ended.
    pub fn next(&self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Pending => Some(TaskStatus::InProgress),
            TaskStatus::InProgress => Some(TaskStatus::Completed),
            TaskStatus::Completed => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pendiente" | "pending" => Ok(TaskStatus::Pending),
            "en progreso" | "en_progreso" | "in_progress" => Ok(TaskStatus::InProgress),
            "completada" | "completed" => Ok(TaskStatus::Completed),
            other => Err(anyhow!(
                "Unknown status '{}': expected pendiente|en progreso|completada",
                other
            )),
        }
    }
}

/// Dashboard actions that can be offered for a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Advance,
    Delete,
}

/// Which actions the dashboard offers for a task in the given status.
/// Completed tasks are terminal: no edit, no further transition.
pub fn allowed_actions(status: TaskStatus) -> &'static [Action] {
    match status {
        TaskStatus::Pending | TaskStatus::InProgress => &[Action::Edit, Action::Advance],
        TaskStatus::Completed => &[Action::Delete],
    }
}

/// A task as the server returns it. The cache holds these verbatim; the
/// client never invents or recomputes fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
}

// Some deployments return the due date as a full ISO datetime; only the
// calendar date matters to this client.
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => {
            let date_part = value.get(..10).unwrap_or(value);
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

/// Payload for creating a task. The server assigns the id and the initial
/// `pendiente` status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Input-time validation: the title is required and the due date may
    /// not fall before the day the task is created. Never re-validated
    /// once stored.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ClientError> {
        if self.title.trim().is_empty() {
            return Err(ClientError::Validation(String::from(
                "El título es obligatorio",
            )));
        }
        if let Some(due) = self.due_date {
            if due < today {
                return Err(ClientError::Validation(String::from(
                    "La fecha límite no puede ser anterior a hoy",
                )));
            }
        }
        Ok(())
    }
}

/// Partial update; `None` fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Field edit: title, description and due date. An empty description
    /// is sent as such so the server clears it.
    pub fn fields(title: String, description: String, due_date: Option<NaiveDate>) -> Self {
        Self {
            title: Some(title),
            description: Some(description),
            due_date,
            status: None,
        }
    }

    /// Status-only update, used by the advance buttons.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// What the dashboard asks the server for. At most one criterion per call:
/// a status filter or a free-text search, never both. `All` is the "todas"
/// sentinel and sends no parameter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskQuery {
    #[default]
    All,
    Status(TaskStatus),
    Search(String),
}

impl TaskQuery {
    /// The single query parameter to append, if any.
    pub fn query_pair(&self) -> Option<(&'static str, String)> {
        match self {
            TaskQuery::All => None,
            TaskQuery::Status(status) => Some(("status", status.as_str().to_string())),
            TaskQuery::Search(term) => Some(("search", term.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn status_round_trips_through_wire_values() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            let back: TaskStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"en progreso\""
        );
    }

    #[test]
    fn status_advances_forward_only() {
        assert_eq!(TaskStatus::Pending.next(), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::InProgress.next(), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::Completed.next(), None);
    }

    #[test]
    fn status_from_str_accepts_both_spellings() {
        assert_eq!(
            "en progreso".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            "in_progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert!("cancelada".parse::<TaskStatus>().is_err());
    }

    #[rstest]
    #[case(TaskStatus::Pending, &[Action::Edit, Action::Advance])]
    #[case(TaskStatus::InProgress, &[Action::Edit, Action::Advance])]
    #[case(TaskStatus::Completed, &[Action::Delete])]
    fn allowed_actions_match_workflow(#[case] status: TaskStatus, #[case] expected: &[Action]) {
        assert_eq!(allowed_actions(status), expected);
    }

    #[test]
    fn task_decodes_datetime_due_dates() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": "64f1c0aa",
                "title": "Comprar leche",
                "description": null,
                "dueDate": "2025-01-10T00:00:00.000Z",
                "status": "pendiente",
                "owner": "ignored-field"
            }"#,
        )
        .unwrap();

        assert_eq!(task.due_date, Some(date("2025-01-10")));
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.description, None);
    }

    #[test]
    fn task_tolerates_missing_optional_fields() {
        let task: Task =
            serde_json::from_str(r#"{"id": "1", "title": "Sin extras", "status": "completada"}"#)
                .unwrap();

        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn draft_requires_a_title() {
        let draft = TaskDraft {
            title: String::from("   "),
            ..TaskDraft::default()
        };
        assert!(draft.validate(date("2025-01-01")).is_err());
    }

    #[test]
    fn draft_rejects_past_due_dates() {
        let draft = TaskDraft {
            title: String::from("Pagar alquiler"),
            description: None,
            due_date: Some(date("2024-12-31")),
        };
        assert!(draft.validate(date("2025-01-01")).is_err());
        assert!(draft.validate(date("2024-12-31")).is_ok());
    }

    #[test]
    fn draft_serializes_without_empty_fields() {
        let draft = TaskDraft {
            title: String::from("Comprar leche"),
            description: None,
            due_date: None,
        };
        assert_eq!(
            serde_json::to_string(&draft).unwrap(),
            r#"{"title":"Comprar leche"}"#
        );
    }

    #[test]
    fn patch_serializes_only_the_given_fields() {
        let patch = TaskPatch::status(TaskStatus::Completed);
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"status":"completada"}"#
        );

        let patch = TaskPatch::fields(String::from("Título"), String::new(), None);
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"title":"Título","description":""}"#
        );
    }

    #[rstest]
    #[case(TaskQuery::All, None)]
    #[case(TaskQuery::Status(TaskStatus::Pending), Some(("status", "pendiente")))]
    #[case(TaskQuery::Search("leche".into()), Some(("search", "leche")))]
    fn query_sends_at_most_one_parameter(
        #[case] query: TaskQuery,
        #[case] expected: Option<(&str, &str)>,
    ) {
        let pair = query.query_pair();
        assert_eq!(pair.as_ref().map(|(k, v)| (*k, v.as_str())), expected);
    }
}
