use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::AppConfig;
use crate::error::{ClientError, Result};
use crate::model::{Task, TaskDraft, TaskPatch, TaskQuery};
use crate::session::SessionStore;

/// Remote operations the dashboard needs. The trait keeps the board
/// testable against an in-memory double.
pub trait TaskApi {
    /// Fetch the task list, ordered as the server orders it.
    fn list(&self, query: &TaskQuery) -> Result<Vec<Task>>;
    /// Create a task; the server assigns id and initial status.
    fn create(&self, draft: &TaskDraft) -> Result<Task>;
    /// Update a subset of fields, returning the full updated task.
    fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task>;
    /// Delete a task by id.
    fn delete(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

// Create and update responses wrap the task in an envelope.
#[derive(Debug, Deserialize)]
struct TaskEnvelope {
    task: Task,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Blocking HTTP implementation of [`TaskApi`] plus the two auth calls.
///
/// The session store is injected at construction; every task request reads
/// the current token from it. A missing token is passed through rather than
/// pre-validated: the server is the source of truth for authorization.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: SessionStore) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base: config.api_url().clone(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// POST /api/auth/login, returning the bearer token.
    pub fn login(&self, email: &str, password: &str) -> Result<String> {
        debug!(target: "tareas::api", email, "POST /api/auth/login");
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .http
            .post(self.endpoint("/api/auth/login"))
            .json(&body)
            .send()?;
        Ok(decode::<TokenResponse>(response)?.token)
    }

    /// POST /api/auth/register, returning the bearer token for the fresh
    /// account.
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<String> {
        debug!(target: "tareas::api", email, "POST /api/auth/register");
        let body = serde_json::json!({ "name": name, "email": email, "password": password });
        let response = self
            .http
            .post(self.endpoint("/api/auth/register"))
            .json(&body)
            .send()?;
        Ok(decode::<TokenResponse>(response)?.token)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base.as_str().trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.load() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl TaskApi for ApiClient {
    fn list(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        debug!(target: "tareas::api", ?query, "GET /tasks");
        let mut request = self.http.get(self.endpoint("/tasks"));
        if let Some((key, value)) = query.query_pair() {
            request = request.query(&[(key, value.as_str())]);
        }
        let response = self.authorized(request).send()?;
        decode(response)
    }

    fn create(&self, draft: &TaskDraft) -> Result<Task> {
        debug!(target: "tareas::api", title = %draft.title, "POST /tasks");
        let request = self.http.post(self.endpoint("/tasks")).json(draft);
        let response = self.authorized(request).send()?;
        Ok(decode::<TaskEnvelope>(response)?.task)
    }

    fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        debug!(target: "tareas::api", id, "PUT /tasks/:id");
        let request = self
            .http
            .put(format!("{}/{}", self.endpoint("/tasks"), id))
            .json(patch);
        let response = self.authorized(request).send()?;
        Ok(decode::<TaskEnvelope>(response)?.task)
    }

    fn delete(&self, id: &str) -> Result<()> {
        debug!(target: "tareas::api", id, "DELETE /tasks/:id");
        let request = self.http.delete(format!("{}/{}", self.endpoint("/tasks"), id));
        let response = self.authorized(request).send()?;
        check(response)?;
        Ok(())
    }
}

fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ClientError::Api {
        status,
        message: error_message(status, &body),
    })
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check(response)?;
    Ok(response.json::<T>()?)
}

// The server reports failures as `{"message": …}`; fall back to the raw
// body, then to the canonical status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.message.is_empty() {
            return parsed.message;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn client_for(base: &str) -> (ApiClient, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::from_parts(
            Url::parse(base).unwrap(),
            dir.path().to_path_buf(),
        );
        let session = SessionStore::new(&config);
        let client = ApiClient::new(&config, session).unwrap();
        (client, dir)
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let (with_slash, _g1) = client_for("http://localhost:5000/");
        let (without, _g2) = client_for("http://localhost:5000");

        assert_eq!(with_slash.endpoint("/tasks"), "http://localhost:5000/tasks");
        assert_eq!(without.endpoint("/tasks"), "http://localhost:5000/tasks");
    }

    #[test]
    fn error_message_reads_the_json_body() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"Token inválido"}"#),
            "Token inválido"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, "plain text failure"),
            "plain text failure"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, ""),
            "Not Found"
        );
    }

    #[test]
    fn token_response_uses_the_flat_shape() {
        let parsed: TokenResponse = serde_json::from_str(r#"{"token":"abc123"}"#).unwrap();
        assert_eq!(parsed.token, "abc123");

        // The nested {message:{token}} dialect is deliberately not parsed.
        assert!(serde_json::from_str::<TokenResponse>(r#"{"message":{"token":"abc123"}}"#)
            .is_err());
    }

    #[test]
    fn task_envelope_unwraps_the_task() {
        let parsed: TaskEnvelope = serde_json::from_str(
            r#"{"task":{"id":"1","title":"Comprar leche","status":"pendiente"}}"#,
        )
        .unwrap();
        assert_eq!(parsed.task.title, "Comprar leche");
    }

    #[test]
    fn unreachable_server_surfaces_a_network_error() {
        // Port 9 (discard) is not listening; the connect fails fast.
        let (client, _guard) = client_for("http://127.0.0.1:9");
        let result = client.list(&TaskQuery::All);
        assert!(matches!(result, Err(ClientError::Network(_))));
    }
}
