use tracing::warn;

use crate::api::TaskApi;
use crate::error::ClientError;
use crate::model::{Task, TaskDraft, TaskPatch, TaskQuery};

const LOAD_ERROR: &str = "No se pudieron cargar las tareas";
const CREATE_ERROR: &str = "No se pudo crear la tarea";
const EDIT_ERROR: &str = "No se pudo editar la tarea";
const STATUS_ERROR: &str = "No se pudo actualizar el estado";
const DELETE_ERROR: &str = "No se pudo eliminar la tarea";

/// In-memory view of the server's task list.
///
/// The cache is replaced wholesale by every fetch and patched one entry at
/// a time after create/update/delete; a failed operation leaves it exactly
/// as it was. At most one error message is surfaced at a time, and the
/// next successful operation clears it.
#[derive(Debug)]
pub struct TaskBoard<A> {
    api: A,
    tasks: Vec<Task>,
    query: TaskQuery,
    error: Option<String>,
}

impl<A: TaskApi> TaskBoard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            query: TaskQuery::All,
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn query(&self) -> &TaskQuery {
        &self.query
    }

    /// The last operation's user-facing error, until something succeeds.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Refetch the active query, replacing the whole cache on success. On
    /// failure the previous cache survives and a load error is recorded.
    pub fn refresh(&mut self) -> bool {
        match self.api.list(&self.query) {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
                true
            }
            Err(err) => {
                self.record_error(LOAD_ERROR, err);
                false
            }
        }
    }

    /// Switch the active filter/search and refetch.
    pub fn set_query(&mut self, query: TaskQuery) -> bool {
        self.query = query;
        self.refresh()
    }

    /// Drop all local state, used when the session ends.
    pub fn reset(&mut self) {
        self.tasks.clear();
        self.query = TaskQuery::All;
        self.error = None;
    }

    /// Create a task and append the server's representation to the cache.
    pub fn create(&mut self, draft: &TaskDraft) -> bool {
        match self.api.create(draft) {
            Ok(task) => {
                self.tasks.push(task);
                self.error = None;
                true
            }
            Err(err) => {
                self.record_error(CREATE_ERROR, err);
                false
            }
        }
    }

    /// Update title/description/due date, replacing the cached entry with
    /// the server's returned representation.
    pub fn edit_fields(&mut self, id: &str, patch: &TaskPatch) -> bool {
        match self.api.update(id, patch) {
            Ok(task) => {
                self.replace(task);
                self.error = None;
                true
            }
            Err(err) => {
                self.record_error(EDIT_ERROR, err);
                false
            }
        }
    }

    /// Advance the cached task one step through the workflow. Terminal or
    /// unknown tasks are left untouched; the interface never offers the
    /// action for them.
    pub fn advance_status(&mut self, id: &str) -> bool {
        let Some(next) = self.task(id).and_then(|task| task.status.next()) else {
            return false;
        };
        match self.api.update(id, &TaskPatch::status(next)) {
            Ok(task) => {
                self.replace(task);
                self.error = None;
                true
            }
            Err(err) => {
                self.record_error(STATUS_ERROR, err);
                false
            }
        }
    }

    /// Delete the task server-side and drop the cached entry.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.api.delete(id) {
            Ok(()) => {
                self.tasks.retain(|task| task.id != id);
                self.error = None;
                true
            }
            Err(err) => {
                self.record_error(DELETE_ERROR, err);
                false
            }
        }
    }

    fn replace(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == updated.id) {
            *slot = updated;
        }
    }

    fn record_error(&mut self, category: &str, err: ClientError) {
        warn!(target: "tareas::board", error = %err, "{}", category);
        self.error = Some(category.to_string());
    }
}
