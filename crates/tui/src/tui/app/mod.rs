use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use ratatui::style::{Color, Style};
use ratatui::widgets::TableState;

use super::buffer::TextBuffer;
use super::constants::*;
use super::forms::{AuthMode, LoginForm, ModalState, TaskForm};
use crate::config::AppConfig;
use tareas_core::api::ApiClient;
use tareas_core::model::{allowed_actions, Action, Task, TaskQuery, TaskStatus};
use tareas_core::services::TaskBoard;
use tareas_core::session::SessionStore;

mod input;
mod render;
#[cfg(test)]
mod tests;

/// One entry in the status tab row. `Todas` is the sentinel that sends no
/// filter at all.
#[derive(Debug, Clone)]
struct StatusTab {
    label: &'static str,
    query: TaskQuery,
}

impl StatusTab {
    fn new(label: &'static str, query: TaskQuery) -> Self {
        Self { label, query }
    }
}

fn status_tabs() -> Vec<StatusTab> {
    vec![
        StatusTab::new("Todas", TaskQuery::All),
        StatusTab::new("Pendientes", TaskQuery::Status(TaskStatus::Pending)),
        StatusTab::new("En progreso", TaskQuery::Status(TaskStatus::InProgress)),
        StatusTab::new("Completadas", TaskQuery::Status(TaskStatus::Completed)),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Login,
    Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Search,
    Modal,
    ConfirmDelete,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App {
    config: AppConfig,
    session: SessionStore,
    board: TaskBoard<ApiClient>,
    screen: Screen,
    login: LoginForm,
    tabs: Vec<StatusTab>,
    tab_index: usize,
    selected: usize,
    table_state: TableState,
    input_mode: InputMode,
    search: TextBuffer,
    modal: ModalState,
    confirm_choice: ConfirmChoice,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig) -> Result<Self> {
        let session = SessionStore::new(&config);
        let api = ApiClient::new(&config, session.clone())?;
        let board = TaskBoard::new(api);
        let screen = if session.is_logged_in() {
            Screen::Board
        } else {
            Screen::Login
        };

        let mut app = Self {
            config,
            session,
            board,
            screen,
            login: LoginForm::new(),
            tabs: status_tabs(),
            tab_index: 0,
            selected: 0,
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            search: TextBuffer::new(),
            modal: ModalState::Closed,
            confirm_choice: ConfirmChoice::No,
            status: None,
            should_quit: false,
        };
        if app.screen == Screen::Board {
            app.board.refresh();
            app.clamp_selection();
        }
        Ok(app)
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > Duration::from_secs(5) {
                self.status = None;
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.board.tasks().len();
        if len == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            if self.selected >= len {
                self.selected = len - 1;
            }
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_next(&mut self) {
        let len = self.board.tasks().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.table_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.board.tasks().is_empty() {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.table_state.select(Some(self.selected));
    }

    fn select_first(&mut self) {
        if !self.board.tasks().is_empty() {
            self.selected = 0;
            self.table_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let len = self.board.tasks().len();
        if len > 0 {
            self.selected = len - 1;
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_task_by_id(&mut self, id: &str) {
        if let Some(idx) = self.board.tasks().iter().position(|task| task.id == id) {
            self.selected = idx;
            self.table_state.select(Some(idx));
        }
    }

    fn selected_task(&self) -> Option<&Task> {
        self.board.tasks().get(self.selected)
    }

    fn next_tab(&mut self) {
        self.tab_index = (self.tab_index + 1) % self.tabs.len();
        self.apply_tab();
    }

    fn prev_tab(&mut self) {
        if self.tab_index == 0 {
            self.tab_index = self.tabs.len() - 1;
        } else {
            self.tab_index -= 1;
        }
        self.apply_tab();
    }

    fn apply_tab(&mut self) {
        let query = self.tabs[self.tab_index].query.clone();
        self.board.set_query(query);
        self.clamp_selection();
    }

    fn refresh_view(&mut self) {
        if self.board.refresh() {
            self.set_status_info(STATUS_REFRESHED);
        }
        self.clamp_selection();
    }

    // Search ---------------------------------------------------------------

    fn start_search(&mut self) {
        self.search.clear();
        self.input_mode = InputMode::Search;
        self.set_status_info(STATUS_ENTER_SEARCH);
    }

    fn submit_search(&mut self) {
        let term = self.search.as_str().trim().to_string();
        self.input_mode = InputMode::Normal;
        if term.is_empty() {
            // An empty search falls back to the unfiltered view.
            self.tab_index = 0;
            self.apply_tab();
            return;
        }
        self.board.set_query(TaskQuery::Search(term));
        self.clamp_selection();
    }

    // Modals ---------------------------------------------------------------

    fn open_create_modal(&mut self) {
        self.modal = ModalState::Creating(TaskForm::empty());
        self.input_mode = InputMode::Modal;
        self.set_status_info(STATUS_MODAL_CREATE);
    }

    fn open_edit_modal(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        if !allowed_actions(task.status).contains(&Action::Edit) {
            self.set_status_info(STATUS_EDIT_COMPLETED);
            return;
        }
        self.modal = ModalState::Editing {
            id: task.id.clone(),
            form: TaskForm::from_task(task),
        };
        self.input_mode = InputMode::Modal;
        self.set_status_info(STATUS_MODAL_EDIT);
    }

    fn cancel_modal(&mut self) {
        self.modal = ModalState::Closed;
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    fn submit_modal(&mut self) {
        match std::mem::take(&mut self.modal) {
            ModalState::Closed => {
                self.input_mode = InputMode::Normal;
            }
            ModalState::Creating(form) => match form.draft(Self::today()) {
                Ok(draft) => {
                    // The create modal closes whether or not the request
                    // lands; a failure shows on the dashboard error line.
                    self.input_mode = InputMode::Normal;
                    if self.board.create(&draft) {
                        self.set_status_info(format!("Tarea creada: {}", draft.title));
                        self.select_last();
                    }
                    self.clamp_selection();
                }
                Err(message) => {
                    let mut form = form;
                    form.error = Some(message);
                    self.modal = ModalState::Creating(form);
                }
            },
            ModalState::Editing { id, form } => match form.patch(Self::today()) {
                Ok(patch) => {
                    if self.board.edit_fields(&id, &patch) {
                        self.input_mode = InputMode::Normal;
                        self.set_status_info("Tarea actualizada");
                        self.select_task_by_id(&id);
                    } else {
                        // The edit modal stays open on failure.
                        self.modal = ModalState::Editing { id, form };
                    }
                }
                Err(message) => {
                    let mut form = form;
                    form.error = Some(message);
                    self.modal = ModalState::Editing { id, form };
                }
            },
        }
    }

    // Status workflow ------------------------------------------------------

    fn advance_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        if !allowed_actions(task.status).contains(&Action::Advance) {
            return;
        }
        let id = task.id.clone();
        if self.board.advance_status(&id) {
            let label = match self.board.task(&id).map(|t| t.status) {
                Some(TaskStatus::InProgress) => "Marcada como en progreso",
                Some(TaskStatus::Completed) => "Marcada como completada",
                _ => "Estado actualizado",
            };
            self.set_status_info(label);
            self.select_task_by_id(&id);
        }
        self.clamp_selection();
    }

    // Deletion -------------------------------------------------------------

    fn prompt_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        if !allowed_actions(task.status).contains(&Action::Delete) {
            self.set_status_info(STATUS_DELETE_ONLY_COMPLETED);
            return;
        }
        self.confirm_choice = ConfirmChoice::No;
        self.input_mode = InputMode::ConfirmDelete;
        self.set_status_info(STATUS_CONFIRM_DELETE);
    }

    fn perform_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        if self.board.remove(&id) {
            self.set_status_info("Tarea eliminada");
        }
        self.clamp_selection();
    }

    // Session --------------------------------------------------------------

    fn submit_login(&mut self) {
        if let Err(message) = self.login.validate() {
            self.login.error = Some(message);
            return;
        }

        let email = self.login.email.as_str().trim().to_string();
        let password = self.login.password.as_str().to_string();
        let result = match self.login.mode {
            AuthMode::Login => self.board.api().login(&email, &password),
            AuthMode::Register => {
                let name = self.login.name.as_str().trim().to_string();
                self.board.api().register(&name, &email, &password)
            }
        };

        match result {
            Ok(token) => {
                if let Err(err) = self.session.save(&token) {
                    self.login.error = Some(err.to_string());
                    return;
                }
                self.login = LoginForm::new();
                self.screen = Screen::Board;
                self.input_mode = InputMode::Normal;
                self.tab_index = 0;
                self.board.set_query(TaskQuery::All);
                self.clamp_selection();
                self.set_status_info(format!("Bienvenido, {}", email));
            }
            Err(err) => {
                // The auth screen shows the server's words verbatim.
                self.login.error = Some(err.auth_message());
            }
        }
    }

    fn logout(&mut self) {
        if let Err(err) = self.session.clear() {
            self.set_status_error(err.to_string());
            return;
        }
        self.board.reset();
        self.login = LoginForm::new();
        self.modal = ModalState::Closed;
        self.input_mode = InputMode::Normal;
        self.tab_index = 0;
        self.selected = 0;
        self.table_state.select(None);
        self.status = None;
        self.screen = Screen::Login;
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        self.status = Some(StatusMessage::new(message.into(), StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        self.status = Some(StatusMessage::new(message.into(), StatusKind::Error));
    }
}
