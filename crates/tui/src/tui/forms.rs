use chrono::NaiveDate;

use crate::tui::buffer::TextBuffer;
use tareas_core::model::{Task, TaskDraft, TaskPatch};

/// Which authentication operation the login screen submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub(crate) fn toggle(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Iniciar Sesión",
            AuthMode::Register => "Registro",
        }
    }

    pub(crate) fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Entrar",
            AuthMode::Register => "Registrarse",
        }
    }

    pub(crate) fn switch_hint(&self) -> &'static str {
        match self {
            AuthMode::Login => "¿No tienes cuenta? Ctrl+R para registrarte",
            AuthMode::Register => "¿Ya tienes cuenta? Ctrl+R para iniciar sesión",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoginField {
    Name,
    Email,
    Password,
}

impl LoginField {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            LoginField::Name => "Nombre",
            LoginField::Email => "Correo",
            LoginField::Password => "Contraseña",
        }
    }
}

/// State behind the login/register screen. The name field only exists in
/// register mode.
#[derive(Debug)]
pub(crate) struct LoginForm {
    pub(crate) mode: AuthMode,
    pub(crate) name: TextBuffer,
    pub(crate) email: TextBuffer,
    pub(crate) password: TextBuffer,
    pub(crate) focus: LoginField,
    pub(crate) error: Option<String>,
}

impl LoginForm {
    pub(crate) fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            name: TextBuffer::new(),
            email: TextBuffer::new(),
            password: TextBuffer::new(),
            focus: LoginField::Email,
            error: None,
        }
    }

    pub(crate) fn fields(&self) -> &'static [LoginField] {
        match self.mode {
            AuthMode::Login => &[LoginField::Email, LoginField::Password],
            AuthMode::Register => &[LoginField::Name, LoginField::Email, LoginField::Password],
        }
    }

    pub(crate) fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        if self.mode == AuthMode::Login && self.focus == LoginField::Name {
            self.focus = LoginField::Email;
        }
        self.error = None;
    }

    pub(crate) fn focus_next(&mut self) {
        self.shift_focus(1);
    }

    pub(crate) fn focus_prev(&mut self) {
        self.shift_focus(-1);
    }

    fn shift_focus(&mut self, step: isize) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let len = fields.len() as isize;
        let next = (current as isize + step).rem_euclid(len);
        self.focus = fields[next as usize];
    }

    pub(crate) fn buffer(&self, field: LoginField) -> &TextBuffer {
        match field {
            LoginField::Name => &self.name,
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    pub(crate) fn active_buffer(&mut self) -> &mut TextBuffer {
        match self.focus {
            LoginField::Name => &mut self.name,
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    /// Required-field check, mirroring the browser form's `required`
    /// attributes. Returns the first missing field's message.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.mode == AuthMode::Register && self.name.as_str().trim().is_empty() {
            return Err(String::from("El nombre es obligatorio"));
        }
        if self.email.as_str().trim().is_empty() {
            return Err(String::from("El correo es obligatorio"));
        }
        if self.password.as_str().trim().is_empty() {
            return Err(String::from("La contraseña es obligatoria"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum FormField {
    #[default]
    Title,
    Description,
    DueDate,
}

impl FormField {
    pub(crate) const ALL: [FormField; 3] =
        [FormField::Title, FormField::Description, FormField::DueDate];

    pub(crate) fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Título",
            FormField::Description => "Descripción",
            FormField::DueDate => "Fecha límite (AAAA-MM-DD)",
        }
    }
}

/// Input state for the create/edit modal.
#[derive(Debug, Default)]
pub(crate) struct TaskForm {
    pub(crate) title: TextBuffer,
    pub(crate) description: TextBuffer,
    pub(crate) due_date: TextBuffer,
    pub(crate) focus: FormField,
    pub(crate) error: Option<String>,
}

impl TaskForm {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_task(task: &Task) -> Self {
        let mut form = Self::default();
        form.title.set(task.title.clone());
        if let Some(description) = &task.description {
            form.description.set(description.clone());
        }
        if let Some(due) = task.due_date {
            form.due_date.set(due.format("%Y-%m-%d").to_string());
        }
        form
    }

    pub(crate) fn buffer(&self, field: FormField) -> &TextBuffer {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::DueDate => &self.due_date,
        }
    }

    pub(crate) fn active_buffer(&mut self) -> &mut TextBuffer {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::DueDate => &mut self.due_date,
        }
    }

    pub(crate) fn focus_next(&mut self) {
        self.shift_focus(1);
    }

    pub(crate) fn focus_prev(&mut self) {
        self.shift_focus(-1);
    }

    fn shift_focus(&mut self, step: isize) {
        let current = FormField::ALL
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        let len = FormField::ALL.len() as isize;
        let next = (current as isize + step).rem_euclid(len);
        self.focus = FormField::ALL[next as usize];
    }

    /// Parse and validate into the create payload. The due date may not
    /// fall before `today`, matching the date input's minimum.
    pub(crate) fn draft(&self, today: NaiveDate) -> Result<TaskDraft, String> {
        let due_date = self.parse_due_date()?;
        let description = self.description.as_str().trim();
        let draft = TaskDraft {
            title: self.title.as_str().trim().to_string(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            due_date,
        };
        draft.validate(today).map_err(|err| err.to_string())?;
        Ok(draft)
    }

    /// Same validation, shaped as a field update for the edit modal.
    pub(crate) fn patch(&self, today: NaiveDate) -> Result<TaskPatch, String> {
        let draft = self.draft(today)?;
        Ok(TaskPatch::fields(
            draft.title,
            self.description.as_str().trim().to_string(),
            draft.due_date,
        ))
    }

    fn parse_due_date(&self) -> Result<Option<NaiveDate>, String> {
        let raw = self.due_date.as_str().trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| String::from("Fecha límite inválida (AAAA-MM-DD)"))
    }
}

/// The dashboard shows at most one modal at a time; the variant carries
/// everything that modal needs.
#[derive(Debug, Default)]
pub(crate) enum ModalState {
    #[default]
    Closed,
    Creating(TaskForm),
    Editing {
        id: String,
        form: TaskForm,
    },
}

impl ModalState {
    pub(crate) fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            ModalState::Closed => "",
            ModalState::Creating(_) => "Nueva Tarea",
            ModalState::Editing { .. } => "Editar Tarea",
        }
    }

    pub(crate) fn form(&self) -> Option<&TaskForm> {
        match self {
            ModalState::Closed => None,
            ModalState::Creating(form) => Some(form),
            ModalState::Editing { form, .. } => Some(form),
        }
    }

    pub(crate) fn form_mut(&mut self) -> Option<&mut TaskForm> {
        match self {
            ModalState::Closed => None,
            ModalState::Creating(form) => Some(form),
            ModalState::Editing { form, .. } => Some(form),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use tareas_core::model::TaskStatus;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn draft_parses_the_due_date_field() {
        let mut form = TaskForm::empty();
        form.title.set("Comprar leche");
        form.due_date.set("2025-01-10");

        let draft = form.draft(date("2025-01-01")).unwrap();
        assert_eq!(draft.due_date, Some(date("2025-01-10")));
        assert_eq!(draft.description, None);
    }

    #[test]
    fn draft_rejects_garbled_dates_and_past_dates() {
        let mut form = TaskForm::empty();
        form.title.set("Comprar leche");

        form.due_date.set("10/01/2025");
        assert_eq!(
            form.draft(date("2025-01-01")).unwrap_err(),
            "Fecha límite inválida (AAAA-MM-DD)"
        );

        form.due_date.set("2024-12-31");
        assert_eq!(
            form.draft(date("2025-01-01")).unwrap_err(),
            "La fecha límite no puede ser anterior a hoy"
        );
    }

    #[test]
    fn patch_always_carries_the_description_so_it_can_be_cleared() {
        let mut form = TaskForm::empty();
        form.title.set("Comprar leche");

        let patch = form.patch(date("2025-01-01")).unwrap();
        assert_eq!(patch.description.as_deref(), Some(""));
        assert_eq!(patch.status, None);
    }

    #[test]
    fn from_task_prefills_every_field() {
        let task = Task {
            id: String::from("1"),
            title: String::from("Comprar leche"),
            description: Some(String::from("entera")),
            due_date: Some(date("2025-01-10")),
            status: TaskStatus::Pending,
        };

        let form = TaskForm::from_task(&task);
        assert_eq!(form.title.as_str(), "Comprar leche");
        assert_eq!(form.description.as_str(), "entera");
        assert_eq!(form.due_date.as_str(), "2025-01-10");
    }

    #[test]
    fn login_focus_cycles_through_the_mode_fields() {
        let mut form = LoginForm::new();
        assert_eq!(form.focus, LoginField::Email);

        form.focus_next();
        assert_eq!(form.focus, LoginField::Password);
        form.focus_next();
        assert_eq!(form.focus, LoginField::Email);

        form.toggle_mode();
        assert_eq!(form.fields().len(), 3);
        form.focus_prev();
        assert_eq!(form.focus, LoginField::Name);
    }

    #[test]
    fn leaving_register_mode_moves_focus_off_the_name_field() {
        let mut form = LoginForm::new();
        form.toggle_mode();
        form.focus = LoginField::Name;

        form.toggle_mode();
        assert_eq!(form.focus, LoginField::Email);
    }
}
