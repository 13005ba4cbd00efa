use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);

pub(crate) const STATUS_ENTER_SEARCH: &str = "Buscar tareas — Enter busca · Esc cancela";
pub(crate) const STATUS_MODAL_CREATE: &str =
    "Nueva tarea — Tab cambia de campo · Enter guarda · Esc cancela";
pub(crate) const STATUS_MODAL_EDIT: &str =
    "Editar tarea — Tab cambia de campo · Enter guarda · Esc cancela";
pub(crate) const STATUS_CONFIRM_DELETE: &str =
    "Confirmar eliminación — ←/→ elige · Enter confirma · Esc cancela";
pub(crate) const STATUS_HELP: &str = "Atajos de teclado — Enter/Esc para cerrar";
pub(crate) const STATUS_REFRESHED: &str = "Tareas recargadas";
pub(crate) const STATUS_NOTHING_SELECTED: &str = "No hay ninguna tarea seleccionada";
pub(crate) const STATUS_EDIT_COMPLETED: &str = "Una tarea completada ya no se puede editar";
pub(crate) const STATUS_DELETE_ONLY_COMPLETED: &str =
    "Solo las tareas completadas se pueden eliminar";
pub(crate) const STATUS_DELETE_CANCELLED: &str = "Eliminación cancelada";

pub(crate) const EMPTY_LIST: &str = "No hay tareas disponibles.";
