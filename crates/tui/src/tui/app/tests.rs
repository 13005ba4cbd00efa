use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;
use crate::tui::forms::AuthMode;

// Port 9 (discard) is not listening, so any request fails fast with a
// network error; nothing in these tests depends on a live server.
fn app_in_temp_dir() -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::discover(
        Some(String::from("http://127.0.0.1:9")),
        Some(dir.path().to_path_buf()),
    )
    .unwrap();
    let app = App::new(config).unwrap();
    (app, dir)
}

fn logged_in_app() -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::discover(
        Some(String::from("http://127.0.0.1:9")),
        Some(dir.path().to_path_buf()),
    )
    .unwrap();
    SessionStore::new(&config).save("token-de-prueba").unwrap();
    let app = App::new(config).unwrap();
    (app, dir)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn starts_on_the_login_screen_without_a_token() {
    let (app, _guard) = app_in_temp_dir();
    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.login.mode, AuthMode::Login);
}

#[test]
fn starts_on_the_board_with_a_stored_token() {
    let (app, _guard) = logged_in_app();
    assert_eq!(app.screen, Screen::Board);
    // The initial fetch failed; the cache stays empty and the load error
    // is surfaced.
    assert!(app.board.tasks().is_empty());
    assert_eq!(app.board.error(), Some("No se pudieron cargar las tareas"));
}

#[test]
fn tabs_cover_the_all_sentinel_and_every_status() {
    let tabs = status_tabs();
    let queries: Vec<TaskQuery> = tabs.iter().map(|tab| tab.query.clone()).collect();
    assert_eq!(
        queries,
        vec![
            TaskQuery::All,
            TaskQuery::Status(TaskStatus::Pending),
            TaskQuery::Status(TaskStatus::InProgress),
            TaskQuery::Status(TaskStatus::Completed),
        ]
    );
}

#[test]
fn login_screen_toggles_register_mode() {
    let (mut app, _guard) = app_in_temp_dir();

    app.on_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
        .unwrap();
    assert_eq!(app.login.mode, AuthMode::Register);

    app.on_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
        .unwrap();
    assert_eq!(app.login.mode, AuthMode::Login);
}

#[test]
fn login_requires_its_fields_before_any_request() {
    let (mut app, _guard) = app_in_temp_dir();

    app.on_key(key(KeyCode::Enter)).unwrap();
    assert_eq!(app.login.error.as_deref(), Some("El correo es obligatorio"));
    assert_eq!(app.screen, Screen::Login);
}

#[test]
fn create_modal_opens_and_cancels() {
    let (mut app, _guard) = logged_in_app();

    app.on_key(key(KeyCode::Char('a'))).unwrap();
    assert!(app.modal.is_open());
    assert_eq!(app.input_mode, InputMode::Modal);

    app.on_key(key(KeyCode::Esc)).unwrap();
    assert!(!app.modal.is_open());
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn create_modal_blocks_an_empty_title_before_submitting() {
    let (mut app, _guard) = logged_in_app();

    app.on_key(key(KeyCode::Char('a'))).unwrap();
    app.on_key(key(KeyCode::Enter)).unwrap();

    // Validation failed client-side: the modal stays open with the field
    // error, and nothing was sent.
    assert!(app.modal.is_open());
    let form = app.modal.form().unwrap();
    assert_eq!(form.error.as_deref(), Some("El título es obligatorio"));
}

#[test]
fn failed_create_closes_the_modal_and_records_the_category_error() {
    let (mut app, _guard) = logged_in_app();

    app.on_key(key(KeyCode::Char('a'))).unwrap();
    for ch in "Comprar leche".chars() {
        app.on_key(key(KeyCode::Char(ch))).unwrap();
    }
    app.on_key(key(KeyCode::Enter)).unwrap();

    assert!(!app.modal.is_open());
    assert!(app.board.tasks().is_empty());
    assert_eq!(app.board.error(), Some("No se pudo crear la tarea"));
}

#[test]
fn search_mode_opens_and_cancels_without_touching_the_query() {
    let (mut app, _guard) = logged_in_app();

    app.on_key(key(KeyCode::Char('/'))).unwrap();
    assert_eq!(app.input_mode, InputMode::Search);
    for ch in "leche".chars() {
        app.on_key(key(KeyCode::Char(ch))).unwrap();
    }
    app.on_key(key(KeyCode::Esc)).unwrap();

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.board.query(), &TaskQuery::All);
}

#[test]
fn actions_on_an_empty_board_do_not_crash() {
    let (mut app, _guard) = logged_in_app();

    app.on_key(key(KeyCode::Char('e'))).unwrap();
    assert!(!app.modal.is_open());

    app.on_key(key(KeyCode::Char('n'))).unwrap();
    app.on_key(key(KeyCode::Char('x'))).unwrap();
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn logout_returns_to_the_login_screen_and_clears_the_token() {
    let (mut app, _guard) = logged_in_app();
    assert!(app.session.is_logged_in());

    app.on_key(key(KeyCode::Char('c'))).unwrap();

    assert_eq!(app.screen, Screen::Login);
    assert!(!app.session.is_logged_in());
    assert!(app.board.tasks().is_empty());
}

#[test]
fn confirm_choice_toggles_between_yes_and_no() {
    assert_eq!(ConfirmChoice::No.toggle(), ConfirmChoice::Yes);
    assert_eq!(ConfirmChoice::Yes.toggle(), ConfirmChoice::No);
}

#[test]
fn help_overlay_opens_and_closes() {
    let (mut app, _guard) = logged_in_app();

    app.on_key(key(KeyCode::Char('h'))).unwrap();
    assert_eq!(app.input_mode, InputMode::Help);

    app.on_key(key(KeyCode::Esc)).unwrap();
    assert_eq!(app.input_mode, InputMode::Normal);
}
