use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::constants::{STATUS_DELETE_CANCELLED, STATUS_HELP};

use super::{App, ConfirmChoice, InputMode, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum NormalAction {
    Quit,
    EnterCreate,
    EnterEdit,
    Advance,
    Delete,
    Search,
    Refresh,
    ShowHelp,
    Logout,
    SelectNext,
    SelectPrev,
    PrevTab,
    NextTab,
    SelectFirst,
    SelectLast,
}

impl NormalAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::EnterCreate),
            KeyCode::Char('e') => Some(Self::EnterEdit),
            KeyCode::Char('n') | KeyCode::Char(' ') => Some(Self::Advance),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('/') => Some(Self::Search),
            KeyCode::Char('r') => Some(Self::Refresh),
            KeyCode::Char('h') => Some(Self::ShowHelp),
            KeyCode::Char('c') => Some(Self::Logout),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Left | KeyCode::BackTab => Some(Self::PrevTab),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Self::NextTab),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.screen == Screen::Login {
            self.handle_login_key(key);
            return Ok(());
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Search => self.handle_search_mode(key),
            InputMode::Modal => self.handle_modal_mode(key),
            InputMode::ConfirmDelete => self.handle_confirm_delete_mode(key),
            InputMode::Help => self.handle_help_mode(key),
        }
        Ok(())
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => {
                self.should_quit = true;
            }
            NormalAction::EnterCreate => self.open_create_modal(),
            NormalAction::EnterEdit => self.open_edit_modal(),
            NormalAction::Advance => self.advance_selected(),
            NormalAction::Delete => self.prompt_delete(),
            NormalAction::Search => self.start_search(),
            NormalAction::Refresh => self.refresh_view(),
            NormalAction::ShowHelp => {
                self.input_mode = InputMode::Help;
                self.set_status_info(STATUS_HELP);
            }
            NormalAction::Logout => self.logout(),
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::PrevTab => self.prev_tab(),
            NormalAction::NextTab => self.next_tab(),
            NormalAction::SelectFirst => self.select_first(),
            NormalAction::SelectLast => self.select_last(),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') => {
                    self.login.toggle_mode();
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Tab | KeyCode::Down => self.login.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.login.focus_prev(),
            KeyCode::Backspace => self.login.active_buffer().backspace(),
            KeyCode::Delete => self.login.active_buffer().delete_char(),
            KeyCode::Left => self.login.active_buffer().move_left(),
            KeyCode::Right => self.login.active_buffer().move_right(),
            KeyCode::Home => self.login.active_buffer().move_home(),
            KeyCode::End => self.login.active_buffer().move_end(),
            KeyCode::Char(c) => self.login.active_buffer().insert_char(c),
            _ => {}
        }
    }

    fn handle_search_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_search(),
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.status = None;
            }
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete_char(),
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.move_home(),
            KeyCode::End => self.search.move_end(),
            KeyCode::Char(c) => self.search.insert_char(c),
            _ => {}
        }
    }

    fn handle_modal_mode(&mut self, key: KeyEvent) {
        if !self.modal.is_open() {
            self.input_mode = InputMode::Normal;
            return;
        }

        match key.code {
            KeyCode::Enter => self.submit_modal(),
            KeyCode::Esc => self.cancel_modal(),
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = self.modal.form_mut() {
                    form.focus_next();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = self.modal.form_mut() {
                    form.focus_prev();
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = self.modal.form_mut() {
                    form.active_buffer().backspace();
                }
            }
            KeyCode::Delete => {
                if let Some(form) = self.modal.form_mut() {
                    form.active_buffer().delete_char();
                }
            }
            KeyCode::Left => {
                if let Some(form) = self.modal.form_mut() {
                    form.active_buffer().move_left();
                }
            }
            KeyCode::Right => {
                if let Some(form) = self.modal.form_mut() {
                    form.active_buffer().move_right();
                }
            }
            KeyCode::Home => {
                if let Some(form) = self.modal.form_mut() {
                    form.active_buffer().move_home();
                }
            }
            KeyCode::End => {
                if let Some(form) = self.modal.form_mut() {
                    form.active_buffer().move_end();
                }
            }
            KeyCode::Char(c) => {
                if let Some(form) = self.modal.form_mut() {
                    form.active_buffer().insert_char(c);
                }
            }
            _ => {}
        }
    }

    fn handle_confirm_delete_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.set_status_info(STATUS_DELETE_CANCELLED);
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.confirm_choice = self.confirm_choice.toggle();
            }
            KeyCode::Enter => {
                if self.confirm_choice == ConfirmChoice::Yes {
                    self.perform_delete();
                } else {
                    self.set_status_info(STATUS_DELETE_CANCELLED);
                }
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.status = None;
            }
            _ => {}
        }
    }
}
