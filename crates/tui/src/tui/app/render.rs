use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use ratatui::Frame;

use crate::tui::constants::{APP_VERSION, EMPTY_LIST};
use crate::tui::forms::{FormField, LoginField, LoginForm, TaskForm};
use crate::tui::helpers::{
    accent_title, action_hints, build_help_lines, centered_rect, field_line, format_due_date,
    status_style, BG_ACCENT, BG_BASE, BG_PANEL,
};

use super::{App, ConfirmChoice, InputMode, Screen};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);

        if self.screen == Screen::Login {
            self.draw_login(f, size);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_tabs(f, chunks[1]);
        self.draw_tasks(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        match self.input_mode {
            InputMode::Search => self.draw_search_overlay(f, size),
            InputMode::Modal => self.draw_modal_overlay(f, size),
            InputMode::ConfirmDelete => self.draw_confirm_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::Normal => {}
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let left_line = Line::from(vec![
            Span::styled(
                format!(" tareas v{} ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("— panel de tareas  "),
            Span::styled(
                format!("🌐 {}", self.config.api_url()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(left_line).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let right_line = Line::from(vec![Span::styled(
            "c cerrar sesión · q salir ",
            Style::default().fg(Color::DarkGray),
        )]);
        let right_para = Paragraph::new(right_line)
            .alignment(Alignment::Right)
            .style(Style::default().bg(BG_BASE));
        f.render_widget(right_para, cols[1]);
    }

    fn draw_tabs(&self, f: &mut Frame<'_>, area: Rect) {
        let titles: Vec<Line> = self.tabs.iter().map(|tab| Line::from(tab.label)).collect();
        let tabs = Tabs::new(titles)
            .select(self.tab_index)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Estados"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn draw_tasks(&mut self, f: &mut Frame<'_>, area: Rect) {
        if self.board.tasks().is_empty() {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .style(Style::default().bg(BG_PANEL));
            let inner = block.inner(area);
            f.render_widget(Clear, area);
            f.render_widget(block, area);

            if inner.width == 0 || inner.height == 0 {
                return;
            }

            let content_area = centered_rect(inner.width.min(60).max(1), 3, inner);
            let paragraph = Paragraph::new(EMPTY_LIST)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray).bg(BG_PANEL));
            f.render_widget(paragraph, content_area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("📝 Título"),
            Cell::from("🗒 Descripción"),
            Cell::from("⏰ Fecha límite"),
            Cell::from("🔖 Estado"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .board
            .tasks()
            .iter()
            .map(|task| {
                Row::new(vec![
                    Cell::from(task.title.clone()),
                    Cell::from(task.description.clone().unwrap_or_default()),
                    Cell::from(format_due_date(task.due_date)),
                    Cell::from(Span::styled(task.status.as_str(), status_style(task.status))),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Length(14),
            Constraint::Length(12),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        // The transient toast wins; otherwise the board's standing error.
        let message_line = if let Some(status) = &self.status {
            Line::from(Span::styled(format!(" {}", status.text), status.style()))
        } else if let Some(error) = self.board.error() {
            Line::from(Span::styled(
                format!(" ⚠ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::from("")
        };
        f.render_widget(
            Paragraph::new(message_line).style(Style::default().bg(BG_BASE)),
            rows[0],
        );

        let mut hints = String::from(" a nueva · / buscar · r recargar · h ayuda");
        if let Some(task) = self.selected_task() {
            hints = format!(" {} · {}", action_hints(task.status), hints.trim_start());
        }
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hints,
                Style::default().fg(Color::DarkGray),
            )))
            .style(Style::default().bg(BG_BASE)),
            rows[1],
        );
    }

    // Login screen ---------------------------------------------------------

    fn draw_login(&self, f: &mut Frame<'_>, area: Rect) {
        let form = &self.login;
        let field_count = form.fields().len() as u16;
        let height = 7 + field_count * 3;
        let popup = centered_rect(48, height.min(area.height), area);

        f.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(form.mode.title()))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let mut constraints: Vec<Constraint> = Vec::new();
        for _ in 0..field_count {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let slots = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (idx, field) in form.fields().iter().enumerate() {
            let focused = *field == form.focus;
            self.draw_login_field(f, slots[idx], form, *field, focused);
        }

        let error_idx = field_count as usize;
        if let Some(error) = &form.error {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                )))
                .style(Style::default().bg(BG_PANEL)),
                slots[error_idx],
            );
        }

        let hint = format!(
            "Enter {} · Tab campo · {} · Esc salir",
            form.mode.submit_label().to_lowercase(),
            form.mode.switch_hint()
        );
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            )))
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(BG_PANEL)),
            slots[error_idx + 1],
        );
    }

    fn draw_login_field(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        form: &LoginForm,
        field: LoginField,
        focused: bool,
    ) {
        let masked = field == LoginField::Password;
        let border = if focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(field.label())
            .border_style(border)
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(field_line(form.buffer(field), focused, masked))
                .style(Style::default().bg(BG_PANEL)),
            inner,
        );
    }

    // Overlays -------------------------------------------------------------

    fn draw_search_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let popup = centered_rect(50, 3, area);
        f.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Buscar tareas"))
            .border_style(Style::default().fg(Color::Green))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup);
        f.render_widget(block, popup);
        f.render_widget(
            Paragraph::new(field_line(&self.search, true, false))
                .style(Style::default().bg(BG_PANEL)),
            inner,
        );
    }

    fn draw_modal_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(form) = self.modal.form() else {
            return;
        };

        let popup = centered_rect(54, 15, area);
        f.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(self.modal.title()))
            .border_style(Style::default().fg(Color::Green))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let slots = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        for (idx, field) in FormField::ALL.iter().enumerate() {
            let focused = *field == form.focus;
            self.draw_task_field(f, slots[idx], form, *field, focused);
        }

        if let Some(error) = &form.error {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                )))
                .style(Style::default().bg(BG_PANEL)),
                slots[3],
            );
        }

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Enter guardar · Tab campo · Esc cancelar",
                Style::default().fg(Color::DarkGray),
            )))
            .style(Style::default().bg(BG_PANEL)),
            slots[4],
        );
    }

    fn draw_task_field(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        form: &TaskForm,
        field: FormField,
        focused: bool,
    ) {
        let border = if focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(field.label())
            .border_style(border)
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(field_line(form.buffer(field), focused, false))
                .style(Style::default().bg(BG_PANEL)),
            inner,
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let popup = centered_rect(44, 7, area);
        f.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Eliminar tarea"))
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let title = self
            .selected_task()
            .map(|task| task.title.clone())
            .unwrap_or_default();

        let yes_style = if self.confirm_choice == ConfirmChoice::Yes {
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        let no_style = if self.confirm_choice == ConfirmChoice::No {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };

        let lines = vec![
            Line::from(format!("¿Eliminar \"{}\"?", title)),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Sí  ", yes_style),
                Span::raw("   "),
                Span::styled("  No  ", no_style),
            ]),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inner,
        );
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let entries = build_help_lines();
        let height = (entries.len() as u16).saturating_add(4);
        let popup = centered_rect(52, height.min(area.height), area);
        f.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Atajos"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let lines: Vec<Line> = entries
            .into_iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<12}", keys),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(description),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(lines).style(Style::default().bg(BG_PANEL)),
            inner,
        );
    }
}
