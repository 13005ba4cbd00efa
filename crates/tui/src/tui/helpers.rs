use std::cmp::min;

use chrono::NaiveDate;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::buffer::TextBuffer;
use tareas_core::model::{allowed_actions, Action, TaskStatus};

pub const BG_BASE: Color = Color::Rgb(14, 17, 23);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 34);
pub const BG_ACCENT: Color = Color::Rgb(32, 37, 47);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn accent_title(text: &str) -> Span<'_> {
    Span::styled(
        format!(" {} ", text),
        Style::default()
            .fg(FG_ACCENT)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn format_due_date(due: Option<NaiveDate>) -> String {
    match due {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => String::from("—"),
    }
}

pub fn status_style(status: TaskStatus) -> Style {
    let color = match status {
        TaskStatus::Pending => Color::Yellow,
        TaskStatus::InProgress => Color::Cyan,
        TaskStatus::Completed => Color::Green,
    };
    Style::default().fg(color)
}

/// Footer hint for the selected task, derived from the pure action table
/// so the offered keys always match the workflow position.
pub fn action_hints(status: TaskStatus) -> String {
    let mut hints = Vec::new();
    for action in allowed_actions(status) {
        match action {
            Action::Edit => hints.push("e editar"),
            Action::Advance => hints.push(match status {
                TaskStatus::Pending => "n marcar en progreso",
                _ => "n marcar completada",
            }),
            Action::Delete => hints.push("x eliminar"),
        }
    }
    hints.join(" · ")
}

/// Render a field's text with a block cursor when it is focused. Password
/// fields render as bullets.
pub fn field_line<'a>(buffer: &'a TextBuffer, focused: bool, masked: bool) -> Line<'a> {
    let text: String = if masked {
        buffer.as_str().chars().map(|_| '•').collect()
    } else {
        buffer.as_str().to_string()
    };

    if !focused {
        return Line::from(Span::raw(text));
    }

    let cursor = buffer.cursor_chars();
    let before: String = text.chars().take(cursor).collect();
    let at: String = text.chars().skip(cursor).take(1).collect();
    let after: String = text.chars().skip(cursor + 1).collect();
    let cursor_cell = if at.is_empty() { String::from(" ") } else { at };

    Line::from(vec![
        Span::raw(before),
        Span::styled(cursor_cell, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ])
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("↑/↓, j/k", "moverse por la lista"),
        ("←/→, Tab", "cambiar de pestaña de estado"),
        ("a", "crear una tarea"),
        ("e", "editar la tarea seleccionada"),
        ("n, Espacio", "avanzar el estado"),
        ("x, Supr", "eliminar (pide confirmación)"),
        ("/", "buscar por texto"),
        ("r", "recargar la vista actual"),
        ("c", "cerrar sesión"),
        ("h", "esta ayuda"),
        ("q", "salir"),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn centered_rect_keeps_within_bounds() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let rect = centered_rect(40, 10, area);
        assert!(rect.x >= area.x);
        assert!(rect.y >= area.y);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 10);
    }

    #[test]
    fn due_dates_render_as_day_month_year() {
        let date = NaiveDate::parse_from_str("2025-01-10", "%Y-%m-%d").unwrap();
        assert_eq!(format_due_date(Some(date)), "10/01/2025");
        assert_eq!(format_due_date(None), "—");
    }

    #[rstest]
    #[case(TaskStatus::Pending, "e editar · n marcar en progreso")]
    #[case(TaskStatus::InProgress, "e editar · n marcar completada")]
    #[case(TaskStatus::Completed, "x eliminar")]
    fn hints_follow_the_action_table(#[case] status: TaskStatus, #[case] expected: &str) {
        assert_eq!(action_hints(status), expected);
    }

    #[test]
    fn masked_fields_hide_their_contents() {
        let mut buffer = TextBuffer::new();
        buffer.set("secreto");
        let line = field_line(&buffer, false, true);
        let rendered: String = line.spans.iter().map(|s| s.content.clone()).collect();
        assert_eq!(rendered, "•••••••");
    }
}
