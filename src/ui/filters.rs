use crate::app::{App, InputMode};
use crate::controls::ControlField;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const FIRST_ROW: [ControlField; 3] = [ControlField::Search, ControlField::Genre, ControlField::Sort];
const SECOND_ROW: [ControlField; 4] = [
    ControlField::YearFrom,
    ControlField::YearTo,
    ControlField::RatingFrom,
    ControlField::RatingTo,
];

/// Render the filter bar: every input with its current value.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = if editing {
        " Filters (Tab next field, ←→ choose, Enter/Esc done, Ctrl+L clear) "
    } else {
        " Filters (/) "
    };

    let (first, first_cursor) = field_row(app, &FIRST_ROW);
    let (second, second_cursor) = field_row(app, &SECOND_ROW);

    let bar = Paragraph::new(vec![first, second]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(bar, area);

    // Set cursor position when editing a text field
    if editing {
        let cursor = first_cursor
            .map(|x| (x, 0))
            .or(second_cursor.map(|x| (x, 1)));
        if let Some((x, row)) = cursor {
            frame.set_cursor_position((area.x + 1 + x, area.y + 1 + row));
        }
    }
}

/// Build one row of fields. Returns the line and, if the focused text field
/// is on it, the column right after its value.
fn field_row(app: &App, fields: &[ControlField]) -> (Line<'static>, Option<u16>) {
    let editing = app.input_mode == InputMode::Editing;
    let mut spans = Vec::new();
    let mut used = 0usize;
    let mut cursor = None;

    for &field in fields {
        let focused = editing && app.controls.focus == field;
        let label = format!(" {}: ", field.label());
        let value = app.controls.value(field, &app.genres);
        let shown = if field.is_selector() {
            format!("‹ {} ›", value)
        } else if value.is_empty() && !focused {
            "—".to_string()
        } else {
            value.clone()
        };

        let value_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };

        used += label.width();
        if focused && !field.is_selector() {
            cursor = Some(used as u16 + value.width() as u16);
        }
        used += shown.width() + 2;

        spans.push(Span::styled(label, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(shown, value_style));
        spans.push(Span::raw("  "));
    }

    (Line::from(spans), cursor)
}
