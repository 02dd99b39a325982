use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::form::{FieldState, Focus, FormState, Validity};

pub(crate) fn render_fields(
    frame: &mut Frame<'_>,
    area: Rect,
    form: &FormState,
    title: &str,
    cursor_enabled: bool,
) {
    let mut lines = Vec::new();
    let mut cursor: Option<(u16, u16)> = None;

    for field in form.fields() {
        let focused = form.focus() == Focus::Field(field.id);
        let marker = if focused { "» " } else { "  " };
        let label = format!("{marker}{}: ", field.id.label());
        if focused {
            let x = (label.width() + field.value().width()) as u16;
            cursor = Some((x, lines.len() as u16));
        }
        lines.push(Line::from(vec![
            Span::raw(label),
            Span::styled(field.value().to_string(), value_style(field)),
        ]));
        if field.validity() == Validity::Invalid
            && let Some(message) = field.message()
        {
            lines.push(Line::from(Span::styled(
                format!("    {message}"),
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
    }

    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if cursor_enabled
        && let Some((dx, dy)) = cursor
    {
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(dx)
            .min(area.right().saturating_sub(2));
        let y = area
            .y
            .saturating_add(1)
            .saturating_add(dy)
            .min(area.bottom().saturating_sub(2));
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn value_style(field: &FieldState) -> Style {
    match field.validity() {
        Validity::Valid => Style::default().fg(Color::Green),
        Validity::Invalid => Style::default().fg(Color::Red),
        Validity::Unset => Style::default(),
    }
}
