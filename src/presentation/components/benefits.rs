use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::form::{BenefitRow, Focus, FormState};

pub(crate) fn render_benefits(
    frame: &mut Frame<'_>,
    area: Rect,
    form: &FormState,
    now: Instant,
    cursor_enabled: bool,
) {
    let summary = form.summary();
    let mut lines = Vec::new();
    let mut cursor: Option<(u16, u16)> = None;

    for (index, row) in form.benefits().rows().iter().enumerate() {
        let name_focused = form.focus() == Focus::BenefitName(index);
        let amount_focused = form.focus() == Focus::BenefitAmount(index);
        let marker = if name_focused || amount_focused {
            "» "
        } else {
            "  "
        };
        let prefix = format!("{marker}{}. ", index + 1);
        let name_cell = cell_text(row.name(), "benefit name", name_focused);
        let amount_lead = "  KSh ";
        let amount_cell = cell_text(row.amount(), "0.00", amount_focused);

        if name_focused {
            let x = (prefix.width() + row.name().width()) as u16;
            cursor = Some((x, lines.len() as u16));
        } else if amount_focused {
            let x = (prefix.width() + name_cell.width() + amount_lead.width() + row.amount().width())
                as u16;
            cursor = Some((x, lines.len() as u16));
        }

        let style = row_style(row, now);
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(name_cell, cell_style(style, name_focused)),
            Span::styled(amount_lead.to_string(), style),
            Span::styled(amount_cell, cell_style(style, amount_focused)),
        ]));
    }

    lines.push(Line::default());
    let total_style = if summary.has_benefits() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(
        format!("  Total benefits: {}", summary.total_display()),
        total_style,
    )));

    let block = Block::default()
        .title(format!("Benefits ({})", summary.count))
        .borders(Borders::ALL)
        .border_style(if summary.has_benefits() {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        });
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

fn cell_text(value: &str, placeholder: &str, focused: bool) -> String {
    if value.is_empty() && !focused {
        format!("<{placeholder}>")
    } else {
        value.to_string()
    }
}

fn cell_style(base: Style, focused: bool) -> Style {
    if focused {
        base.add_modifier(Modifier::UNDERLINED)
    } else {
        base
    }
}

fn row_style(row: &BenefitRow, now: Instant) -> Style {
    if row.is_leaving() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else if row.entrance_flash(now) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}
