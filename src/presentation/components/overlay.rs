use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout::centered_rect;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Full-screen takeover while the submit handoff is pending: input is
/// disabled upstream, this just makes the wait visible.
pub(crate) fn render_loading_overlay(frame: &mut Frame<'_>, spinner_frame: usize) {
    let area = frame.area();
    frame.render_widget(Clear, area);
    let backdrop = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(backdrop, area);

    let spinner = SPINNER[spinner_frame % SPINNER.len()];
    let body = vec![
        Line::default(),
        Line::from(format!("{spinner} Submitting payroll entry")),
        Line::from("Please wait..."),
    ];
    let boxed = centered_rect(area, 40, 6);
    let widget = Paragraph::new(body)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Processing "));
    frame.render_widget(widget, boxed);
}
