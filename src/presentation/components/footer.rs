use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::super::view::UiContext;

pub(crate) fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if let Some(help) = ctx.help {
        let actions = Paragraph::new(format!("Actions: {help}"))
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(actions, rows[0]);
    }

    let badge = if ctx.invalid_count > 0 {
        Span::styled(
            format!("[! {}]", ctx.invalid_count),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::styled("[ok]", Style::default().fg(Color::Green))
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw("Status: "),
        Span::raw(ctx.status_message.to_string()),
        Span::raw(" "),
        badge,
    ]));
    frame.render_widget(status, rows[1]);
}
