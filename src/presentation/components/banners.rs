use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use textwrap::wrap;

use crate::app::banner::{Banner, BannerKind, BannerStack};

/// Lines the banner area needs at the given frame width, so the layout
/// can collapse to zero when no banner is up.
pub(crate) fn wrapped_banner_height(banners: &BannerStack, width: u16) -> u16 {
    banners
        .iter()
        .map(|banner| banner_lines(banner, width).len() as u16)
        .sum()
}

pub(crate) fn render_banners(frame: &mut Frame<'_>, area: Rect, banners: &BannerStack) {
    if banners.is_empty() || area.height == 0 {
        return;
    }
    let mut lines = Vec::new();
    for banner in banners.iter() {
        lines.extend(banner_lines(banner, frame.area().width));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn banner_lines(banner: &Banner, width: u16) -> Vec<Line<'static>> {
    let (badge, style) = match banner.kind {
        BannerKind::Error => (
            "[!]",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        BannerKind::Success => (
            "[ok]",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    };
    let text_width = usize::from(width).saturating_sub(badge.len() + 2).max(20);
    wrap(&banner.text, text_width)
        .into_iter()
        .enumerate()
        .map(|(offset, chunk)| {
            let lead = if offset == 0 {
                format!("{badge} ")
            } else {
                " ".repeat(badge.len() + 1)
            };
            Line::from(vec![
                Span::styled(lead, style),
                Span::styled(chunk.into_owned(), style),
            ])
        })
        .collect()
}
