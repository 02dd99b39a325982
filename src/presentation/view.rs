use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::banner::BannerStack;
use crate::form::FormState;

use super::components::{
    render_banners, render_benefits, render_fields, render_footer, render_loading_overlay,
    wrapped_banner_height,
};

pub(crate) struct UiContext<'a> {
    pub title: &'a str,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    pub banners: &'a BannerStack,
    pub invalid_count: usize,
    /// Spinner frame while the submit handoff is pending.
    pub loading: Option<usize>,
    pub now: Instant,
}

pub(crate) fn draw(frame: &mut Frame<'_>, form: &FormState, ctx: UiContext<'_>) {
    let banner_height = wrapped_banner_height(ctx.banners, frame.area().width);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Length(13),
            Constraint::Min(6),
            Constraint::Length(2),
        ])
        .split(frame.area());

    render_banners(frame, chunks[0], ctx.banners);
    let cursor_enabled = ctx.loading.is_none();
    render_fields(frame, chunks[1], form, ctx.title, cursor_enabled);
    render_benefits(frame, chunks[2], form, ctx.now, cursor_enabled);
    render_footer(frame, chunks[3], &ctx);

    if let Some(spinner_frame) = ctx.loading {
        render_loading_overlay(frame, spinner_frame);
    }
}
