use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;

use crate::{
    domain::{SubmissionPayload, ValidationRules},
    form::{Focus, FormState, RowRemoval},
    presentation::{self, UiContext},
};

use super::{
    banner::{BannerStack, RESET_SUCCESS_TEXT, VALIDATION_ERROR_TEXT},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

const HELP_TEXT: &str = "Tab/Shift+Tab move • Ctrl+N add benefit • Ctrl+D remove benefit • Ctrl+S submit • Ctrl+R reset • Ctrl+Q quit";

/// Where a submit attempt stands. `Loading` is the disabled-button,
/// overlay-visible window between gating and the handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Editing,
    Loading { submit_at: Instant },
    Done,
}

pub(crate) struct App {
    title: String,
    form: FormState,
    rules: ValidationRules,
    options: UiOptions,
    status: StatusLine,
    banners: BannerStack,
    phase: Phase,
    should_quit: bool,
    result: Option<SubmissionPayload>,
}

impl App {
    pub fn new(
        title: String,
        form: FormState,
        rules: ValidationRules,
        options: UiOptions,
    ) -> Self {
        Self {
            title,
            form,
            rules,
            options,
            status: StatusLine::new(),
            banners: BannerStack::default(),
            phase: Phase::Editing,
            should_quit: false,
            result: None,
        }
    }

    /// The event loop: draw, wait up to a tick for input, then advance
    /// the timers. Resolves with the payload once a gated submission
    /// completes, or `None` when the user quits.
    pub fn run(&mut self) -> Result<Option<SubmissionPayload>> {
        let mut terminal = TerminalGuard::new()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(self.options.tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key, Instant::now()),
                    Event::Resize(width, height) => {
                        terminal.resize(Rect::new(0, 0, width, height))?;
                    }
                    Event::Mouse(_) => {}
                    Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                }
            }
            self.tick(Instant::now());
        }
        Ok(self.result.take())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let now = Instant::now();
        let loading = match self.phase {
            Phase::Loading { submit_at } => {
                let remaining = submit_at.saturating_duration_since(now);
                Some((remaining.as_millis() / 125) as usize)
            }
            _ => None,
        };
        let help = self.options.show_help.then_some(HELP_TEXT);
        let invalid_count = self.form.invalid_count();
        presentation::draw(
            frame,
            &self.form,
            UiContext {
                title: &self.title,
                status_message: self.status.message(),
                help,
                banners: &self.banners,
                invalid_count,
                loading,
                now,
            },
        );
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        // While loading the submit control is disabled; only reset and
        // quit still work, like the untouched reset button.
        if matches!(self.phase, Phase::Loading { .. }) {
            match key.code {
                KeyCode::Char('q') if ctrl => self.should_quit = true,
                KeyCode::Char('r') if ctrl => self.on_reset(now),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('s') if ctrl => self.on_submit(now),
            KeyCode::Char('r') if ctrl => self.on_reset(now),
            KeyCode::Char('n') if ctrl => {
                let index = self.form.add_benefit_row(now);
                self.status.row_added(index);
            }
            KeyCode::Char('d') if ctrl => match self.form.remove_focused_row(now) {
                RowRemoval::Scheduled => self.status.row_removed(),
                RowRemoval::Cleared => self.status.row_cleared(),
                RowRemoval::Ignored => {
                    self.status.set_raw("Focus a benefit row before Ctrl+D remove");
                }
            },
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Esc => {
                if !self.banners.dismiss_top() {
                    self.status.ready();
                }
            }
            _ => {
                if self.form.handle_edit(&key, &self.rules) {
                    self.status.editing(focus_label(&self.form));
                }
            }
        }
    }

    /// Advances every one-shot deadline: banner dismissal, leaving-row
    /// sweeps, and the pending submission handoff.
    fn tick(&mut self, now: Instant) {
        self.banners.sweep(now);
        self.form.sweep(now);
        if let Phase::Loading { submit_at } = self.phase
            && now >= submit_at
        {
            self.finish_submission();
        }
    }

    /// The submission gate. Required emptiness blocks with a banner and
    /// refocuses the first offender; otherwise the loading window is
    /// armed and the handoff happens after the fixed delay.
    fn on_submit(&mut self, now: Instant) {
        let check = self.form.run_submit_checks(&self.rules);
        if let Some(first_empty) = check.first_empty {
            self.form.focus_field(first_empty);
            self.banners.push_error(VALIDATION_ERROR_TEXT, now);
            self.status.blocked();
            return;
        }
        self.phase = Phase::Loading {
            submit_at: now + self.options.submit_delay,
        };
        self.status.loading();
    }

    fn finish_submission(&mut self) {
        self.result = Some(self.form.build_payload());
        self.phase = Phase::Done;
        self.should_quit = true;
    }

    /// Unconditional reset: also cancels a pending submission window.
    fn on_reset(&mut self, now: Instant) {
        self.form.reset();
        self.phase = Phase::Editing;
        self.banners.push_success(RESET_SUCCESS_TEXT, now);
        self.status.ready();
    }
}

fn focus_label(form: &FormState) -> &'static str {
    match form.focus() {
        Focus::Field(id) => id.label(),
        Focus::BenefitName(_) => "benefit name",
        Focus::BenefitAmount(_) => "benefit amount",
    }
}
