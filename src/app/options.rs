use std::{path::PathBuf, time::Duration};

/// Runtime knobs for the form loop. The delays mirror the original
/// page: 500 ms between gating and the submission handoff, 5 s / 3 s
/// banner lifetimes (those live with the banner stack).
#[derive(Debug, Clone)]
pub struct UiOptions {
    pub tick_rate: Duration,
    pub submit_delay: Duration,
    pub show_help: bool,
    /// Well-known location for the session draft stamp; `None`
    /// disables registration.
    pub draft_path: Option<PathBuf>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
            submit_delay: Duration::from_millis(500),
            show_help: true,
            draft_path: Some(default_draft_path()),
        }
    }
}

impl UiOptions {
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_draft_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.draft_path = Some(path.into());
        self
    }

    pub fn without_draft(mut self) -> Self {
        self.draft_path = None;
        self
    }
}

pub(crate) fn default_draft_path() -> PathBuf {
    std::env::temp_dir().join("payrollui").join("session.json")
}
