use std::time::{Duration, Instant};

pub(crate) const ERROR_BANNER_TTL: Duration = Duration::from_secs(5);
pub(crate) const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(3);

pub(crate) const VALIDATION_ERROR_TEXT: &str =
    "Please fix the highlighted fields before submitting";
pub(crate) const RESET_SUCCESS_TEXT: &str = "Form has been reset. Ready for new entry.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BannerKind {
    Error,
    Success,
}

/// A transient notification with a one-shot auto-dismiss deadline.
/// There is no cancellation: a banner the user closes early simply
/// leaves its deadline with nothing to remove.
#[derive(Debug, Clone)]
pub(crate) struct Banner {
    pub kind: BannerKind,
    pub text: String,
    deadline: Instant,
}

/// Banners, newest first, mirroring insertion at the top of the
/// message container.
#[derive(Debug, Clone, Default)]
pub(crate) struct BannerStack {
    banners: Vec<Banner>,
}

impl BannerStack {
    pub fn push_error(&mut self, text: impl Into<String>, now: Instant) {
        self.banners.insert(
            0,
            Banner {
                kind: BannerKind::Error,
                text: text.into(),
                deadline: now + ERROR_BANNER_TTL,
            },
        );
    }

    pub fn push_success(&mut self, text: impl Into<String>, now: Instant) {
        self.banners.insert(
            0,
            Banner {
                kind: BannerKind::Success,
                text: text.into(),
                deadline: now + SUCCESS_BANNER_TTL,
            },
        );
    }

    /// Manual close of the newest banner. Returns whether one was
    /// dismissed.
    pub fn dismiss_top(&mut self) -> bool {
        if self.banners.is_empty() {
            false
        } else {
            self.banners.remove(0);
            true
        }
    }

    /// Drops every banner whose deadline has passed.
    pub fn sweep(&mut self, now: Instant) {
        self.banners.retain(|banner| banner.deadline > now);
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Banner> {
        self.banners.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_banners_outlive_success_banners() {
        let now = Instant::now();
        let mut stack = BannerStack::default();
        stack.push_error(VALIDATION_ERROR_TEXT, now);
        stack.push_success(RESET_SUCCESS_TEXT, now);
        assert_eq!(stack.len(), 2);

        stack.sweep(now + SUCCESS_BANNER_TTL);
        assert_eq!(stack.len(), 1);
        assert_eq!(
            stack.iter().next().map(|banner| banner.kind),
            Some(BannerKind::Error)
        );

        stack.sweep(now + ERROR_BANNER_TTL);
        assert!(stack.is_empty());
    }

    #[test]
    fn newest_banner_sits_on_top() {
        let now = Instant::now();
        let mut stack = BannerStack::default();
        stack.push_error("first", now);
        stack.push_error("second", now);
        assert_eq!(stack.iter().next().map(|banner| banner.text.as_str()), Some("second"));
    }

    #[test]
    fn early_dismissal_makes_the_deadline_a_no_op() {
        let now = Instant::now();
        let mut stack = BannerStack::default();
        stack.push_success(RESET_SUCCESS_TEXT, now);
        assert!(stack.dismiss_top());
        assert!(!stack.dismiss_top());
        // The pending deadline finds nothing to remove.
        stack.sweep(now + SUCCESS_BANNER_TTL);
        assert!(stack.is_empty());
    }
}
