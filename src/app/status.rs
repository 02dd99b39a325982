#[derive(Debug, Clone)]
pub(crate) struct StatusLine {
    message: String,
}

pub(crate) const READY_STATUS: &str = "Ready. Tab to move, Ctrl+S to submit.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn row_added(&mut self, index: usize) {
        self.message = format!("Added benefit row {}", index + 1);
    }

    pub fn row_cleared(&mut self) {
        self.message = "Cleared the last benefit row".to_string();
    }

    pub fn row_removed(&mut self) {
        self.message = "Removed benefit row".to_string();
    }

    pub fn blocked(&mut self) {
        self.message = "Submission blocked: required fields are missing".to_string();
    }

    pub fn loading(&mut self) {
        self.message = "Submitting payroll entry...".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
