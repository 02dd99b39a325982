use anyhow::Result;
use tracing::warn;

use crate::{
    domain::{Benefit, EmployeeRecord, SeedDocument, SubmissionPayload, ValidationRules},
    form::FormState,
};

use super::{draft, options::UiOptions, runtime::App};

const DEFAULT_TITLE: &str = "Payroll Entry";

/// Builder-style entry point. Construct once, seed it the way the page
/// template would, then `run()` to hand control to the form loop.
///
/// ```no_run
/// use payrollui::PayrollUI;
///
/// let submitted = PayrollUI::new().run()?;
/// if let Some(payload) = submitted {
///     println!("{}", payload.benefits_json);
/// }
/// # anyhow::Ok(())
/// ```
#[derive(Debug)]
pub struct PayrollUI {
    title: String,
    record: Option<EmployeeRecord>,
    benefits: Vec<Benefit>,
    rules: ValidationRules,
    options: UiOptions,
}

impl Default for PayrollUI {
    fn default() -> Self {
        Self::new()
    }
}

impl PayrollUI {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            record: None,
            benefits: Vec::new(),
            rules: ValidationRules::default(),
            options: UiOptions::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn seed_record(mut self, record: EmployeeRecord) -> Self {
        self.record = Some(record);
        self
    }

    pub fn seed_benefits(mut self, benefits: Vec<Benefit>) -> Self {
        self.benefits = benefits;
        self
    }

    pub fn seed_document(mut self, document: SeedDocument) -> Self {
        self.record = document.employee;
        self.benefits = document.benefits;
        self
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers the session draft stamp, then runs the interactive
    /// loop. Resolves to `Some(payload)` when the user submits through
    /// the gate, `None` when they quit without submitting.
    pub fn run(self) -> Result<Option<SubmissionPayload>> {
        if let Some(path) = &self.options.draft_path
            && let Err(error) = draft::register(path)
        {
            // The draft store is best effort; the form works without it.
            warn!(%error, path = %path.display(), "draft store registration failed");
        }
        let form = FormState::seeded(self.record.as_ref(), &self.benefits);
        let mut app = App::new(self.title, form, self.rules, self.options);
        app.run()
    }
}
