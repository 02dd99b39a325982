mod rules;

pub use rules::{SalaryBounds, ValidationRules, Verdict};
pub(crate) use rules::{REQUIRED_MESSAGE, format_total, round_to_cents};

use serde::{Deserialize, Serialize};

/// One named monetary benefit, as carried in the serialized benefits
/// mirror and in the submission payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benefit {
    pub name: String,
    pub amount: f64,
}

impl Benefit {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// The fixed set of required employee identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub kra_pin: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub basic_salary: f64,
}

/// What a gated submission hands to the caller. `benefits_json` is the
/// exact hidden-field mirror value the form would have posted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub employee: EmployeeRecord,
    pub benefits: Vec<Benefit>,
    pub benefits_json: String,
}

/// Seed data accepted by the CLI and by `PayrollUI::seed_document`,
/// mirroring a page template pre-populated with an existing entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub employee: Option<EmployeeRecord>,
    #[serde(default)]
    pub benefits: Vec<Benefit>,
}
