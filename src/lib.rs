#![deny(rust_2018_idioms)]

mod app;
mod domain;
mod form;
mod presentation;

pub use app::{PayrollUI, UiOptions};
pub use domain::{
    Benefit, EmployeeRecord, SalaryBounds, SeedDocument, SubmissionPayload, ValidationRules,
    Verdict,
};
pub use form::{
    BenefitRow, BenefitRows, BenefitSummary, FieldId, FieldState, Focus, FormState, RowRemoval,
    SubmitCheck, Validity,
};

pub mod prelude {
    pub use super::{Benefit, EmployeeRecord, PayrollUI, SubmissionPayload, UiOptions};
}
