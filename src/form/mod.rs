mod benefits;
mod field;
mod state;
mod validation;

pub use benefits::{BenefitRow, BenefitRows, BenefitSummary, RowRemoval};
pub use field::{FieldId, FieldState, Validity};
pub use state::{Focus, FormState};
pub use validation::SubmitCheck;
