use crate::domain::{REQUIRED_MESSAGE, ValidationRules, Verdict};

use super::field::{FieldId, FieldState, Validity};

/// Runs the live, field-specific rule for a single input and applies
/// the result to its visual state. Every identifier field is required,
/// so an empty value always reports the required message. Returns
/// whether the field ended up valid.
pub(crate) fn validate_field(field: &mut FieldState, rules: &ValidationRules) -> bool {
    if field.is_blank() {
        field.set_state(Validity::Invalid, Some(REQUIRED_MESSAGE.to_string()));
        return false;
    }
    let verdict = match field.id {
        FieldId::KraPin => rules.check_kra_pin(field.trimmed()),
        FieldId::BasicSalary => rules.check_salary(field.trimmed()),
        _ => Verdict::Valid,
    };
    match verdict {
        Verdict::Valid => {
            field.set_state(Validity::Valid, None);
            true
        }
        Verdict::Invalid(message) => {
            field.set_state(Validity::Invalid, Some(message));
            false
        }
    }
}

/// Result of the submit-time sweep over the required identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitCheck {
    /// First required field found empty, if any. Only emptiness blocks
    /// the gate; populated-but-malformed fields update their inline
    /// state and submit anyway, as the original form did.
    pub first_empty: Option<FieldId>,
}

impl SubmitCheck {
    pub fn passed(&self) -> bool {
        self.first_empty.is_none()
    }
}

pub(crate) fn run_submit_checks(
    fields: &mut [FieldState],
    rules: &ValidationRules,
) -> SubmitCheck {
    let mut first_empty = None;
    for field in fields.iter_mut() {
        if field.is_blank() {
            field.set_state(Validity::Invalid, Some(REQUIRED_MESSAGE.to_string()));
            if first_empty.is_none() {
                first_empty = Some(field.id);
            }
        } else {
            validate_field(field, rules);
        }
    }
    SubmitCheck { first_empty }
}
