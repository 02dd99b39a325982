use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::domain::{
    Benefit, EmployeeRecord, SubmissionPayload, ValidationRules, round_to_cents,
};

use super::benefits::{BenefitRows, BenefitSummary, RowRemoval};
use super::field::{FieldId, FieldState};
use super::validation::{self, SubmitCheck};

/// Where input currently lands: one of the fixed employee fields, or
/// the name/amount half of a benefit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldId),
    BenefitName(usize),
    BenefitAmount(usize),
}

/// The whole form: the five fixed identifier fields, the benefit rows,
/// the recomputed summary mirror, and the focus cursor. Constructed
/// once and owned by the app loop; nothing here is global.
#[derive(Debug, Clone)]
pub struct FormState {
    fields: Vec<FieldState>,
    benefits: BenefitRows,
    summary: BenefitSummary,
    focus: Focus,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        let mut state = Self {
            fields: FieldId::ALL.iter().map(|id| FieldState::new(*id)).collect(),
            benefits: BenefitRows::new(),
            summary: BenefitSummary::default(),
            focus: Focus::Field(FieldId::EmployeeId),
        };
        state.refresh_summary();
        state
    }

    /// Builds a form pre-populated the way a server-rendered template
    /// would seed it: existing employee values and zero or more
    /// existing benefit rows.
    pub fn seeded(record: Option<&EmployeeRecord>, benefits: &[Benefit]) -> Self {
        let mut state = Self::new();
        if let Some(record) = record {
            state.fields = vec![
                FieldState::seeded(FieldId::EmployeeId, record.employee_id.clone()),
                FieldState::seeded(FieldId::KraPin, record.kra_pin.clone()),
                FieldState::seeded(FieldId::FirstName, record.first_name.clone()),
                FieldState::seeded(FieldId::LastName, record.last_name.clone()),
                FieldState::seeded(FieldId::BasicSalary, salary_buffer(record.basic_salary)),
            ];
        }
        state.benefits = BenefitRows::seeded(benefits);
        state.refresh_summary();
        state
    }

    pub fn field(&self, id: FieldId) -> &FieldState {
        &self.fields[id.index()]
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn benefits(&self) -> &BenefitRows {
        &self.benefits
    }

    pub fn summary(&self) -> &BenefitSummary {
        &self.summary
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn focus_field(&mut self, id: FieldId) {
        self.blur_current();
        self.focus = Focus::Field(id);
    }

    /// Tab order: the five fields, then name/amount of each live row,
    /// wrapping around.
    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, delta: isize) {
        self.blur_current();
        let stops = self.focus_stops();
        if stops.is_empty() {
            return;
        }
        let current = stops
            .iter()
            .position(|stop| *stop == self.focus)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(stops.len() as isize) as usize;
        self.focus = stops[next];
    }

    fn focus_stops(&self) -> Vec<Focus> {
        let mut stops: Vec<Focus> = FieldId::ALL.iter().map(|id| Focus::Field(*id)).collect();
        for (index, row) in self.benefits.rows().iter().enumerate() {
            if row.is_leaving() {
                continue;
            }
            stops.push(Focus::BenefitName(index));
            stops.push(Focus::BenefitAmount(index));
        }
        stops
    }

    /// Focus-loss canonicalization: numeric inputs are re-parsed and
    /// rounded to two decimal places when they hold a non-negative
    /// number; anything else is left untouched.
    fn blur_current(&mut self) {
        match self.focus {
            Focus::Field(id) if id.is_numeric() => {
                let field = &mut self.fields[id.index()];
                if let Some(canonical) = canonicalize_amount(field.value()) {
                    field.replace_value(canonical);
                }
            }
            Focus::BenefitAmount(index) => {
                if let Some(row) = self.benefits.row_mut(index)
                    && let Some(canonical) = canonicalize_amount(row.amount())
                {
                    row.replace_amount(canonical);
                }
            }
            _ => {}
        }
    }

    /// Routes an editing key to the focused input. Field edits re-run
    /// the live rule; benefit edits refresh the summary, exactly like
    /// the per-row input listeners. Returns whether anything changed.
    pub fn handle_edit(&mut self, key: &KeyEvent, rules: &ValidationRules) -> bool {
        match self.focus {
            Focus::Field(id) => {
                let field = &mut self.fields[id.index()];
                if field.handle_key(key) {
                    validation::validate_field(field, rules);
                    return true;
                }
                false
            }
            Focus::BenefitName(index) => {
                if let Some(row) = self.benefits.row_mut(index)
                    && row.edit_name(key)
                {
                    self.refresh_summary();
                    return true;
                }
                false
            }
            Focus::BenefitAmount(index) => {
                if let Some(row) = self.benefits.row_mut(index)
                    && row.edit_amount(key)
                {
                    self.refresh_summary();
                    return true;
                }
                false
            }
        }
    }

    /// Appends a blank benefit row and moves focus to its name input
    /// (the add-button scrolls the new row into view).
    pub fn add_benefit_row(&mut self, now: Instant) -> usize {
        self.blur_current();
        let index = self.benefits.add_row(now);
        self.focus = Focus::BenefitName(index);
        index
    }

    /// Removes the focused benefit row, or clears it when it is the
    /// last one. When focus is not on a row, nothing happens.
    pub fn remove_focused_row(&mut self, now: Instant) -> RowRemoval {
        let index = match self.focus {
            Focus::BenefitName(index) | Focus::BenefitAmount(index) => index,
            Focus::Field(_) => return RowRemoval::Ignored,
        };
        let removal = self.benefits.remove_row(index, now);
        match removal {
            RowRemoval::Scheduled => {
                // The row lingers for its exit animation; step focus off it.
                self.focus = Focus::BenefitName(index);
                self.move_focus(-1);
            }
            RowRemoval::Cleared => {
                self.refresh_summary();
                self.focus = Focus::BenefitName(index);
            }
            RowRemoval::Ignored => {}
        }
        removal
    }

    /// Sweeps expired row animations; refreshes the summary when a
    /// leaving row was actually dropped. Returns true in that case.
    pub fn sweep(&mut self, now: Instant) -> bool {
        let removed = self.benefits.sweep(now);
        if removed {
            self.refresh_summary();
            self.clamp_focus();
        }
        removed
    }

    fn clamp_focus(&mut self) {
        let last = self.benefits.len().saturating_sub(1);
        match self.focus {
            Focus::BenefitName(index) if index > last => {
                self.focus = Focus::BenefitName(last);
            }
            Focus::BenefitAmount(index) if index > last => {
                self.focus = Focus::BenefitAmount(last);
            }
            _ => {}
        }
    }

    /// Recomputes the summary from the rows and rewrites the serialized
    /// mirror, as happens before every read and before submission.
    pub fn refresh_summary(&mut self) {
        self.summary = self.benefits.summarize();
    }

    /// Submit-time sweep over the required identifiers. The serialized
    /// mirror is refreshed regardless of the outcome.
    pub fn run_submit_checks(&mut self, rules: &ValidationRules) -> SubmitCheck {
        let check = validation::run_submit_checks(&mut self.fields, rules);
        self.refresh_summary();
        check
    }

    pub fn employee_record(&self) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: self.field(FieldId::EmployeeId).trimmed().to_string(),
            kra_pin: self.field(FieldId::KraPin).trimmed().to_string(),
            first_name: self.field(FieldId::FirstName).trimmed().to_string(),
            last_name: self.field(FieldId::LastName).trimmed().to_string(),
            basic_salary: self
                .field(FieldId::BasicSalary)
                .trimmed()
                .parse::<f64>()
                .unwrap_or(0.0),
        }
    }

    pub fn build_payload(&mut self) -> SubmissionPayload {
        self.refresh_summary();
        SubmissionPayload {
            employee: self.employee_record(),
            benefits: self.benefits.collect(),
            benefits_json: self.summary.serialized.clone(),
        }
    }

    /// Unconditional reset: every field cleared (value and validity),
    /// rows collapsed to one blank row, summary recomputed, focus back
    /// to the first field.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.benefits.reset();
        self.refresh_summary();
        self.focus = Focus::Field(FieldId::EmployeeId);
    }

    /// Count of fields currently showing the invalid class, for the
    /// footer badge.
    pub fn invalid_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| field.validity() == super::field::Validity::Invalid)
            .count()
    }
}

fn salary_buffer(salary: f64) -> String {
    if salary > 0.0 {
        round_to_cents(salary).to_string()
    } else {
        String::new()
    }
}

/// Returns the canonical 2-dp form of a non-negative numeric buffer,
/// or None when the buffer should be left as-is.
fn canonicalize_amount(buffer: &str) -> Option<String> {
    let value = buffer.trim().parse::<f64>().ok()?;
    if value.is_nan() || value < 0.0 {
        return None;
    }
    Some(round_to_cents(value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::Validity;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)
    }

    fn type_text(form: &mut FormState, rules: &ValidationRules, text: &str) {
        for ch in text.chars() {
            form.handle_edit(&press(ch), rules);
        }
    }

    #[test]
    fn tab_order_covers_fields_then_rows_and_wraps() {
        let mut form = FormState::new();
        assert_eq!(form.focus(), Focus::Field(FieldId::EmployeeId));
        for _ in 0..5 {
            form.focus_next();
        }
        assert_eq!(form.focus(), Focus::BenefitName(0));
        form.focus_next();
        assert_eq!(form.focus(), Focus::BenefitAmount(0));
        form.focus_next();
        assert_eq!(form.focus(), Focus::Field(FieldId::EmployeeId));
        form.focus_prev();
        assert_eq!(form.focus(), Focus::BenefitAmount(0));
    }

    #[test]
    fn editing_a_field_runs_the_live_rule() {
        let rules = ValidationRules::default();
        let mut form = FormState::new();
        form.focus_field(FieldId::BasicSalary);
        type_text(&mut form, &rules, "9999");
        assert_eq!(form.field(FieldId::BasicSalary).validity(), Validity::Invalid);
        type_text(&mut form, &rules, "0");
        assert_eq!(form.field(FieldId::BasicSalary).validity(), Validity::Valid);
    }

    #[test]
    fn salary_is_canonicalized_when_focus_leaves() {
        let rules = ValidationRules::default();
        let mut form = FormState::new();
        form.focus_field(FieldId::BasicSalary);
        type_text(&mut form, &rules, "45000.129");
        form.focus_next();
        assert_eq!(form.field(FieldId::BasicSalary).value(), "45000.13");
    }

    #[test]
    fn non_numeric_amount_survives_blur_unchanged() {
        let rules = ValidationRules::default();
        let mut form = FormState::new();
        form.focus_field(FieldId::BasicSalary);
        type_text(&mut form, &rules, "abc");
        form.focus_next();
        assert_eq!(form.field(FieldId::BasicSalary).value(), "abc");
    }

    #[test]
    fn benefit_edits_refresh_the_summary_mirror() {
        let rules = ValidationRules::default();
        let mut form = FormState::new();
        for _ in 0..5 {
            form.focus_next();
        }
        type_text(&mut form, &rules, "Housing");
        form.focus_next();
        type_text(&mut form, &rules, "15000");
        assert_eq!(form.summary().total, 15_000.0);
        assert!(form.summary().serialized.contains("Housing"));
    }

    #[test]
    fn adding_a_row_moves_focus_to_it() {
        let mut form = FormState::new();
        let index = form.add_benefit_row(Instant::now());
        assert_eq!(index, 1);
        assert_eq!(form.focus(), Focus::BenefitName(1));
    }

    #[test]
    fn removing_the_only_row_keeps_the_invariant() {
        let rules = ValidationRules::default();
        let mut form = FormState::new();
        for _ in 0..5 {
            form.focus_next();
        }
        type_text(&mut form, &rules, "Housing");
        form.focus_next();
        type_text(&mut form, &rules, "15000");
        assert_eq!(form.remove_focused_row(Instant::now()), RowRemoval::Cleared);
        assert_eq!(form.benefits().len(), 1);
        assert_eq!(form.summary().total, 0.0);
    }

    #[test]
    fn reset_returns_to_one_blank_row_and_zero_total() {
        let rules = ValidationRules::default();
        let now = Instant::now();
        let mut form = FormState::new();
        form.focus_field(FieldId::FirstName);
        type_text(&mut form, &rules, "Grace");
        form.add_benefit_row(now);
        form.add_benefit_row(now);
        form.reset();
        assert!(form.field(FieldId::FirstName).is_blank());
        assert_eq!(form.field(FieldId::FirstName).validity(), Validity::Unset);
        assert_eq!(form.benefits().len(), 1);
        assert_eq!(form.summary().total, 0.0);
        assert_eq!(form.summary().serialized, "[]");
    }

    #[test]
    fn seeded_form_reflects_the_template_values() {
        let record = EmployeeRecord {
            employee_id: "EMP-001".into(),
            kra_pin: "a123456789b".into(),
            first_name: "Grace".into(),
            last_name: "Njeri".into(),
            basic_salary: 45_000.0,
        };
        let benefits = vec![Benefit::new("Housing", 15_000.0)];
        let form = FormState::seeded(Some(&record), &benefits);
        assert_eq!(form.field(FieldId::KraPin).value(), "A123456789B");
        assert_eq!(form.field(FieldId::BasicSalary).value(), "45000");
        assert_eq!(form.summary().total, 15_000.0);
    }

    #[test]
    fn payload_mirror_matches_the_serialized_summary() {
        let rules = ValidationRules::default();
        let mut form = FormState::new();
        for _ in 0..5 {
            form.focus_next();
        }
        type_text(&mut form, &rules, "Medical");
        form.focus_next();
        type_text(&mut form, &rules, "2500");
        let payload = form.build_payload();
        assert_eq!(payload.benefits, vec![Benefit::new("Medical", 2500.0)]);
        assert_eq!(payload.benefits_json, form.summary().serialized);
    }
}
