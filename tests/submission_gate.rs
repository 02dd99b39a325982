use std::time::{Duration, Instant};

use payrollui::{
    Benefit, EmployeeRecord, FieldId, Focus, FormState, RowRemoval, Validity, ValidationRules,
};

fn filled_form() -> FormState {
    let record = EmployeeRecord {
        employee_id: "EMP-042".into(),
        kra_pin: "A987654321Z".into(),
        first_name: "Grace".into(),
        last_name: "Njeri".into(),
        basic_salary: 85_000.0,
    };
    let benefits = vec![
        Benefit::new("Housing Allowance", 20_000.0),
        Benefit::new("Medical", 7_500.0),
    ];
    FormState::seeded(Some(&record), &benefits)
}

#[test]
fn empty_form_fails_the_gate_with_every_field_marked() {
    let rules = ValidationRules::default();
    let mut form = FormState::new();
    let check = form.run_submit_checks(&rules);
    assert!(!check.passed());
    assert_eq!(check.first_empty, Some(FieldId::EmployeeId));
    for id in FieldId::ALL {
        assert_eq!(form.field(id).validity(), Validity::Invalid);
        assert_eq!(form.field(id).message(), Some("This field is required"));
    }
}

#[test]
fn filled_form_passes_the_gate_and_builds_the_payload() {
    let rules = ValidationRules::default();
    let mut form = filled_form();
    let check = form.run_submit_checks(&rules);
    assert!(check.passed());

    let payload = form.build_payload();
    assert_eq!(payload.employee.employee_id, "EMP-042");
    assert_eq!(payload.employee.basic_salary, 85_000.0);
    assert_eq!(payload.benefits.len(), 2);
    assert_eq!(
        payload.benefits_json,
        serde_json::to_string(&payload.benefits).expect("benefit list serializes")
    );
}

#[test]
fn summary_display_is_grouped_with_zero_decimals() {
    let form = filled_form();
    assert_eq!(form.summary().total, 27_500.0);
    assert_eq!(form.summary().total_display(), "KSh 27,500");
    assert!(form.summary().has_benefits());
}

#[test]
fn row_lifecycle_keeps_at_least_one_row() {
    let now = Instant::now();
    let mut form = filled_form();
    assert_eq!(form.benefits().len(), 2);

    // Removing through the focus path: second row, then the survivor.
    form.focus_field(FieldId::EmployeeId);
    for _ in 0..8 {
        form.focus_next();
    }
    assert_eq!(form.focus(), Focus::BenefitAmount(1));
    assert_eq!(form.remove_focused_row(now), RowRemoval::Scheduled);
    form.sweep(now + Duration::from_millis(300));
    assert_eq!(form.benefits().len(), 1);
    assert_eq!(form.summary().total, 20_000.0);

    while !matches!(form.focus(), Focus::BenefitName(_) | Focus::BenefitAmount(_)) {
        form.focus_next();
    }
    assert_eq!(form.remove_focused_row(now), RowRemoval::Cleared);
    assert_eq!(form.benefits().len(), 1);
    assert_eq!(form.summary().total, 0.0);
    assert_eq!(form.summary().serialized, "[]");
}

#[test]
fn reset_always_yields_one_blank_row_and_zero_total() {
    let now = Instant::now();
    let mut form = filled_form();
    form.add_benefit_row(now);
    form.add_benefit_row(now);
    form.reset();
    assert_eq!(form.benefits().len(), 1);
    assert_eq!(form.summary().total, 0.0);
    for id in FieldId::ALL {
        assert!(form.field(id).is_blank());
        assert_eq!(form.field(id).validity(), Validity::Unset);
    }
}

#[test]
fn kra_pin_rules_match_the_fixed_pattern() {
    let rules = ValidationRules::default();
    assert!(rules.check_kra_pin("A123456789B").is_valid());
    assert!(rules.check_kra_pin("a123456789b").is_valid());
    assert!(!rules.check_kra_pin("A12345678B").is_valid());
    assert!(!rules.check_kra_pin("B123456789C").is_valid());
}

#[test]
fn salary_rules_hold_at_the_bounds() {
    let rules = ValidationRules::default();
    assert!(!rules.check_salary("9999").is_valid());
    assert!(rules.check_salary("10000").is_valid());
    assert!(rules.check_salary("1000000").is_valid());
    assert!(!rules.check_salary("1000001").is_valid());
}
