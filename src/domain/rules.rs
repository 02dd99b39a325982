use regex::Regex;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const KRA_PIN_MESSAGE: &str = "KRA PIN must be AXXXXXXXXY format (e.g., A123456789B)";
pub const SALARY_MESSAGE: &str = "Salary must be between KSh 10,000 and KSh 1,000,000";

// Hardcoded business rules with no documented source; treated as
// configuration constants rather than derived values.
const KRA_PIN_PATTERN: &str = r"^A[0-9]{9}[A-Z]$";
const SALARY_MIN: f64 = 10_000.0;
const SALARY_MAX: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBounds {
    pub min: f64,
    pub max: f64,
}

/// Outcome of a single field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(String),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

/// The fixed validation rule set, constructed once at startup.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    kra_pin: Regex,
    pub salary: SalaryBounds,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            kra_pin: Regex::new(KRA_PIN_PATTERN).expect("fixed KRA PIN pattern"),
            salary: SalaryBounds {
                min: SALARY_MIN,
                max: SALARY_MAX,
            },
        }
    }
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks an already-typed value against the PIN pattern. The value
    /// is normalized the same way the input path normalizes it, so a
    /// lowercase PIN still passes. Empty values pass live validation;
    /// only the submit-time required check blocks them.
    pub fn check_kra_pin(&self, value: &str) -> Verdict {
        let pin = value.trim().to_uppercase();
        if pin.is_empty() || self.kra_pin.is_match(&pin) {
            Verdict::Valid
        } else {
            Verdict::Invalid(KRA_PIN_MESSAGE.to_string())
        }
    }

    /// Salary must parse and land in the inclusive bounds. A failed
    /// parse counts as a failed range check, never a panic.
    pub fn check_salary(&self, value: &str) -> Verdict {
        match value.trim().parse::<f64>() {
            Ok(salary) if salary >= self.salary.min && salary <= self.salary.max => Verdict::Valid,
            _ => Verdict::Invalid(SALARY_MESSAGE.to_string()),
        }
    }
}

/// 2-decimal canonicalization applied to numeric inputs on focus loss.
pub(crate) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Grouped, zero-decimal money display used by the benefits summary.
pub(crate) fn format_total(amount: f64) -> String {
    format!("KSh {}", group_thousands(amount.round() as i64))
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, ch) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
