use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Maximum length for free-text inputs, matching the form contract.
pub(crate) const TEXT_CAP: usize = 50;
/// A KRA PIN is always 11 characters; longer input is never useful.
const KRA_PIN_CAP: usize = 11;

/// The fixed required identifiers of the employee form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    EmployeeId,
    KraPin,
    FirstName,
    LastName,
    BasicSalary,
}

impl FieldId {
    pub const ALL: [FieldId; 5] = [
        FieldId::EmployeeId,
        FieldId::KraPin,
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::BasicSalary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::EmployeeId => "Employee ID",
            FieldId::KraPin => "KRA PIN",
            FieldId::FirstName => "First Name",
            FieldId::LastName => "Last Name",
            FieldId::BasicSalary => "Basic Salary (KSh)",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FieldId::BasicSalary)
    }

    pub(crate) fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|id| *id == self)
            .unwrap_or_default()
    }
}

/// Per-field validation state. `Valid` and `Invalid` are mutually
/// exclusive presentation classes; `Unset` is the untouched default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Unset,
    Valid,
    Invalid,
}

#[derive(Debug, Clone)]
pub struct FieldState {
    pub id: FieldId,
    buffer: String,
    validity: Validity,
    message: Option<String>,
}

impl FieldState {
    pub fn new(id: FieldId) -> Self {
        Self {
            id,
            buffer: String::new(),
            validity: Validity::Unset,
            message: None,
        }
    }

    pub(crate) fn seeded(id: FieldId, value: impl Into<String>) -> Self {
        let mut field = Self::new(id);
        field.buffer = value.into();
        field.normalize();
        field
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn trimmed(&self) -> &str {
        self.buffer.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Applies a validity state and its inline message, replacing
    /// whichever class was set before.
    pub fn set_state(&mut self, validity: Validity, message: Option<String>) {
        self.validity = validity;
        self.message = message;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.validity = Validity::Unset;
        self.message = None;
    }

    /// Overwrites the buffer without touching validity, used by the
    /// focus-loss canonicalization pass.
    pub(crate) fn replace_value(&mut self, value: String) {
        self.buffer = value;
    }

    /// Routes a key into the text buffer. Returns whether the buffer
    /// changed, so the caller can re-run live validation.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let cap = if self.id == FieldId::KraPin {
            KRA_PIN_CAP
        } else {
            TEXT_CAP
        };
        let changed = handle_text_edit(&mut self.buffer, key, cap);
        if changed {
            self.normalize();
        }
        changed
    }

    fn normalize(&mut self) {
        if self.id == FieldId::KraPin {
            self.buffer = self.buffer.trim().to_uppercase();
        }
    }
}

/// Shared text-editing rules for every input: printable characters
/// append (up to the cap), Backspace pops, Delete clears, and
/// Ctrl-modified characters are left for the command layer.
pub(crate) fn handle_text_edit(buffer: &mut String, key: &KeyEvent, cap: usize) -> bool {
    match key.code {
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            if buffer.chars().count() >= cap {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            if buffer.is_empty() {
                false
            } else {
                buffer.clear();
                true
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)
    }

    #[test]
    fn rejects_control_characters() {
        let mut field = FieldState::new(FieldId::FirstName);
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(!field.handle_key(&ctrl_a));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn kra_pin_is_uppercased_on_every_keystroke() {
        let mut field = FieldState::new(FieldId::KraPin);
        for ch in "a123456789b".chars() {
            field.handle_key(&press(ch));
        }
        assert_eq!(field.value(), "A123456789B");
    }

    #[test]
    fn kra_pin_caps_at_eleven_characters() {
        let mut field = FieldState::new(FieldId::KraPin);
        for ch in "A123456789BXYZ".chars() {
            field.handle_key(&press(ch));
        }
        assert_eq!(field.value().len(), 11);
    }

    #[test]
    fn backspace_and_delete_edit_the_buffer() {
        let mut field = FieldState::new(FieldId::EmployeeId);
        field.handle_key(&press('E'));
        field.handle_key(&press('1'));
        assert!(field.handle_key(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
        assert_eq!(field.value(), "E");
        assert!(field.handle_key(&KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE)));
        assert!(field.is_blank());
        assert!(!field.handle_key(&KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE)));
    }

    #[test]
    fn set_state_replaces_the_previous_class() {
        let mut field = FieldState::new(FieldId::LastName);
        field.set_state(Validity::Invalid, Some("This field is required".into()));
        assert_eq!(field.validity(), Validity::Invalid);
        field.set_state(Validity::Valid, None);
        assert_eq!(field.validity(), Validity::Valid);
        assert!(field.message().is_none());
    }
}
