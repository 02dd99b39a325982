pub(crate) mod banner;
mod draft;
mod options;
mod payroll_ui;
mod runtime;
mod status;
mod terminal;

pub use options::UiOptions;
pub use payroll_ui::PayrollUI;
