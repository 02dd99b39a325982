use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;

use crate::domain::{Benefit, format_total};

use super::field::{TEXT_CAP, handle_text_edit};

/// How long a removed row lingers (dimmed) before it is swept, and how
/// long a freshly added row keeps its entrance highlight.
pub(crate) const ROW_EXIT_DELAY: Duration = Duration::from_millis(300);
pub(crate) const ROW_ENTER_FLASH: Duration = Duration::from_millis(300);

const AMOUNT_CAP: usize = 12;

/// One editable benefit line item. Rows are positional: indices are
/// reassigned whenever rows are added or removed and must not be held
/// across mutations.
#[derive(Debug, Clone)]
pub struct BenefitRow {
    name: String,
    amount: String,
    entered_at: Option<Instant>,
    leaving_since: Option<Instant>,
}

impl BenefitRow {
    fn blank() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            entered_at: None,
            leaving_since: None,
        }
    }

    fn seeded(benefit: &Benefit) -> Self {
        let mut row = Self::blank();
        row.name = benefit.name.clone();
        row.amount = benefit.amount.to_string();
        row
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn is_leaving(&self) -> bool {
        self.leaving_since.is_some()
    }

    /// Entrance highlight is one-shot: it reports true only within the
    /// flash window after the row was added.
    pub fn entrance_flash(&self, now: Instant) -> bool {
        self.entered_at
            .is_some_and(|at| now.duration_since(at) < ROW_ENTER_FLASH)
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.amount.clear();
    }

    pub(crate) fn edit_name(&mut self, key: &KeyEvent) -> bool {
        handle_text_edit(&mut self.name, key, TEXT_CAP)
    }

    pub(crate) fn edit_amount(&mut self, key: &KeyEvent) -> bool {
        handle_text_edit(&mut self.amount, key, AMOUNT_CAP)
    }

    pub(crate) fn replace_amount(&mut self, value: String) {
        self.amount = value;
    }

    /// A row contributes a benefit only when the trimmed name is
    /// non-empty and the amount parses to a positive number. Failed
    /// parses default to zero, which also excludes the row.
    fn entry(&self) -> Option<Benefit> {
        let name = self.name.trim();
        let amount = self.amount.trim().parse::<f64>().unwrap_or(0.0);
        if !name.is_empty() && amount > 0.0 {
            Some(Benefit::new(name, amount))
        } else {
            None
        }
    }
}

/// Recomputed snapshot of the benefit entries: the display total, the
/// entry count, and the serialized mirror the form submits.
#[derive(Debug, Clone, PartialEq)]
pub struct BenefitSummary {
    pub total: f64,
    pub count: usize,
    pub serialized: String,
}

impl Default for BenefitSummary {
    fn default() -> Self {
        Self {
            total: 0.0,
            count: 0,
            serialized: "[]".to_string(),
        }
    }
}

impl BenefitSummary {
    pub fn has_benefits(&self) -> bool {
        self.count > 0
    }

    pub fn total_display(&self) -> String {
        format_total(self.total)
    }
}

/// Outcome of a row removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRemoval {
    /// The row was marked leaving and will be swept after its exit
    /// delay; the summary refreshes then.
    Scheduled,
    /// It was the only row, so its fields were cleared in place.
    Cleared,
    /// The row was already on its way out.
    Ignored,
}

/// The ordered sequence of benefit rows. At least one row always
/// exists; removing the last one clears it instead.
#[derive(Debug, Clone)]
pub struct BenefitRows {
    rows: Vec<BenefitRow>,
}

impl Default for BenefitRows {
    fn default() -> Self {
        Self::new()
    }
}

impl BenefitRows {
    pub fn new() -> Self {
        Self {
            rows: vec![BenefitRow::blank()],
        }
    }

    pub fn seeded(entries: &[Benefit]) -> Self {
        if entries.is_empty() {
            return Self::new();
        }
        Self {
            rows: entries.iter().map(BenefitRow::seeded).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[BenefitRow] {
        &self.rows
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> Option<&mut BenefitRow> {
        self.rows.get_mut(index)
    }

    fn live_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_leaving()).count()
    }

    /// Appends a new empty row with an entrance flash and returns its
    /// index. No validation happens at creation; an empty row
    /// contributes nothing until filled.
    pub fn add_row(&mut self, now: Instant) -> usize {
        let mut row = BenefitRow::blank();
        row.entered_at = Some(now);
        self.rows.push(row);
        self.rows.len() - 1
    }

    pub fn remove_row(&mut self, index: usize, now: Instant) -> RowRemoval {
        let Some(row) = self.rows.get_mut(index) else {
            return RowRemoval::Ignored;
        };
        if row.is_leaving() {
            return RowRemoval::Ignored;
        }
        if self.live_count() > 1 {
            self.rows[index].leaving_since = Some(now);
            RowRemoval::Scheduled
        } else {
            self.rows[index].clear();
            RowRemoval::Cleared
        }
    }

    /// Scans all rows (including ones still animating out, which are
    /// still present) and collects the included entries in order.
    pub fn collect(&self) -> Vec<Benefit> {
        self.rows.iter().filter_map(BenefitRow::entry).collect()
    }

    /// Drops rows whose exit delay has passed and expires stale
    /// entrance flashes. Returns true when a row was actually removed,
    /// meaning the summary must be refreshed.
    pub fn sweep(&mut self, now: Instant) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| {
            row.leaving_since
                .is_none_or(|since| now.duration_since(since) < ROW_EXIT_DELAY)
        });
        for row in &mut self.rows {
            if row.entered_at.is_some() && !row.entrance_flash(now) {
                row.entered_at = None;
            }
        }
        if self.rows.is_empty() {
            self.rows.push(BenefitRow::blank());
        }
        self.rows.len() != before
    }

    /// Collapses to exactly one blank row.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.rows.push(BenefitRow::blank());
    }

    pub fn summarize(&self) -> BenefitSummary {
        let entries = self.collect();
        let total = entries.iter().map(|benefit| benefit.amount).sum();
        let serialized = serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string());
        BenefitSummary {
            total,
            count: entries.len(),
            serialized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(rows: &mut BenefitRows, index: usize, name: &str, amount: &str) {
        let row = rows.row_mut(index).expect("row");
        row.name = name.to_string();
        row.amount = amount.to_string();
    }

    #[test]
    fn collect_excludes_garbage_rows() {
        let now = Instant::now();
        let mut rows = BenefitRows::new();
        fill(&mut rows, 0, "Housing Allowance", "15000");
        let second = rows.add_row(now);
        fill(&mut rows, second, "   ", "2000");
        let third = rows.add_row(now);
        fill(&mut rows, third, "Transport", "not-a-number");
        let fourth = rows.add_row(now);
        fill(&mut rows, fourth, "Airtime", "-50");
        let fifth = rows.add_row(now);
        fill(&mut rows, fifth, "Medical", "2500.50");

        let entries = rows.collect();
        assert_eq!(
            entries,
            vec![
                Benefit::new("Housing Allowance", 15000.0),
                Benefit::new("Medical", 2500.5),
            ]
        );
    }

    #[test]
    fn summary_totals_and_serializes_included_entries() {
        let now = Instant::now();
        let mut rows = BenefitRows::new();
        fill(&mut rows, 0, "Housing", "15000");
        let second = rows.add_row(now);
        fill(&mut rows, second, "Medical", "2500");

        let summary = rows.summarize();
        assert_eq!(summary.total, 17_500.0);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_display(), "KSh 17,500");
        assert_eq!(
            summary.serialized,
            r#"[{"name":"Housing","amount":15000.0},{"name":"Medical","amount":2500.0}]"#
        );
        assert!(summary.has_benefits());
    }

    #[test]
    fn empty_rows_summarize_to_zero() {
        let rows = BenefitRows::new();
        let summary = rows.summarize();
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.serialized, "[]");
        assert!(!summary.has_benefits());
    }

    #[test]
    fn removing_the_last_row_clears_it_in_place() {
        let now = Instant::now();
        let mut rows = BenefitRows::new();
        fill(&mut rows, 0, "Housing", "15000");
        assert_eq!(rows.remove_row(0, now), RowRemoval::Cleared);
        assert_eq!(rows.len(), 1);
        assert!(rows.rows()[0].name().is_empty());
        assert!(rows.rows()[0].amount().is_empty());
    }

    #[test]
    fn scheduled_removal_sweeps_after_the_exit_delay() {
        let now = Instant::now();
        let mut rows = BenefitRows::new();
        fill(&mut rows, 0, "Housing", "15000");
        let second = rows.add_row(now);
        fill(&mut rows, second, "Medical", "2500");

        assert_eq!(rows.remove_row(second, now), RowRemoval::Scheduled);
        assert_eq!(rows.len(), 2, "leaving row lingers until swept");
        assert_eq!(rows.collect().len(), 2, "leaving row still counted");

        assert!(!rows.sweep(now + Duration::from_millis(100)));
        assert!(rows.sweep(now + ROW_EXIT_DELAY));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.summarize().total, 15_000.0);
    }

    #[test]
    fn double_removal_of_a_leaving_row_is_ignored() {
        let now = Instant::now();
        let mut rows = BenefitRows::new();
        rows.add_row(now);
        assert_eq!(rows.remove_row(1, now), RowRemoval::Scheduled);
        assert_eq!(rows.remove_row(1, now), RowRemoval::Ignored);
    }

    #[test]
    fn only_live_rows_count_toward_the_minimum() {
        let now = Instant::now();
        let mut rows = BenefitRows::new();
        let second = rows.add_row(now);
        assert_eq!(rows.remove_row(second, now), RowRemoval::Scheduled);
        // The remaining live row now behaves like the last one.
        assert_eq!(rows.remove_row(0, now), RowRemoval::Cleared);
    }

    #[test]
    fn entrance_flash_is_one_shot() {
        let now = Instant::now();
        let mut rows = BenefitRows::new();
        let index = rows.add_row(now);
        assert!(rows.rows()[index].entrance_flash(now));
        rows.sweep(now + ROW_ENTER_FLASH);
        assert!(!rows.rows()[index].entrance_flash(now + ROW_ENTER_FLASH));
    }

    #[test]
    fn reset_collapses_to_a_single_blank_row() {
        let now = Instant::now();
        let mut rows = BenefitRows::new();
        fill(&mut rows, 0, "Housing", "15000");
        rows.add_row(now);
        rows.add_row(now);
        rows.reset();
        assert_eq!(rows.len(), 1);
        assert!(rows.rows()[0].name().is_empty());
        assert_eq!(rows.summarize().total, 0.0);
    }
}
