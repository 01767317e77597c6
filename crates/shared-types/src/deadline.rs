use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rule::{CaseType, DayUnit};

// ---------------------------------------------------------------------------
// Computed Deadline
// ---------------------------------------------------------------------------

/// A deadline computed from one catalog rule.
///
/// Created fresh on every computation and owned by the caller. `result_date`
/// is never a weekend day and never a holiday of the calendar it was
/// computed against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deadline {
    pub rule_name: String,
    pub result_date: NaiveDate,
    pub description: String,
    pub offset_days: i32,
    pub unit: DayUnit,
    pub case_type: CaseType,
    pub base_date: NaiveDate,
    /// Candidate date before the landing-date adjustment.
    pub raw_date: NaiveDate,
}

impl Deadline {
    /// True when the landing-date adjustment moved the raw candidate.
    pub fn was_adjusted(&self) -> bool {
        self.raw_date != self.result_date
    }

    /// Days from `as_of` until the deadline. Negative when already past.
    pub fn days_remaining(&self, as_of: NaiveDate) -> i64 {
        (self.result_date - as_of).num_days()
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} [{:+} {}]",
            self.result_date,
            self.result_date.format("%a"),
            self.rule_name,
            self.offset_days,
            self.unit
        )?;
        if self.was_adjusted() {
            write!(f, " moved from {}", self.raw_date)?;
        }
        Ok(())
    }
}

/// Render deadlines as a fixed-width text table, one row per deadline, in the
/// order given.
pub fn format_deadline_table(deadlines: &[Deadline]) -> String {
    let name_width = deadlines
        .iter()
        .map(|d| d.rule_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Deadline".len());

    let mut out = format!(
        "{:<10}  {:<3}  {:<name_width$}  {:>6}  {:<8}  {}\n",
        "Date", "Day", "Deadline", "Offset", "Unit", "Description"
    );
    for d in deadlines {
        let mut description = d.description.clone();
        if d.was_adjusted() {
            description.push_str(&format!(" (landing day {} moved)", d.raw_date));
        }
        out.push_str(&format!(
            "{:<10}  {:<3}  {:<name_width$}  {:>+6}  {:<8}  {}\n",
            d.result_date.to_string(),
            d.result_date.format("%a").to_string(),
            d.rule_name,
            d.offset_days,
            d.unit.as_str(),
            description
        ));
    }
    out
}
