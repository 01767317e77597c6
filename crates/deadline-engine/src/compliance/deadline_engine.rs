//! Case-type deadline computation engine
//!
//! For a case type and a base (trigger) date, evaluates every rule of the
//! case type's rule set:
//! 1. Raw candidate: calendar-day add or business-day step per the rule unit
//! 2. Landing-date adjustment: a candidate on a weekend or court holiday
//!    moves forward to the next business day (day-0 rules included)
//! 3. Stable sort ascending by result date; ties keep catalog order
//!
//! The computation is a pure function of (case type, base date, catalog,
//! calendar). Unknown case types and unparseable base dates fail the whole
//! call.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use shared_types::{CaseType, DayUnit, Deadline, DeadlineError, DeadlineRule, HolidayCalendar};

use super::catalog::RuleCatalog;
use super::date_math::{add_calendar_days, next_business_day, step_business_days};

/// Deadline engine bound to one rule catalog and one holiday calendar.
///
/// Holds only read-only configuration, so a single engine can be shared
/// across threads (`&DeadlineEngine` or `Arc<DeadlineEngine>`).
#[derive(Debug, Clone)]
pub struct DeadlineEngine {
    catalog: RuleCatalog,
    calendar: HolidayCalendar,
}

impl DeadlineEngine {
    pub fn new(catalog: RuleCatalog, calendar: HolidayCalendar) -> Self {
        Self { catalog, calendar }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Compute all deadlines for a case-type identifier and base date given as
    /// strings, e.g. `("motion", "2025-09-05")`.
    #[tracing::instrument(skip(self), fields(jurisdiction = %self.calendar.jurisdiction()))]
    pub fn compute_deadlines(
        &self,
        case_type: &str,
        base_date: &str,
    ) -> Result<Vec<Deadline>, DeadlineError> {
        let case_type = CaseType::from_str_opt(case_type)
            .filter(|ct| self.catalog.contains(*ct))
            .ok_or_else(|| {
                tracing::warn!(case_type, "Unknown case type");
                DeadlineError::unknown_case_type(case_type)
            })?;
        let base_date = parse_base_date(base_date).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected base date");
        })?;
        self.compute(case_type, base_date)
    }

    /// Typed entry point.
    pub fn compute(
        &self,
        case_type: CaseType,
        base_date: NaiveDate,
    ) -> Result<Vec<Deadline>, DeadlineError> {
        compute_deadlines(case_type, base_date, &self.catalog, &self.calendar)
    }
}

/// Compute every deadline of `case_type` from `base_date`.
pub fn compute_deadlines(
    case_type: CaseType,
    base_date: NaiveDate,
    catalog: &RuleCatalog,
    calendar: &HolidayCalendar,
) -> Result<Vec<Deadline>, DeadlineError> {
    let rules = catalog
        .rules_for(case_type)
        .ok_or_else(|| DeadlineError::unknown_case_type(case_type.as_str()))?;

    let mut deadlines = rules
        .iter()
        .map(|rule| evaluate_rule(rule, case_type, base_date, calendar))
        .collect::<Result<Vec<_>, _>>()?;

    // Vec::sort_by_key is stable: equal dates keep catalog order.
    deadlines.sort_by_key(|d| d.result_date);

    let uncovered = uncovered_years(&deadlines, calendar);
    if !uncovered.is_empty() {
        tracing::warn!(
            case_type = %case_type,
            %base_date,
            jurisdiction = calendar.jurisdiction(),
            years = ?uncovered,
            "Holiday calendar does not cover every deadline year"
        );
    }

    tracing::info!(
        case_type = %case_type,
        %base_date,
        count = deadlines.len(),
        "Computed deadlines"
    );
    Ok(deadlines)
}

/// Years touched by a raw or result date that `calendar` has no holiday data
/// for, ascending.
pub fn uncovered_years(deadlines: &[Deadline], calendar: &HolidayCalendar) -> Vec<i32> {
    deadlines
        .iter()
        .flat_map(|d| [d.raw_date.year(), d.result_date.year()])
        .filter(|year| !calendar.covers_year(*year))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Evaluate a single rule against a base date.
pub fn evaluate_rule(
    rule: &DeadlineRule,
    case_type: CaseType,
    base_date: NaiveDate,
    calendar: &HolidayCalendar,
) -> Result<Deadline, DeadlineError> {
    let out_of_range = || {
        DeadlineError::invalid_base_date(
            base_date.to_string(),
            format!(
                "rule '{}' ({}) leaves the supported date range",
                rule.name,
                rule.offset_summary()
            ),
        )
    };

    let raw_date = match rule.unit {
        DayUnit::Calendar => add_calendar_days(base_date, rule.offset_days),
        DayUnit::Business => step_business_days(base_date, rule.offset_days, calendar),
    }
    .ok_or_else(out_of_range)?;

    let result_date = next_business_day(raw_date, calendar).ok_or_else(out_of_range)?;

    tracing::debug!(
        rule = %rule.name,
        offset_days = rule.offset_days,
        unit = %rule.unit,
        %raw_date,
        %result_date,
        "Evaluated rule"
    );

    Ok(Deadline {
        rule_name: rule.name.clone(),
        result_date,
        description: rule.description.clone(),
        offset_days: rule.offset_days,
        unit: rule.unit,
        case_type,
        base_date,
        raw_date,
    })
}

/// Normalize a base date to a calendar date.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, naive `YYYY-MM-DDTHH:MM:SS` timestamps
/// and RFC 3339 timestamps; time-of-day is dropped (RFC 3339 keeps the date
/// in its stated offset).
pub fn parse_base_date(input: &str) -> Result<NaiveDate, DeadlineError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DeadlineError::invalid_base_date(input, "base date is empty"));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts.date());
        }
    }

    Err(DeadlineError::invalid_base_date(
        input,
        "expected YYYY-MM-DD, MM/DD/YYYY or an RFC 3339 timestamp",
    ))
}
