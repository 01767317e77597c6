use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rule::{CaseType, DayUnit, DeadlineRule};

/// Config file format version understood by this build.
pub const CONFIG_FORMAT_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_FORMAT_VERSION
}

// ---------------------------------------------------------------------------
// rules.toml
// ---------------------------------------------------------------------------

/// Top-level structure of `rules.toml`.
///
/// Rules are listed flat; file order is catalog order within a case type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuleCatalogFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleEntry>,
}

/// One `[[rule]]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleEntry {
    pub case_type: CaseType,
    pub name: String,
    pub offset_days: i32,
    pub unit: DayUnit,
    #[serde(default)]
    pub description: String,
}

impl RuleEntry {
    pub fn into_rule(self) -> (CaseType, DeadlineRule) {
        (
            self.case_type,
            DeadlineRule {
                name: self.name,
                offset_days: self.offset_days,
                unit: self.unit,
                description: self.description,
            },
        )
    }
}

// ---------------------------------------------------------------------------
// holidays.toml
// ---------------------------------------------------------------------------

/// Top-level structure of `holidays.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HolidayFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, rename = "calendar")]
    pub calendars: Vec<HolidayCalendarEntry>,
}

/// One `[[calendar]]` table: the holidays of a jurisdiction for one year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HolidayCalendarEntry {
    pub jurisdiction: String,
    pub year: i32,
    /// Merge the generated U.S. federal holidays for `year`.
    #[serde(default)]
    pub include_federal: bool,
    #[serde(default)]
    pub holidays: Vec<HolidayEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HolidayEntry {
    pub date: NaiveDate,
    pub name: String,
}
