use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Largest offset magnitude a catalog rule may carry. Keeps the per-call
/// stepping cost bounded.
pub const MAX_OFFSET_DAYS: i32 = 3650;

// ---------------------------------------------------------------------------
// Case Type
// ---------------------------------------------------------------------------

/// Category of matter that selects which rule set applies.
///
/// Closed set: adding a case type means adding a variant here and a block of
/// rules to the catalog file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    Probate,
    Conservatorship,
    TrustLitigation,
    Motion,
}

impl CaseType {
    pub const ALL: [CaseType; 4] = [
        Self::Probate,
        Self::Conservatorship,
        Self::TrustLitigation,
        Self::Motion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Probate => "probate",
            Self::Conservatorship => "conservatorship",
            Self::TrustLitigation => "trust_litigation",
            Self::Motion => "motion",
        }
    }

    /// Human-readable label used in calendar and task titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Probate => "Probate",
            Self::Conservatorship => "Conservatorship",
            Self::TrustLitigation => "Trust Litigation",
            Self::Motion => "Motion",
        }
    }

    /// Parse a case-type identifier. Case-insensitive; hyphens, spaces and
    /// underscores are interchangeable (`trust-litigation`, `Trust Litigation`).
    pub fn from_str_opt(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "probate" => Some(Self::Probate),
            "conservatorship" => Some(Self::Conservatorship),
            "trust_litigation" => Some(Self::TrustLitigation),
            "motion" => Some(Self::Motion),
            _ => None,
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Day Unit
// ---------------------------------------------------------------------------

/// How a rule's offset is counted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DayUnit {
    /// Every day counts.
    Calendar,
    /// Only days that are neither weekend nor court holiday count.
    Business,
}

impl DayUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Business => "business",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calendar" => Some(Self::Calendar),
            "business" | "court" => Some(Self::Business),
            _ => None,
        }
    }
}

impl fmt::Display for DayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Deadline Rule
// ---------------------------------------------------------------------------

/// One entry of a case type's rule set.
///
/// The sign of `offset_days` encodes direction: positive counts forward from
/// the base date (filing-triggered deadlines), negative counts backward
/// (deadlines expressed as "N days before the hearing").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct DeadlineRule {
    #[validate(length(min = 1, max = 120, message = "rule name must be 1-120 characters"))]
    pub name: String,
    pub offset_days: i32,
    pub unit: DayUnit,
    #[serde(default)]
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: String,
}

impl DeadlineRule {
    pub fn new(
        name: impl Into<String>,
        offset_days: i32,
        unit: DayUnit,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            offset_days,
            unit,
            description: description.into(),
        }
    }

    pub fn offset_in_bounds(&self) -> bool {
        self.offset_days.unsigned_abs() <= MAX_OFFSET_DAYS as u32
    }

    /// Short offset summary, e.g. `-16 business days` or `+120 calendar days`.
    pub fn offset_summary(&self) -> String {
        let plural = if self.offset_days.abs() == 1 { "day" } else { "days" };
        format!("{:+} {} {}", self.offset_days, self.unit, plural)
    }
}
