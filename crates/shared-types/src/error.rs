use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::rule::CaseType;

// ---------------------------------------------------------------------------
// Engine errors
// ---------------------------------------------------------------------------

/// Failure of a single deadline computation. Either error aborts the whole
/// call; no partial deadline list is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineError {
    /// The case-type identifier has no rule set in the catalog.
    UnknownCaseType { case_type: String },
    /// The base date could not be normalized to a calendar date, or date
    /// arithmetic from it left the representable range.
    InvalidBaseDate { input: String, reason: String },
}

impl DeadlineError {
    pub fn unknown_case_type(case_type: impl Into<String>) -> Self {
        Self::UnknownCaseType {
            case_type: case_type.into(),
        }
    }

    pub fn invalid_base_date(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBaseDate {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DeadlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCaseType { case_type } => {
                write!(f, "unknown case type '{}'", case_type)
            }
            Self::InvalidBaseDate { input, reason } => {
                write!(f, "invalid base date '{}': {}", input, reason)
            }
        }
    }
}

impl std::error::Error for DeadlineError {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Failure while loading or validating the rule catalog or holiday data.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse { path: String, message: String },
    UnsupportedVersion { path: String, version: u32 },
    DuplicateRule { case_type: CaseType, name: String },
    InvalidRule {
        case_type: CaseType,
        name: String,
        field_errors: HashMap<String, String>,
    },
    OffsetOutOfRange { case_type: CaseType, name: String, offset_days: i32 },
    DuplicateCalendar { jurisdiction: String, year: i32 },
    HolidayOutsideYear { jurisdiction: String, year: i32, date: String },
    UnknownJurisdiction { jurisdiction: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read {}: {}", path, message),
            Self::Parse { path, message } => write!(f, "cannot parse {}: {}", path, message),
            Self::UnsupportedVersion { path, version } => {
                write!(f, "{}: unsupported config version {}", path, version)
            }
            Self::DuplicateRule { case_type, name } => {
                write!(f, "duplicate rule '{}' in case type {}", name, case_type)
            }
            Self::InvalidRule {
                case_type, name, ..
            } => write!(f, "invalid rule '{}' in case type {}", name, case_type),
            Self::OffsetOutOfRange {
                case_type,
                name,
                offset_days,
            } => write!(
                f,
                "rule '{}' in case type {} has offset {} outside +/-{} days",
                name,
                case_type,
                offset_days,
                crate::rule::MAX_OFFSET_DAYS
            ),
            Self::DuplicateCalendar { jurisdiction, year } => {
                write!(f, "holiday calendar {} {} listed twice", jurisdiction, year)
            }
            Self::HolidayOutsideYear {
                jurisdiction,
                year,
                date,
            } => write!(
                f,
                "holiday {} is outside the {} calendar for {}",
                date, jurisdiction, year
            ),
            Self::UnknownJurisdiction { jurisdiction } => {
                write!(f, "no holiday calendar for jurisdiction '{}'", jurisdiction)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Transport-facing error
// ---------------------------------------------------------------------------

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Structured error for whatever transport wraps the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::NotFound,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::BadRequest,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::InternalError,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    /// HTTP-style status code for transports that want one.
    pub fn status_code(&self) -> u16 {
        match self.kind {
            AppErrorKind::NotFound => 404,
            AppErrorKind::BadRequest => 400,
            AppErrorKind::ValidationError => 422,
            AppErrorKind::InternalError => 500,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<DeadlineError> for AppError {
    fn from(err: DeadlineError) -> Self {
        match err {
            DeadlineError::UnknownCaseType { .. } => AppError::not_found(err.to_string()),
            DeadlineError::InvalidBaseDate { .. } => AppError::bad_request(err.to_string()),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidRule {
                ref field_errors, ..
            } => AppError::validation(err.to_string(), field_errors.clone()),
            ConfigError::UnknownJurisdiction { .. } => AppError::not_found(err.to_string()),
            _ => AppError::internal(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::validation("Validation failed", field_error_messages(&errors))
    }
}

/// Flatten validator output to one message per field.
pub fn field_error_messages(errors: &validator::ValidationErrors) -> HashMap<String, String> {
    let mut field_errors = HashMap::new();
    for (field, errs) in errors.field_errors() {
        if let Some(first) = errs.first() {
            let msg = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            field_errors.insert(field.to_string(), msg);
        }
    }
    field_errors
}
