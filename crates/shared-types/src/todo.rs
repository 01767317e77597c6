use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency attached to a task created from a deadline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Priority for a deadline `days_remaining` days away. Overdue and
    /// same-week deadlines are high priority.
    pub fn from_days_remaining(days_remaining: i64) -> Self {
        match days_remaining {
            i64::MIN..=7 => Self::High,
            8..=30 => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record handed to the task collaborator for one computed deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub category: String,
    pub client_reference: String,
}
