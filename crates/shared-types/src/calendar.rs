use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Record handed to the calendar collaborator for one computed deadline.
///
/// Deadlines are all-day entries: `start_date` and `end_date` are the same
/// day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntryDraft {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: String,
    pub description: String,
    /// Identifier of the client/matter in the surrounding application.
    pub client_reference: String,
}
