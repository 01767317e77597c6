//! Hand computed deadlines to calendar and task collaborators
//!
//! The engine never writes anywhere. Callers map its output into the record
//! shapes the collaborators expect and push them through the traits below,
//! after the computation has finished.

use chrono::NaiveDate;
use shared_types::{AppError, CalendarEntryDraft, Deadline, TaskDraft, TaskPriority};

/// Category attached to every calendar entry and task created from a deadline.
pub const DEADLINE_CATEGORY: &str = "deadline";

/// Receives calendar entries, e.g. the application's calendar store.
pub trait CalendarCollaborator {
    fn add_entry(&mut self, entry: CalendarEntryDraft) -> Result<(), AppError>;
}

/// Receives tasks, e.g. the application's to-do list.
pub trait TaskCollaborator {
    fn add_task(&mut self, task: TaskDraft) -> Result<(), AppError>;
}

fn title(deadline: &Deadline) -> String {
    format!("{} ({})", deadline.rule_name, deadline.case_type.label())
}

fn body(deadline: &Deadline) -> String {
    let mut text = format!(
        "{} [{:+} {} days from {}]",
        deadline.description, deadline.offset_days, deadline.unit, deadline.base_date
    );
    if deadline.was_adjusted() {
        text.push_str(&format!(
            "; landing day {} fell on a weekend or court holiday",
            deadline.raw_date
        ));
    }
    text.trim_start().to_string()
}

/// All-day calendar entry for a deadline.
pub fn to_calendar_entry(deadline: &Deadline, client_reference: &str) -> CalendarEntryDraft {
    CalendarEntryDraft {
        title: title(deadline),
        start_date: deadline.result_date,
        end_date: deadline.result_date,
        category: DEADLINE_CATEGORY.to_string(),
        description: body(deadline),
        client_reference: client_reference.to_string(),
    }
}

/// Task for a deadline; priority reflects how close the deadline is to `as_of`.
pub fn to_task(deadline: &Deadline, client_reference: &str, as_of: NaiveDate) -> TaskDraft {
    TaskDraft {
        title: title(deadline),
        description: body(deadline),
        due_date: deadline.result_date,
        priority: TaskPriority::from_days_remaining(deadline.days_remaining(as_of)),
        category: DEADLINE_CATEGORY.to_string(),
        client_reference: client_reference.to_string(),
    }
}

/// Outcome of [`publish`].
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    pub calendar_entries: usize,
    pub tasks: usize,
    /// First collaborator failure; publishing stops there.
    pub error: Option<AppError>,
}

impl PublishReport {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Push each deadline to the calendar collaborator and then to the task
/// collaborator, in the order given. Stops at the first failure and reports
/// how many records were delivered before it.
pub fn publish(
    deadlines: &[Deadline],
    client_reference: &str,
    as_of: NaiveDate,
    calendar: &mut dyn CalendarCollaborator,
    tasks: &mut dyn TaskCollaborator,
) -> PublishReport {
    let mut report = PublishReport {
        calendar_entries: 0,
        tasks: 0,
        error: None,
    };

    for deadline in deadlines {
        if let Err(e) = calendar.add_entry(to_calendar_entry(deadline, client_reference)) {
            tracing::error!(
                error = %e,
                rule = %deadline.rule_name,
                "Calendar collaborator rejected entry"
            );
            report.error = Some(e);
            return report;
        }
        report.calendar_entries += 1;

        if let Err(e) = tasks.add_task(to_task(deadline, client_reference, as_of)) {
            tracing::error!(
                error = %e,
                rule = %deadline.rule_name,
                "Task collaborator rejected task"
            );
            report.error = Some(e);
            return report;
        }
        report.tasks += 1;
    }

    tracing::info!(
        client_reference,
        calendar_entries = report.calendar_entries,
        tasks = report.tasks,
        "Published deadlines"
    );
    report
}
