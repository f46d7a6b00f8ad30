//! Construction of the agency submission payload.

use super::outcome::SoftFailure;
use crate::connect::domain::{AgencyTask, PersonId, TaskId, TimesheetFields, TrackerEntry};
use chrono::DateTime;

/// Seconds per hour, for the decimal-hours conversion.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Finds the job-scoped task whose display name equals the mapped name.
///
/// Matching is exact; the first match wins.
#[must_use]
pub fn match_task(tasks: &[AgencyTask], name: &str) -> Option<TaskId> {
    tasks.iter().find(|task| task.name == name).map(|task| task.id)
}

/// Builds the timesheet field set from a tracker entry.
///
/// The day is the entry's UTC timestamp truncated to its date; hours are
/// the logged seconds divided by 3600.
///
/// # Errors
///
/// Returns [`SoftFailure::MissingReference`] when the entry lacks the
/// client reference, job reference, or a valid timestamp.
pub fn build_fields(
    entry: &TrackerEntry,
    person_id: PersonId,
    task_id: TaskId,
) -> Result<TimesheetFields, SoftFailure> {
    let client_ref = entry
        .project
        .client
        .external_id
        .clone()
        .ok_or(SoftFailure::MissingReference("client reference"))?;
    let job_ref = entry
        .project
        .external_id
        .clone()
        .ok_or(SoftFailure::MissingReference("job reference"))?;
    let day = DateTime::from_timestamp(entry.timestamp, 0)
        .ok_or(SoftFailure::MissingReference("timestamp"))?
        .date_naive();

    #[expect(
        clippy::cast_precision_loss,
        reason = "logged durations are far below the 2^52-second precision limit"
    )]
    let hours = entry.duration as f64 / SECONDS_PER_HOUR;

    Ok(TimesheetFields {
        client_ref,
        job_ref,
        task_id,
        person_id,
        hours,
        day,
        note: entry.note.clone(),
    })
}
