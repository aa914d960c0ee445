//! Ordering rules applied to a single field edit.
//!
//! Checks run on every edit rather than on submit. At most one violation is
//! reported per edit and the offending field is cleared in place.

use crate::errors::{TrackerError, TrackerResult};
use crate::models::{Field, Weekday, WeekdaySchedule};
use crate::notice::Notice;
use crate::time::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    ExitWithoutEntry,
    ExitBeforeEntry,
    EntryBeforePreviousExit,
}

impl Violation {
    pub fn notice(self) -> Notice {
        match self {
            Violation::ExitWithoutEntry => Notice::exit_without_entry(),
            Violation::ExitBeforeEntry => Notice::exit_before_entry(),
            Violation::EntryBeforePreviousExit => Notice::entry_before_previous_exit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// The edit stands; the record is still open or blank.
    Accepted,
    /// The edit stands and the record now has both endpoints.
    Completed,
    /// A field was cleared.
    Rejected(Violation),
}

pub fn apply_edit(
    day: Weekday,
    schedule: &mut WeekdaySchedule,
    index: usize,
    field: Field,
    value: Option<ClockTime>,
) -> TrackerResult<Validation> {
    let previous_exit = index
        .checked_sub(1)
        .and_then(|prev| schedule.get(prev))
        .and_then(|prev| prev.exit);

    let record = schedule
        .get_mut(index)
        .ok_or(TrackerError::RecordNotFound { day, index })?;

    *record.field_mut(field) = value;

    // Exit implies entry.
    let Some(entry) = record.entry else {
        let had_exit = record.exit.take().is_some();
        return Ok(if had_exit && field == Field::Exit {
            Validation::Rejected(Violation::ExitWithoutEntry)
        } else {
            Validation::Accepted
        });
    };

    if record.exit.is_some_and(|exit| exit < entry) {
        record.exit = None;
        return Ok(Validation::Rejected(Violation::ExitBeforeEntry));
    }

    if previous_exit.is_some_and(|prev| entry < prev) {
        record.clear();
        return Ok(Validation::Rejected(Violation::EntryBeforePreviousExit));
    }

    Ok(if record.is_complete() {
        Validation::Completed
    } else {
        Validation::Accepted
    })
}
