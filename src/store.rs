use crate::errors::{TrackerError, TrackerResult};
use crate::models::{Field, Weekday, WeeklyState};
use crate::notice::Notice;
use crate::time::ClockTime;
use crate::validator::{Validation, apply_edit};
use serde::Serialize;
use tracing::{debug, info};

/// A non-blank record waiting for the user to confirm its deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PendingDeletion {
    #[default]
    None,
    Pending { day: Weekday, index: usize },
}

/// What the persistence capability must do after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persist {
    Nothing,
    Write,
    Erase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub persist: Persist,
}

impl Outcome {
    fn saved(notice: Option<Notice>) -> Self {
        Self {
            notice,
            persist: Persist::Write,
        }
    }

    fn refused(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            persist: Persist::Nothing,
        }
    }

    fn unchanged() -> Self {
        Self {
            notice: None,
            persist: Persist::Nothing,
        }
    }
}

/// Sole owner of the weekly state. Every mutation goes through here.
#[derive(Debug, Clone, Default)]
pub struct WeeklyStore {
    state: WeeklyState,
    pending: PendingDeletion,
}

impl WeeklyStore {
    pub fn from_state(state: WeeklyState) -> Self {
        Self {
            state,
            pending: PendingDeletion::None,
        }
    }

    pub fn state(&self) -> &WeeklyState {
        &self.state
    }

    pub fn pending(&self) -> PendingDeletion {
        self.pending
    }

    pub fn update(
        &mut self,
        day: Weekday,
        index: usize,
        field: Field,
        value: Option<ClockTime>,
    ) -> TrackerResult<Outcome> {
        let validation = apply_edit(day, &mut self.state[day], index, field, value)?;
        debug!(%day, index, ?field, ?validation, "record edited");

        let notice = match validation {
            Validation::Accepted => None,
            Validation::Completed => {
                self.sweep_incomplete();
                Some(Notice::record_saved())
            }
            Validation::Rejected(violation) => {
                info!(%day, index, ?violation, "edit rejected");
                Some(violation.notice())
            }
        };

        self.release_blank_pending();
        Ok(Outcome::saved(notice))
    }

    pub fn add_record(&mut self, day: Weekday) -> Outcome {
        let schedule = &mut self.state[day];
        let last = schedule.last();

        if last.is_incomplete() {
            info!(%day, "add refused, previous record incomplete");
            return Outcome::refused(Notice::previous_incomplete());
        }
        if last.is_blank() {
            info!(%day, "add refused, previous record empty");
            return Outcome::refused(Notice::previous_empty());
        }

        schedule.push_blank();
        debug!(%day, records = schedule.len(), "record added");
        Outcome::saved(None)
    }

    /// Non-blank records are parked until [`confirm_delete_record`](Self::confirm_delete_record).
    pub fn delete_record(&mut self, day: Weekday, index: usize) -> TrackerResult<Outcome> {
        let schedule = &mut self.state[day];
        let record = schedule
            .get(index)
            .ok_or(TrackerError::RecordNotFound { day, index })?;

        if !record.is_blank() {
            self.pending = PendingDeletion::Pending { day, index };
            debug!(%day, index, "deletion awaiting confirmation");
            return Ok(Outcome::unchanged());
        }

        if schedule.remove(index).is_none() {
            info!(%day, "delete refused, last record of the day");
            return Ok(Outcome::refused(Notice::last_record_kept()));
        }

        // Indices after the removed slot shifted.
        if let PendingDeletion::Pending { day: pending_day, index: pending_index } = self.pending {
            if pending_day == day && pending_index == index {
                self.pending = PendingDeletion::None;
            } else if pending_day == day && pending_index > index {
                self.pending = PendingDeletion::Pending {
                    day,
                    index: pending_index - 1,
                };
            }
        }

        debug!(%day, index, "blank record removed");
        Ok(Outcome::saved(None))
    }

    /// Clears the parked record in place; the slot itself stays.
    pub fn confirm_delete_record(&mut self) -> Outcome {
        let PendingDeletion::Pending { day, index } = std::mem::take(&mut self.pending) else {
            return Outcome::unchanged();
        };

        match self.state[day].get_mut(index) {
            Some(record) => {
                record.clear();
                debug!(%day, index, "record cleared");
                Outcome::saved(None)
            }
            None => {
                debug!(%day, index, "pending record no longer exists");
                Outcome::unchanged()
            }
        }
    }

    pub fn cancel_delete_record(&mut self) -> Outcome {
        if self.pending != PendingDeletion::None {
            debug!(pending = ?self.pending, "deletion cancelled");
        }
        self.pending = PendingDeletion::None;
        Outcome::unchanged()
    }

    pub fn clear_week(&mut self) -> Outcome {
        self.state = WeeklyState::default();
        self.pending = PendingDeletion::None;
        info!("week cleared");
        Outcome {
            notice: Some(Notice::week_cleared()),
            persist: Persist::Erase,
        }
    }

    /// A parked record that has since become blank has nothing left to delete.
    fn release_blank_pending(&mut self) {
        let PendingDeletion::Pending { day, index } = self.pending else {
            return;
        };
        if self.state[day].get(index).is_none_or(|record| record.is_blank()) {
            debug!(%day, index, "pending deletion dropped, record is blank");
            self.pending = PendingDeletion::None;
        }
    }

    /// Blanks every open record in the week.
    pub fn sweep_incomplete(&mut self) {
        let mut swept = 0usize;
        for schedule in self.state.schedules_mut() {
            for record in schedule.iter_mut().filter(|record| record.is_incomplete()) {
                record.clear();
                swept += 1;
            }
        }
        if swept > 0 {
            debug!(swept, "incomplete records cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{day_total, week_total};
    use crate::models::TimeRecord;
    use crate::notice::Severity;
    use crate::time::{format_minutes, parse_clock};

    fn at(value: &str) -> Option<ClockTime> {
        parse_clock(value).unwrap()
    }

    fn set(store: &mut WeeklyStore, day: Weekday, index: usize, field: Field, value: &str) -> Outcome {
        store.update(day, index, field, at(value)).unwrap()
    }

    fn fill(store: &mut WeeklyStore, day: Weekday, index: usize, entry: &str, exit: &str) {
        set(store, day, index, Field::Entry, entry);
        set(store, day, index, Field::Exit, exit);
    }

    #[test]
    fn monday_walkthrough() {
        let mut store = WeeklyStore::default();

        set(&mut store, Weekday::Lunes, 0, Field::Entry, "09:00");
        let same = set(&mut store, Weekday::Lunes, 0, Field::Exit, "09:00");
        assert_eq!(same.notice, Some(Notice::record_saved()));

        let early = set(&mut store, Weekday::Lunes, 0, Field::Exit, "08:00");
        assert_eq!(early.notice.unwrap().severity, Severity::Warning);
        assert_eq!(early.persist, Persist::Write);
        assert_eq!(store.state()[Weekday::Lunes].records()[0], TimeRecord::new(at("09:00"), None));

        let done = set(&mut store, Weekday::Lunes, 0, Field::Exit, "17:00");
        assert_eq!(done.notice.unwrap().severity, Severity::Success);
        assert_eq!(day_total(store.state(), Weekday::Lunes), 480);
        assert_eq!(format_minutes(day_total(store.state(), Weekday::Lunes)), "8h 00m");
    }

    #[test]
    fn completing_a_record_sweeps_open_records_elsewhere() {
        let mut store = WeeklyStore::default();
        set(&mut store, Weekday::Martes, 0, Field::Entry, "08:00");
        fill(&mut store, Weekday::Jueves, 0, "09:00", "10:00");
        set(&mut store, Weekday::Jueves, 0, Field::Entry, "09:00");

        set(&mut store, Weekday::Lunes, 0, Field::Entry, "07:00");
        set(&mut store, Weekday::Lunes, 0, Field::Exit, "07:30");

        assert!(store.state()[Weekday::Martes].records()[0].is_blank());
        assert_eq!(
            store.state()[Weekday::Jueves].records()[0],
            TimeRecord::new(at("09:00"), at("10:00"))
        );
        assert!(store.state()[Weekday::Lunes].records()[0].is_complete());
    }

    #[test]
    fn add_refuses_incomplete_or_blank_last_record() {
        let mut store = WeeklyStore::default();
        let before = store.state().clone();

        let blank = store.add_record(Weekday::Viernes);
        assert_eq!(blank.notice, Some(Notice::previous_empty()));
        assert_eq!(blank.persist, Persist::Nothing);
        assert_eq!(store.state(), &before);

        set(&mut store, Weekday::Viernes, 0, Field::Entry, "10:00");
        let before = store.state().clone();
        let open = store.add_record(Weekday::Viernes);
        assert_eq!(open.notice, Some(Notice::previous_incomplete()));
        assert_eq!(store.state(), &before);

        set(&mut store, Weekday::Viernes, 0, Field::Exit, "12:00");
        let added = store.add_record(Weekday::Viernes);
        assert_eq!(added, Outcome::saved(None));
        assert_eq!(store.state()[Weekday::Viernes].len(), 2);
        assert!(store.state()[Weekday::Viernes].last().is_blank());
    }

    #[test]
    fn sole_blank_record_cannot_be_deleted() {
        let mut store = WeeklyStore::default();
        let outcome = store.delete_record(Weekday::Lunes, 0).unwrap();

        assert_eq!(outcome.notice.unwrap().severity, Severity::Danger);
        assert_eq!(outcome.persist, Persist::Nothing);
        assert_eq!(store.state()[Weekday::Lunes].len(), 1);
    }

    #[test]
    fn extra_blank_record_is_removed() {
        let mut store = WeeklyStore::default();
        fill(&mut store, Weekday::Lunes, 0, "08:00", "12:00");
        store.add_record(Weekday::Lunes);

        let outcome = store.delete_record(Weekday::Lunes, 1).unwrap();
        assert_eq!(outcome, Outcome::saved(None));
        assert_eq!(store.state()[Weekday::Lunes].len(), 1);
    }

    #[test]
    fn non_blank_delete_needs_confirmation_and_clears_in_place() {
        let mut store = WeeklyStore::default();
        fill(&mut store, Weekday::Miercoles, 0, "08:00", "12:00");
        store.add_record(Weekday::Miercoles);
        fill(&mut store, Weekday::Miercoles, 1, "13:00", "15:00");

        let parked = store.delete_record(Weekday::Miercoles, 0).unwrap();
        assert_eq!(parked, Outcome::unchanged());
        assert_eq!(
            store.pending(),
            PendingDeletion::Pending { day: Weekday::Miercoles, index: 0 }
        );
        assert!(store.state()[Weekday::Miercoles].records()[0].is_complete());

        let confirmed = store.confirm_delete_record();
        assert_eq!(confirmed.persist, Persist::Write);
        assert_eq!(store.pending(), PendingDeletion::None);
        let day = &store.state()[Weekday::Miercoles];
        assert_eq!(day.len(), 2);
        assert!(day.records()[0].is_blank());
        assert_eq!(day_total(store.state(), Weekday::Miercoles), 120);
    }

    #[test]
    fn blanked_pending_record_is_released_before_its_slot_goes() {
        let mut store = WeeklyStore::default();
        fill(&mut store, Weekday::Lunes, 0, "08:00", "12:00");
        store.add_record(Weekday::Lunes);
        fill(&mut store, Weekday::Lunes, 1, "13:00", "14:00");
        store.add_record(Weekday::Lunes);
        fill(&mut store, Weekday::Lunes, 2, "15:00", "16:00");

        store.delete_record(Weekday::Lunes, 1).unwrap();
        set(&mut store, Weekday::Lunes, 1, Field::Entry, "");
        assert_eq!(store.pending(), PendingDeletion::None);

        store.delete_record(Weekday::Lunes, 1).unwrap();
        assert_eq!(store.confirm_delete_record(), Outcome::unchanged());

        let day = store.state()[Weekday::Lunes].records();
        assert_eq!(day.len(), 2);
        assert_eq!(day[0], TimeRecord::new(at("08:00"), at("12:00")));
        assert_eq!(day[1], TimeRecord::new(at("15:00"), at("16:00")));
    }

    #[test]
    fn removing_the_pending_slot_drops_the_pending_deletion() {
        let mut store = WeeklyStore::default();
        fill(&mut store, Weekday::Jueves, 0, "08:00", "12:00");
        store.add_record(Weekday::Jueves);
        store.pending = PendingDeletion::Pending { day: Weekday::Jueves, index: 1 };

        store.delete_record(Weekday::Jueves, 1).unwrap();
        assert_eq!(store.pending(), PendingDeletion::None);
        assert_eq!(store.confirm_delete_record(), Outcome::unchanged());
        assert!(store.state()[Weekday::Jueves].records()[0].is_complete());
    }

    #[test]
    fn swept_pending_record_is_released() {
        let mut store = WeeklyStore::default();
        set(&mut store, Weekday::Martes, 0, Field::Entry, "08:00");
        store.delete_record(Weekday::Martes, 0).unwrap();
        assert_ne!(store.pending(), PendingDeletion::None);

        fill(&mut store, Weekday::Lunes, 0, "09:00", "10:00");
        assert!(store.state()[Weekday::Martes].records()[0].is_blank());
        assert_eq!(store.pending(), PendingDeletion::None);
    }

    #[test]
    fn entry_before_previous_exit_warns_and_persists() {
        let mut store = WeeklyStore::default();
        fill(&mut store, Weekday::Viernes, 0, "08:00", "12:00");
        store.add_record(Weekday::Viernes);

        let outcome = set(&mut store, Weekday::Viernes, 1, Field::Entry, "11:00");
        assert_eq!(outcome.notice, Some(Notice::entry_before_previous_exit()));
        assert_eq!(outcome.notice.unwrap().severity, Severity::Warning);
        assert_eq!(outcome.persist, Persist::Write);
        assert!(store.state()[Weekday::Viernes].records()[1].is_blank());
    }

    #[test]
    fn cancel_keeps_the_record() {
        let mut store = WeeklyStore::default();
        fill(&mut store, Weekday::Lunes, 0, "08:00", "12:00");
        store.delete_record(Weekday::Lunes, 0).unwrap();

        store.cancel_delete_record();
        assert_eq!(store.pending(), PendingDeletion::None);
        assert_eq!(store.confirm_delete_record(), Outcome::unchanged());
        assert!(store.state()[Weekday::Lunes].records()[0].is_complete());
    }

    #[test]
    fn clear_week_resets_everything_and_erases() {
        let mut store = WeeklyStore::default();
        for day in Weekday::ALL {
            fill(&mut store, day, 0, "09:00", "17:00");
        }
        assert_eq!(week_total(store.state()), 2400);
        store.delete_record(Weekday::Lunes, 0).unwrap();

        let outcome = store.clear_week();
        assert_eq!(outcome.persist, Persist::Erase);
        assert_eq!(store.state(), &WeeklyState::default());
        assert_eq!(store.pending(), PendingDeletion::None);
    }

    #[test]
    fn unknown_record_is_reported() {
        let mut store = WeeklyStore::default();
        assert!(store.update(Weekday::Lunes, 5, Field::Entry, at("09:00")).is_err());
        assert!(store.delete_record(Weekday::Lunes, 5).is_err());
    }
}
