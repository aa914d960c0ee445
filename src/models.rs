use crate::aggregate::WeekSummary;
use crate::notice::Notice;
use crate::store::PendingDeletion;
use crate::time::ClockTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Lunes,
        Weekday::Martes,
        Weekday::Miercoles,
        Weekday::Jueves,
        Weekday::Viernes,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Weekday::Lunes => "lunes",
            Weekday::Martes => "martes",
            Weekday::Miercoles => "miercoles",
            Weekday::Jueves => "jueves",
            Weekday::Viernes => "viernes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Lunes => "Lunes",
            Weekday::Martes => "Martes",
            Weekday::Miercoles => "Miércoles",
            Weekday::Jueves => "Jueves",
            Weekday::Viernes => "Viernes",
        }
    }

    /// Card accent on the rendered page.
    pub fn color(self) -> &'static str {
        match self {
            Weekday::Lunes => "#2f6fed",
            Weekday::Martes => "#2f9e5b",
            Weekday::Miercoles => "#e0a100",
            Weekday::Jueves => "#1ba3c6",
            Weekday::Viernes => "#d64545",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.key() == key)
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "entrada")]
    Entry,
    #[serde(rename = "salida")]
    Exit,
}

/// One clock-in/clock-out interval on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRecord {
    pub entry: Option<ClockTime>,
    pub exit: Option<ClockTime>,
}

impl TimeRecord {
    pub fn new(entry: Option<ClockTime>, exit: Option<ClockTime>) -> Self {
        Self { entry, exit }
    }

    pub fn is_blank(&self) -> bool {
        self.entry.is_none() && self.exit.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.entry.is_some() && self.exit.is_some()
    }

    /// Clocked in, not yet clocked out.
    pub fn is_incomplete(&self) -> bool {
        self.entry.is_some() && self.exit.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn field_mut(&mut self, field: Field) -> &mut Option<ClockTime> {
        match field {
            Field::Entry => &mut self.entry,
            Field::Exit => &mut self.exit,
        }
    }
}

/// Records of one weekday in insertion order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdaySchedule {
    records: Vec<TimeRecord>,
}

impl WeekdaySchedule {
    /// Returns `None` for an empty sequence.
    pub fn from_records(records: Vec<TimeRecord>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Self { records })
        }
    }

    pub fn records(&self) -> &[TimeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimeRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TimeRecord> {
        self.records.get_mut(index)
    }

    pub fn last(&self) -> &TimeRecord {
        // Non-empty by construction.
        &self.records[self.records.len() - 1]
    }

    pub fn push_blank(&mut self) {
        self.records.push(TimeRecord::default());
    }

    /// Removes a record unless it is the only one left.
    pub fn remove(&mut self, index: usize) -> Option<TimeRecord> {
        if self.records.len() <= 1 || index >= self.records.len() {
            return None;
        }
        Some(self.records.remove(index))
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, TimeRecord> {
        self.records.iter_mut()
    }
}

impl Default for WeekdaySchedule {
    fn default() -> Self {
        Self {
            records: vec![TimeRecord::default()],
        }
    }
}

/// The whole tracked week, one schedule per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeeklyState {
    days: [WeekdaySchedule; 5],
}

impl WeeklyState {
    pub fn from_days(days: [WeekdaySchedule; 5]) -> Self {
        Self { days }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &WeekdaySchedule)> {
        Weekday::ALL.into_iter().zip(self.days.iter())
    }

    pub fn schedules_mut(&mut self) -> impl Iterator<Item = &mut WeekdaySchedule> {
        self.days.iter_mut()
    }
}

impl Index<Weekday> for WeeklyState {
    type Output = WeekdaySchedule;

    fn index(&self, day: Weekday) -> &Self::Output {
        &self.days[day.position()]
    }
}

impl IndexMut<Weekday> for WeeklyState {
    fn index_mut(&mut self, day: Weekday) -> &mut Self::Output {
        &mut self.days[day.position()]
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub day: Weekday,
    pub index: usize,
    pub field: Field,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct DayRequest {
    pub day: Weekday,
}

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub day: Weekday,
    pub index: usize,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    #[serde(flatten)]
    pub summary: WeekSummary,
    pub pending_deletion: PendingDeletion,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub notice: Option<Notice>,
    pub week: WeekResponse,
}
