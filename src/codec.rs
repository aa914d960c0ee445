//! JSON form of the week as kept under the `controlHorario` key.
//!
//! ```json
//! {"lunes":[{"entrada":"09:00","salida":"17:00"}],"martes":[{"entrada":"","salida":""}],...}
//! ```

use crate::errors::TrackerResult;
use crate::models::{TimeRecord, Weekday, WeekdaySchedule, WeeklyState};
use crate::time::{format_clock, parse_clock};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredRecord {
    entrada: String,
    salida: String,
}

impl From<&TimeRecord> for StoredRecord {
    fn from(record: &TimeRecord) -> Self {
        Self {
            entrada: record.entry.map(format_clock).unwrap_or_default(),
            salida: record.exit.map(format_clock).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("not valid JSON: {0}")]
    Json(String),
    #[error("top level is not an object")]
    NotAnObject,
    #[error("missing day '{0}'")]
    MissingDay(Weekday),
    #[error("day '{0}' has no records")]
    EmptyDay(Weekday),
    #[error("record {index} of '{day}' is malformed: {reason}")]
    BadRecord { day: Weekday, index: usize, reason: String },
}

// Days are written in calendar order, not key order.
impl Serialize for WeeklyState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Weekday::ALL.len()))?;
        for (day, schedule) in self.iter() {
            let records: Vec<StoredRecord> = schedule.records().iter().map(StoredRecord::from).collect();
            map.serialize_entry(day.key(), &records)?;
        }
        map.end()
    }
}

pub fn encode(state: &WeeklyState) -> TrackerResult<String> {
    Ok(serde_json::to_string(state)?)
}

pub fn decode(text: &str) -> Result<WeeklyState, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(|err| DecodeError::Json(err.to_string()))?;
    let Value::Object(mut map) = value else {
        return Err(DecodeError::NotAnObject);
    };

    let mut state = WeeklyState::default();
    for day in Weekday::ALL {
        let raw = map.remove(day.key()).ok_or(DecodeError::MissingDay(day))?;
        state[day] = decode_day(day, raw)?;
    }
    Ok(state)
}

/// Falls back to an empty week on any decode failure.
pub fn decode_or_default(text: &str) -> WeeklyState {
    decode(text).unwrap_or_else(|err| {
        warn!("discarding stored week: {err}");
        WeeklyState::default()
    })
}

fn decode_day(day: Weekday, raw: Value) -> Result<WeekdaySchedule, DecodeError> {
    let stored: Vec<Value> = match raw {
        Value::Array(items) => items,
        other => {
            return Err(DecodeError::BadRecord {
                day,
                index: 0,
                reason: format!("expected an array, found {other}"),
            });
        }
    };

    let records = stored
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_record(day, index, item))
        .collect::<Result<Vec<_>, _>>()?;

    WeekdaySchedule::from_records(records).ok_or(DecodeError::EmptyDay(day))
}

fn decode_record(day: Weekday, index: usize, item: Value) -> Result<TimeRecord, DecodeError> {
    let bad = |reason: String| DecodeError::BadRecord { day, index, reason };

    let stored: StoredRecord = serde_json::from_value(item).map_err(|err| bad(err.to_string()))?;
    let entry = parse_clock(&stored.entrada).map_err(|err| bad(err.to_string()))?;
    let exit = parse_clock(&stored.salida).map_err(|err| bad(err.to_string()))?;
    Ok(TimeRecord::new(entry, exit))
}
