use crate::models::{Weekday, WeeklyState};
use crate::time::{duration, format_clock, format_minutes};
use serde::Serialize;

/// Weekly target in minutes (40 hours).
pub const WEEK_TARGET_MINUTES: i64 = 40 * 60;

pub fn day_total(state: &WeeklyState, day: Weekday) -> i64 {
    state[day]
        .records()
        .iter()
        .map(|record| duration(record.entry, record.exit))
        .sum()
}

pub fn week_total(state: &WeeklyState) -> i64 {
    Weekday::ALL.into_iter().map(|day| day_total(state, day)).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    Low,
    Moderate,
    High,
    Met,
}

impl ProgressTier {
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes <= 20 * 60 {
            ProgressTier::Low
        } else if minutes <= 30 * 60 {
            ProgressTier::Moderate
        } else if minutes < WEEK_TARGET_MINUTES {
            ProgressTier::High
        } else {
            ProgressTier::Met
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ProgressTier::Low => "#d64545",
            ProgressTier::Moderate => "#f08c2e",
            ProgressTier::High => "#e0b400",
            ProgressTier::Met => "#2f9e5b",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekProgress {
    pub percent: f64,
    pub tier: ProgressTier,
    pub label: String,
}

impl WeekProgress {
    pub fn from_total(minutes: i64) -> Self {
        let percent = (minutes as f64 / WEEK_TARGET_MINUTES as f64 * 100.0).clamp(0.0, 100.0);
        Self {
            percent,
            tier: ProgressTier::from_minutes(minutes),
            label: format!("{} / 40h", format_minutes(minutes)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    pub entrada: String,
    pub salida: String,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: Weekday,
    pub label: &'static str,
    pub records: Vec<RecordView>,
    pub total_minutes: i64,
    pub total: String,
}

/// Read-only snapshot of the week, rebuilt on every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    pub days: Vec<DaySummary>,
    pub total_minutes: i64,
    pub total: String,
    pub progress: WeekProgress,
}

impl WeekSummary {
    pub fn from_state(state: &WeeklyState) -> Self {
        let days = state
            .iter()
            .map(|(day, schedule)| {
                let total_minutes = day_total(state, day);
                DaySummary {
                    day,
                    label: day.label(),
                    records: schedule
                        .records()
                        .iter()
                        .map(|record| RecordView {
                            entrada: record.entry.map(format_clock).unwrap_or_default(),
                            salida: record.exit.map(format_clock).unwrap_or_default(),
                            minutes: duration(record.entry, record.exit),
                        })
                        .collect(),
                    total_minutes,
                    total: format_minutes(total_minutes),
                }
            })
            .collect();

        let total_minutes = week_total(state);
        Self {
            days,
            total_minutes,
            total: format_minutes(total_minutes),
            progress: WeekProgress::from_total(total_minutes),
        }
    }
}
