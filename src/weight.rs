//! Read-side views over the daily weight log.

use crate::day_key::DayKey;
use crate::models::WeightEntry;
use serde::{Deserialize, Serialize};

pub const MIN_WEIGHT_KG: f64 = 20.0;
pub const MAX_WEIGHT_KG: f64 = 200.0;

const TREND_DAYS: i64 = 14;
const WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekHistoryDay {
    pub day: DayKey,
    pub day_name: String,
    pub has_entry: bool,
    pub is_today: bool,
}

pub fn latest(entries: &[WeightEntry]) -> Option<&WeightEntry> {
    entries.iter().max_by_key(|entry| entry.day)
}

pub fn week_history(entries: &[WeightEntry], today: DayKey) -> Vec<WeekHistoryDay> {
    (0..WEEK_DAYS)
        .rev()
        .map(|back| {
            let day = today.days_back(back);
            WeekHistoryDay {
                day,
                day_name: day.weekday_short(),
                has_entry: entries.iter().any(|entry| entry.day == day),
                is_today: back == 0,
            }
        })
        .collect()
}

/// Entries from the last two weeks, oldest first.
pub fn trend(entries: &[WeightEntry], today: DayKey) -> Vec<WeightEntry> {
    let cutoff = today.days_back(TREND_DAYS);
    let mut points: Vec<WeightEntry> = entries
        .iter()
        .filter(|entry| entry.day >= cutoff)
        .cloned()
        .collect();
    points.sort_by_key(|entry| entry.day);
    points
}
