//! Canonical local calendar-day identifiers.
//!
//! Every other module works on [`DayKey`]s rather than raw timestamps, so a
//! check-in at 23:00 and another at 01:00 of the same local day always land
//! on the same key.

use crate::errors::ValidationError;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A local calendar day, rendered as zero-padded `YYYY-MM-DD`.
///
/// The derived ordering follows the date, which matches lexicographic order
/// of the rendered form for four-digit years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Day key for today according to the local clock.
    pub fn today() -> Self {
        Self::from_local(Local::now())
    }

    pub fn from_local(instant: DateTime<Local>) -> Self {
        Self::normalize(&instant)
    }

    /// Calendar date of `instant` in the instant's own timezone.
    pub fn normalize<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.date_naive())
    }

    /// Strict parse of an externally supplied key.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDayKey(raw.to_string());
        let bytes = raw.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(invalid());
        }
        if !bytes
            .iter()
            .enumerate()
            .all(|(idx, b)| idx == 4 || idx == 7 || b.is_ascii_digit())
        {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| invalid())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn offset(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    pub fn days_back(&self, days: i64) -> Self {
        self.offset(-days)
    }

    /// Short English weekday name, e.g. `Mon`.
    pub fn weekday_short(&self) -> String {
        self.0.format("%a").to_string()
    }

    /// Sunday-based weekday index, Sunday = 0.
    pub fn weekday_from_sunday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }
}

/// Signed number of days from `b` to `a`.
///
/// Both days are pinned to UTC midnight before subtracting, so daylight-saving
/// transitions in the local zone never shift the count.
pub fn day_difference(a: DayKey, b: DayKey) -> i64 {
    let a = a.0.and_time(NaiveTime::MIN).and_utc();
    let b = b.0.and_time(NaiveTime::MIN).and_utc();
    (a - b).num_days()
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DayKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn key(y: i32, m: u32, d: u32) -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn late_night_and_early_morning_share_a_key() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let early = tz.with_ymd_and_hms(2026, 3, 10, 0, 30, 0).unwrap();
        let late = tz.with_ymd_and_hms(2026, 3, 10, 23, 0, 0).unwrap();
        assert_eq!(DayKey::normalize(&early), DayKey::normalize(&late));
        assert_eq!(DayKey::normalize(&late).to_string(), "2026-03-10");
    }

    #[test]
    fn normalize_uses_instant_zone_not_utc() {
        // 2026-03-10 23:30 at UTC-5 is already 2026-03-11 in UTC.
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let instant = tz.with_ymd_and_hms(2026, 3, 10, 23, 30, 0).unwrap();
        assert_eq!(DayKey::normalize(&instant), key(2026, 3, 10));
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(key(2026, 1, 5).to_string(), "2026-01-05");
    }

    #[test]
    fn string_order_matches_chronological_order() {
        let days = [key(2025, 12, 31), key(2026, 1, 9), key(2026, 1, 10), key(2026, 10, 1)];
        for pair in days.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].to_string() < pair[1].to_string());
        }
    }

    #[test]
    fn day_difference_is_signed() {
        assert_eq!(day_difference(key(2026, 1, 5), key(2026, 1, 1)), 4);
        assert_eq!(day_difference(key(2026, 1, 1), key(2026, 1, 5)), -4);
        assert_eq!(day_difference(key(2026, 1, 1), key(2026, 1, 1)), 0);
    }

    #[test]
    fn day_difference_spans_dst_and_year_boundaries() {
        // US and EU spring-forward weekends.
        assert_eq!(day_difference(key(2026, 3, 9), key(2026, 3, 7)), 2);
        assert_eq!(day_difference(key(2026, 3, 30), key(2026, 3, 28)), 2);
        assert_eq!(day_difference(key(2026, 1, 1), key(2025, 12, 31)), 1);
        assert_eq!(day_difference(key(2024, 3, 1), key(2024, 2, 28)), 2);
    }

    #[test]
    fn parse_accepts_canonical_keys_only() {
        assert_eq!(DayKey::parse("2026-02-28").unwrap(), key(2026, 2, 28));
        for bad in ["2026-2-28", "2026/02/28", "2026-02-30", "", "20260228", "2026-02-2x"] {
            assert!(DayKey::parse(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let json = serde_json::to_string(&key(2026, 7, 4)).unwrap();
        assert_eq!(json, "\"2026-07-04\"");
        let back: DayKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key(2026, 7, 4));
        assert!(serde_json::from_str::<DayKey>("\"07/04/2026\"").is_err());
    }

    #[test]
    fn weekday_helpers() {
        // 2026-02-01 is a Sunday.
        let day = key(2026, 2, 1);
        assert_eq!(day.weekday_from_sunday(), 0);
        assert_eq!(day.weekday_short(), "Sun");
        assert_eq!(key(2026, 2, 18).first_of_month(), day);
    }
}
