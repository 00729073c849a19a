//! Day-by-day calendar views rebuilt from the check-in log.

use crate::day_key::DayKey;
use crate::models::{CheckInEvent, Habit};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayStatus {
    Completed,
    Missed,
    PendingToday,
    NotYetStarted,
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub day: DayKey,
    pub status: DayStatus,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub month_name: String,
    pub year: i32,
    /// Empty slots before the first day, Sunday-first grid.
    pub padding: u32,
    pub days: Vec<DayCell>,
}

fn completed_days(habit: &Habit, events: &[CheckInEvent]) -> HashSet<DayKey> {
    events
        .iter()
        .filter(|event| event.habit_id == habit.id)
        .map(|event| event.day)
        .collect()
}

fn classify(day: DayKey, today: DayKey, created_at: DayKey, completed: &HashSet<DayKey>) -> DayStatus {
    if completed.contains(&day) {
        DayStatus::Completed
    } else if day == today {
        DayStatus::PendingToday
    } else if day < created_at {
        DayStatus::NotYetStarted
    } else {
        DayStatus::Missed
    }
}

/// `window` cells ending at `today`, oldest first.
pub fn reconstruct(habit: &Habit, events: &[CheckInEvent], today: DayKey, window: usize) -> Vec<DayCell> {
    let completed = completed_days(habit, events);
    (0..window as i64)
        .rev()
        .map(|back| {
            let day = today.days_back(back);
            DayCell {
                day,
                status: classify(day, today, habit.created_at, &completed),
                is_today: back == 0,
            }
        })
        .collect()
}

/// Every day of `today`'s month; days after `today` are out of range.
pub fn month_view(habit: &Habit, events: &[CheckInEvent], today: DayKey) -> MonthCalendar {
    let completed = completed_days(habit, events);
    let first = today.first_of_month();
    let month = first.date().month();

    let days = (0..)
        .map(|offset| first.offset(offset))
        .take_while(|day| day.date().month() == month)
        .map(|day| DayCell {
            day,
            status: if day > today {
                DayStatus::OutOfRange
            } else {
                classify(day, today, habit.created_at, &completed)
            },
            is_today: day == today,
        })
        .collect();

    MonthCalendar {
        month_name: first.date().format("%B").to_string(),
        year: first.date().year(),
        padding: first.weekday_from_sunday(),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streak::check_in;
    use chrono::NaiveDate;

    fn day(n: u32) -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(2026, 2, n).unwrap())
    }

    fn log(habit: &Habit, days: &[u32]) -> Vec<CheckInEvent> {
        days.iter()
            .map(|&n| CheckInEvent {
                habit_id: habit.id,
                day: day(n),
            })
            .collect()
    }

    fn statuses(cells: &[DayCell]) -> Vec<DayStatus> {
        cells.iter().map(|cell| cell.status).collect()
    }

    #[test]
    fn window_has_exact_length_and_ends_today() {
        let habit = Habit::new("Stretch".into(), 30, day(1));
        for window in [1, 7, 30] {
            let cells = reconstruct(&habit, &[], day(28), window);
            assert_eq!(cells.len(), window);
            assert_eq!(cells.last().unwrap().day, day(28));
            assert!(cells.last().unwrap().is_today);
            assert!(cells.windows(2).all(|pair| pair[0].day < pair[1].day));
        }
    }

    #[test]
    fn checked_in_three_days_then_pending() {
        let mut habit = Habit::new("Run".into(), 21, day(1));
        for n in 1..=3 {
            check_in(&mut habit, day(n));
        }
        let events = log(&habit, &[1, 2, 3]);
        let cells = reconstruct(&habit, &events, day(4), 4);
        assert_eq!(habit.current_streak, 3);
        assert_eq!(
            statuses(&cells),
            vec![
                DayStatus::Completed,
                DayStatus::Completed,
                DayStatus::Completed,
                DayStatus::PendingToday,
            ]
        );
    }

    #[test]
    fn days_before_creation_are_not_missed() {
        let habit = Habit::new("Meditate".into(), 7, day(5));
        let cells = reconstruct(&habit, &[], day(7), 7);
        assert_eq!(cells[0].day, day(1));
        assert_eq!(
            statuses(&cells),
            vec![
                DayStatus::NotYetStarted,
                DayStatus::NotYetStarted,
                DayStatus::NotYetStarted,
                DayStatus::NotYetStarted,
                DayStatus::Missed,
                DayStatus::Missed,
                DayStatus::PendingToday,
            ]
        );
    }

    #[test]
    fn completed_today_wins_over_pending() {
        let habit = Habit::new("Floss".into(), 7, day(1));
        let events = log(&habit, &[3]);
        let cells = reconstruct(&habit, &events, day(3), 2);
        assert_eq!(statuses(&cells), vec![DayStatus::Missed, DayStatus::Completed]);
    }

    #[test]
    fn other_habits_events_are_ignored() {
        let habit = Habit::new("Floss".into(), 7, day(1));
        let other = Habit::new("Walk".into(), 7, day(1));
        let events = log(&other, &[2]);
        let cells = reconstruct(&habit, &events, day(2), 2);
        assert_eq!(statuses(&cells), vec![DayStatus::Missed, DayStatus::PendingToday]);
    }

    #[test]
    fn reconstruct_is_repeatable() {
        let habit = Habit::new("Journal".into(), 7, day(3));
        let events = log(&habit, &[3, 4, 6]);
        let first = reconstruct(&habit, &events, day(9), 10);
        let second = reconstruct(&habit, &events, day(9), 10);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_window_is_empty() {
        let habit = Habit::new("Journal".into(), 7, day(3));
        assert!(reconstruct(&habit, &[], day(9), 0).is_empty());
    }

    #[test]
    fn month_view_marks_future_days_out_of_range() {
        let habit = Habit::new("Swim".into(), 30, day(10));
        let events = log(&habit, &[10, 11]);
        let month = month_view(&habit, &events, day(12));

        assert_eq!(month.month_name, "February");
        assert_eq!(month.year, 2026);
        // 2026-02-01 is a Sunday.
        assert_eq!(month.padding, 0);
        assert_eq!(month.days.len(), 28);
        assert_eq!(month.days[0].status, DayStatus::NotYetStarted);
        assert_eq!(month.days[9].status, DayStatus::Completed);
        assert_eq!(month.days[11].status, DayStatus::PendingToday);
        assert!(month.days[11].is_today);
        assert!(month.days[12..].iter().all(|cell| cell.status == DayStatus::OutOfRange));
    }

    #[test]
    fn month_view_padding_follows_first_weekday() {
        let habit = Habit::new("Swim".into(), 30, day(1));
        // 2026-04-01 is a Wednesday.
        let today = DayKey::new(NaiveDate::from_ymd_opt(2026, 4, 15).unwrap());
        let month = month_view(&habit, &[], today);
        assert_eq!(month.padding, 3);
        assert_eq!(month.days.len(), 30);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&DayStatus::PendingToday).unwrap();
        assert_eq!(json, "\"pending-today\"");
    }
}
