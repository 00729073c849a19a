use crate::day_key::DayKey;
use crate::models::Habit;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub percent: f64,
    pub days_remaining: u32,
    pub target_date: DayKey,
    pub checked_in_today: bool,
}

/// Progress of the current streak towards the habit's target.
pub fn progress(habit: &Habit, today: DayKey) -> Progress {
    let target = habit.target_days.max(1);
    let percent = (f64::from(habit.current_streak) / f64::from(target) * 100.0).min(100.0);
    let days_remaining = habit.target_days.saturating_sub(habit.current_streak);

    Progress {
        percent,
        days_remaining,
        target_date: today.offset(i64::from(days_remaining)),
        checked_in_today: habit.last_check_in == Some(today),
    }
}
