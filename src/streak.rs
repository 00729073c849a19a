//! Per-habit streak rules.
//!
//! A streak is alive while the last check-in is today or yesterday. Anything
//! older means at least one full day was skipped and the streak collapses.

use crate::day_key::{day_difference, DayKey};
use crate::models::Habit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakEvaluation {
    pub streak: u32,
    pub needs_reset: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    Advanced { streak: u32 },
    AlreadyCheckedIn { streak: u32 },
}

impl CheckInOutcome {
    pub fn streak(&self) -> u32 {
        match *self {
            CheckInOutcome::Advanced { streak } | CheckInOutcome::AlreadyCheckedIn { streak } => {
                streak
            }
        }
    }
}

pub fn evaluate_for_today(habit: &Habit, today: DayKey) -> StreakEvaluation {
    let Some(last) = habit.last_check_in else {
        return StreakEvaluation {
            streak: 0,
            needs_reset: false,
        };
    };

    if day_difference(today, last) > 1 {
        StreakEvaluation {
            streak: 0,
            needs_reset: true,
        }
    } else {
        StreakEvaluation {
            streak: habit.current_streak,
            needs_reset: false,
        }
    }
}

/// Records today's check-in on the habit's counters.
///
/// A second call on the same day leaves the habit untouched.
pub fn check_in(habit: &mut Habit, today: DayKey) -> CheckInOutcome {
    if habit.last_check_in == Some(today) {
        return CheckInOutcome::AlreadyCheckedIn {
            streak: habit.current_streak,
        };
    }

    if evaluate_for_today(habit, today).needs_reset {
        habit.current_streak = 0;
    }

    habit.current_streak = habit.current_streak.saturating_add(1);
    habit.best_streak = habit.best_streak.max(habit.current_streak);
    habit.last_check_in = Some(today);

    CheckInOutcome::Advanced {
        streak: habit.current_streak,
    }
}
