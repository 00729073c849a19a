//! Mutations on the persisted snapshot.
//!
//! Every write goes through here so the one-event-per-day rules hold no
//! matter what the caller does. Callers persist the snapshot afterwards.

use crate::day_key::DayKey;
use crate::errors::ValidationError;
use crate::models::{AppData, CheckInEvent, Habit, WeightEntry};
use crate::streak::{self, CheckInOutcome};
use crate::weight::{MAX_WEIGHT_KG, MIN_WEIGHT_KG};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const MAX_NAME_LEN: usize = 80;
pub const MIN_TARGET_DAYS: u32 = 1;
pub const MAX_TARGET_DAYS: u32 = 365;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub reset: Vec<Uuid>,
    /// Records whose counters contradicted each other on load.
    pub repaired: Vec<Uuid>,
}

impl ReconcileReport {
    pub fn changed(&self) -> bool {
        !self.reset.is_empty() || !self.repaired.is_empty()
    }
}

/// A validated request to start a new habit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    name: String,
    target_days: u32,
}

impl NewHabit {
    pub fn parse(name: &str, target_days: i64) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong { max: MAX_NAME_LEN });
        }
        let target_days = u32::try_from(target_days)
            .ok()
            .filter(|days| (MIN_TARGET_DAYS..=MAX_TARGET_DAYS).contains(days))
            .ok_or(ValidationError::TargetOutOfRange {
                value: target_days,
                min: MIN_TARGET_DAYS,
                max: MAX_TARGET_DAYS,
            })?;

        Ok(Self {
            name: name.to_string(),
            target_days,
        })
    }
}

pub fn validate_weight(weight: f64) -> Result<f64, ValidationError> {
    if weight.is_finite() && (MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight) {
        Ok(weight)
    } else {
        Err(ValidationError::WeightOutOfRange {
            min: MIN_WEIGHT_KG,
            max: MAX_WEIGHT_KG,
        })
    }
}

impl AppData {
    /// Collapses every streak that went stale before `today`.
    ///
    /// Also clamps counters that break `best >= current` or carry a streak
    /// without any check-in day.
    pub fn reconcile(&mut self, today: DayKey) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        for habit in &mut self.habits {
            if habit.last_check_in.is_none() && habit.current_streak != 0 {
                warn!(
                    habit = %habit.id,
                    streak = habit.current_streak,
                    "streak without check-in, clearing"
                );
                habit.current_streak = 0;
                report.repaired.push(habit.id);
            }
            if habit.best_streak < habit.current_streak {
                warn!(
                    habit = %habit.id,
                    best = habit.best_streak,
                    streak = habit.current_streak,
                    "best streak below current, raising"
                );
                habit.best_streak = habit.current_streak;
                report.repaired.push(habit.id);
            }
            if streak::evaluate_for_today(habit, today).needs_reset && habit.current_streak != 0 {
                info!(
                    habit = %habit.id,
                    name = %habit.name,
                    streak = habit.current_streak,
                    "streak broken, resetting"
                );
                habit.current_streak = 0;
                report.reset.push(habit.id);
            }
        }
        report
    }

    pub fn habit(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn create_habit(&mut self, new: NewHabit, today: DayKey) -> Habit {
        let habit = Habit::new(new.name, new.target_days, today);
        info!(habit = %habit.id, name = %habit.name, target = habit.target_days, "habit created");
        self.habits.insert(0, habit.clone());
        habit
    }

    /// Removes the habit together with its check-in history.
    pub fn delete_habit(&mut self, id: Uuid) -> Option<Habit> {
        let idx = self.habits.iter().position(|habit| habit.id == id)?;
        let habit = self.habits.remove(idx);
        let before = self.check_ins.len();
        self.check_ins.retain(|event| event.habit_id != id);
        info!(
            habit = %id,
            events = before - self.check_ins.len(),
            "habit deleted"
        );
        Some(habit)
    }

    /// Checks the habit in for `today`; `None` if the habit does not exist.
    pub fn check_in(&mut self, id: Uuid, today: DayKey) -> Option<CheckInOutcome> {
        let habit = self.habits.iter_mut().find(|habit| habit.id == id)?;
        let has_event = self
            .check_ins
            .iter()
            .any(|event| event.habit_id == id && event.day == today);

        if has_event {
            debug!(habit = %id, day = %today, "already checked in");
            return Some(CheckInOutcome::AlreadyCheckedIn {
                streak: habit.current_streak,
            });
        }

        let outcome = streak::check_in(habit, today);
        if let CheckInOutcome::Advanced { streak } = outcome {
            self.check_ins.push(CheckInEvent {
                habit_id: id,
                day: today,
            });
            info!(habit = %id, day = %today, streak, "checked in");
        } else {
            debug!(habit = %id, day = %today, "already checked in");
        }
        Some(outcome)
    }

    pub fn events_for(&self, id: Uuid) -> Vec<CheckInEvent> {
        self.check_ins
            .iter()
            .filter(|event| event.habit_id == id)
            .cloned()
            .collect()
    }

    /// One entry per day; a later write replaces the weight.
    pub fn upsert_weight(&mut self, day: DayKey, weight: f64) -> WeightEntry {
        if let Some(existing) = self.weights.iter_mut().find(|entry| entry.day == day) {
            info!(day = %day, from = existing.weight, to = weight, "weight updated");
            existing.weight = weight;
            return existing.clone();
        }

        let entry = WeightEntry {
            id: Uuid::new_v4(),
            day,
            weight,
        };
        info!(day = %day, weight, "weight logged");
        self.weights.push(entry.clone());
        entry
    }
}
