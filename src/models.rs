use crate::calendar::{DayCell, MonthCalendar};
use crate::day_key::DayKey;
use crate::weight::WeekHistoryDay;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked habit ("chain").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub target_days: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    #[serde(rename = "lastCheckInDate")]
    pub last_check_in: Option<DayKey>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DayKey,
}

fn default_active() -> bool {
    true
}

impl Habit {
    pub fn new(name: String, target_days: u32, created_at: DayKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            target_days,
            current_streak: 0,
            best_streak: 0,
            last_check_in: None,
            is_active: true,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInEvent {
    pub habit_id: Uuid,
    #[serde(rename = "date")]
    pub day: DayKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    #[serde(rename = "date")]
    pub day: DayKey,
    pub weight: f64,
}

/// Everything persisted on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub check_ins: Vec<CheckInEvent>,
    #[serde(default)]
    pub weights: Vec<WeightEntry>,
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
    pub target_days: i64,
}

#[derive(Debug, Deserialize)]
pub struct WeightRequest {
    pub weight: f64,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub days: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitView {
    pub id: Uuid,
    pub name: String,
    pub target_days: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_check_in: Option<DayKey>,
    pub created_at: DayKey,
    pub checked_in_today: bool,
    pub progress_percent: f64,
    pub days_remaining: u32,
    pub target_date: DayKey,
    pub last_7_days: Vec<DayCell>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitsResponse {
    pub today: DayKey,
    pub habits: Vec<HabitView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckInResponse {
    pub already_checked_in: bool,
    pub habit: HabitView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub habit_id: Uuid,
    pub today: DayKey,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthResponse {
    pub habit_id: Uuid,
    #[serde(flatten)]
    pub calendar: MonthCalendar,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeightsResponse {
    pub today: DayKey,
    pub latest: Option<WeightEntry>,
    pub week: Vec<WeekHistoryDay>,
    pub trend: Vec<WeightEntry>,
    pub enough_data: bool,
}
