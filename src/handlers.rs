use crate::calendar::{month_view, reconstruct};
use crate::day_key::DayKey;
use crate::errors::{AppError, ValidationError};
use crate::ledger::{validate_weight, NewHabit};
use crate::models::{
    AppData, CalendarQuery, CalendarResponse, CheckInResponse, Habit, HabitView, HabitsResponse,
    MonthResponse, NewHabitRequest, WeightEntry, WeightRequest, WeightsResponse,
};
use crate::progress::progress;
use crate::state::AppState;
use crate::storage::persist_data;
use crate::streak::CheckInOutcome;
use crate::ui::render_index;
use crate::weight;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use tokio::sync::MutexGuard;
use uuid::Uuid;

pub const DEFAULT_WINDOW: usize = 7;
pub const MAX_WINDOW: usize = 366;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (data, today) = lock_reconciled(&state).await?;
    Ok(Html(render_index(today, &data)))
}

pub async fn list_habits(State(state): State<AppState>) -> Result<Json<HabitsResponse>, AppError> {
    let (data, today) = lock_reconciled(&state).await?;
    let habits = data
        .habits
        .iter()
        .map(|habit| habit_view(&data, habit, today))
        .collect();
    Ok(Json(HabitsResponse { today, habits }))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Result<(StatusCode, Json<HabitView>), AppError> {
    let view = apply_create(&state, &payload).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn create_habit_form(
    State(state): State<AppState>,
    Form(payload): Form<NewHabitRequest>,
) -> Result<Redirect, AppError> {
    apply_create(&state, &payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    apply_delete(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_habit_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    apply_delete(&state, id).await?;
    Ok(Redirect::to("/"))
}

pub async fn check_in(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckInResponse>, AppError> {
    Ok(Json(apply_check_in(&state, id).await?))
}

pub async fn check_in_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    apply_check_in(&state, id).await?;
    Ok(Redirect::to("/"))
}

pub async fn habit_calendar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let window = query.days.unwrap_or(DEFAULT_WINDOW);
    if window == 0 || window > MAX_WINDOW {
        return Err(ValidationError::WindowOutOfRange {
            value: window,
            max: MAX_WINDOW,
        }
        .into());
    }

    let (data, today) = lock_reconciled(&state).await?;
    let habit = find_habit(&data, id)?;
    let days = reconstruct(habit, &data.check_ins, today, window);
    Ok(Json(CalendarResponse {
        habit_id: id,
        today,
        days,
    }))
}

pub async fn habit_month(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MonthResponse>, AppError> {
    let (data, today) = lock_reconciled(&state).await?;
    let habit = find_habit(&data, id)?;
    Ok(Json(MonthResponse {
        habit_id: id,
        calendar: month_view(habit, &data.check_ins, today),
    }))
}

pub async fn get_weights(State(state): State<AppState>) -> Result<Json<WeightsResponse>, AppError> {
    let (data, today) = lock_reconciled(&state).await?;
    let trend = weight::trend(&data.weights, today);
    Ok(Json(WeightsResponse {
        today,
        latest: weight::latest(&data.weights).cloned(),
        week: weight::week_history(&data.weights, today),
        enough_data: trend.len() >= 2,
        trend,
    }))
}

pub async fn log_weight(
    State(state): State<AppState>,
    Json(payload): Json<WeightRequest>,
) -> Result<Json<WeightEntry>, AppError> {
    Ok(Json(apply_weight(&state, &payload).await?))
}

pub async fn log_weight_form(
    State(state): State<AppState>,
    Form(payload): Form<WeightRequest>,
) -> Result<Redirect, AppError> {
    apply_weight(&state, &payload).await?;
    Ok(Redirect::to("/"))
}

/// Locks the snapshot and brings every streak up to date with today.
async fn lock_reconciled(state: &AppState) -> Result<(MutexGuard<'_, AppData>, DayKey), AppError> {
    let today = DayKey::today();
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    if next.reconcile(today).changed() {
        commit(state, &mut data, next).await?;
    }
    Ok((data, today))
}

/// Saves `next` and only then makes it the live snapshot.
async fn commit(state: &AppState, data: &mut AppData, next: AppData) -> Result<(), AppError> {
    persist_data(&state.data_path, &next).await?;
    *data = next;
    Ok(())
}

async fn apply_create(state: &AppState, payload: &NewHabitRequest) -> Result<HabitView, AppError> {
    let new = NewHabit::parse(&payload.name, payload.target_days)?;
    let (mut data, today) = lock_reconciled(state).await?;
    let mut next = data.clone();
    let habit = next.create_habit(new, today);
    commit(state, &mut data, next).await?;
    Ok(habit_view(&data, &habit, today))
}

async fn apply_delete(state: &AppState, id: Uuid) -> Result<(), AppError> {
    let (mut data, _) = lock_reconciled(state).await?;
    let mut next = data.clone();
    next.delete_habit(id)
        .ok_or_else(|| AppError::not_found(format!("habit {id} not found")))?;
    commit(state, &mut data, next).await
}

async fn apply_check_in(state: &AppState, id: Uuid) -> Result<CheckInResponse, AppError> {
    let (mut data, today) = lock_reconciled(state).await?;
    let mut next = data.clone();
    let outcome = next
        .check_in(id, today)
        .ok_or_else(|| AppError::not_found(format!("habit {id} not found")))?;
    if let CheckInOutcome::Advanced { .. } = outcome {
        commit(state, &mut data, next).await?;
    }

    let habit = find_habit(&data, id)?;
    Ok(CheckInResponse {
        already_checked_in: matches!(outcome, CheckInOutcome::AlreadyCheckedIn { .. }),
        habit: habit_view(&data, habit, today),
    })
}

async fn apply_weight(state: &AppState, payload: &WeightRequest) -> Result<WeightEntry, AppError> {
    let weight = validate_weight(payload.weight)?;
    let (mut data, today) = lock_reconciled(state).await?;
    let day = match payload.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => DayKey::parse(raw)?,
        _ => today,
    };
    if day > today {
        return Err(ValidationError::FutureDay(day.to_string()).into());
    }

    let mut next = data.clone();
    let entry = next.upsert_weight(day, weight);
    commit(state, &mut data, next).await?;
    Ok(entry)
}

fn find_habit(data: &AppData, id: Uuid) -> Result<&Habit, AppError> {
    data.habit(id)
        .ok_or_else(|| AppError::not_found(format!("habit {id} not found")))
}

pub fn habit_view(data: &AppData, habit: &Habit, today: DayKey) -> HabitView {
    let progress = progress(habit, today);
    HabitView {
        id: habit.id,
        name: habit.name.clone(),
        target_days: habit.target_days,
        current_streak: habit.current_streak,
        best_streak: habit.best_streak,
        last_check_in: habit.last_check_in,
        created_at: habit.created_at,
        checked_in_today: progress.checked_in_today,
        progress_percent: progress.percent,
        days_remaining: progress.days_remaining,
        target_date: progress.target_date,
        last_7_days: reconstruct(habit, &data.check_ins, today, DEFAULT_WINDOW),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewHabit;
    use std::path::PathBuf;

    fn unwritable_state(data: AppData) -> AppState {
        AppState::new(PathBuf::from("/nonexistent_chains_dir/state.json"), data)
    }

    #[tokio::test]
    async fn failed_save_leaves_state_untouched() {
        let mut data = AppData::default();
        let habit = data.create_habit(NewHabit::parse("Read", 21).unwrap(), DayKey::today());
        let state = unwritable_state(data);

        let checked = check_in(State(state.clone()), Path(habit.id)).await;
        assert!(checked.is_err());

        let created = create_habit(
            State(state.clone()),
            Json(NewHabitRequest {
                name: "Run".to_string(),
                target_days: 7,
            }),
        )
        .await;
        assert!(created.is_err());

        let logged = log_weight(
            State(state.clone()),
            Json(WeightRequest {
                weight: 72.5,
                date: None,
            }),
        )
        .await;
        assert!(logged.is_err());

        let deleted = delete_habit(State(state.clone()), Path(habit.id)).await;
        assert!(deleted.is_err());

        let data = state.data.lock().await;
        assert_eq!(data.habits.len(), 1);
        assert_eq!(data.habits[0].current_streak, 0);
        assert_eq!(data.habits[0].last_check_in, None);
        assert!(data.check_ins.is_empty());
        assert!(data.weights.is_empty());
    }

    #[tokio::test]
    async fn failed_save_keeps_stale_streak_for_retry() {
        let today = DayKey::today();
        let mut data = AppData::default();
        let habit = data.create_habit(NewHabit::parse("Read", 21).unwrap(), today.days_back(10));
        data.habits[0].current_streak = 3;
        data.habits[0].best_streak = 3;
        data.habits[0].last_check_in = Some(today.days_back(5));
        let state = unwritable_state(data);

        assert!(list_habits(State(state.clone())).await.is_err());

        let data = state.data.lock().await;
        let stored = data.habit(habit.id).unwrap();
        assert_eq!(stored.current_streak, 3);
    }
}
