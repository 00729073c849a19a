use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits", post(handlers::create_habit_form))
        .route("/habits/:id/check-in", post(handlers::check_in_form))
        .route("/habits/:id/delete", post(handlers::delete_habit_form))
        .route("/weights", post(handlers::log_weight_form))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/habits/:id/check-in", post(handlers::check_in))
        .route("/api/habits/:id/calendar", get(handlers::habit_calendar))
        .route("/api/habits/:id/month", get(handlers::habit_month))
        .route(
            "/api/weights",
            get(handlers::get_weights).post(handlers::log_weight),
        )
        .with_state(state)
}
