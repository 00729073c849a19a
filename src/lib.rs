pub mod app;
pub mod calendar;
pub mod config;
pub mod day_key;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod progress;
pub mod state;
pub mod storage;
pub mod streak;
pub mod ui;
pub mod weight;

pub use app::router;
pub use config::Config;
pub use day_key::{day_difference, DayKey};
pub use state::AppState;
pub use storage::{load_data, load_reconciled, persist_data};
