use crate::day_key::DayKey;
use crate::errors::AppError;
use crate::ledger::ReconcileReport;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!(
                    habits = data.habits.len(),
                    check_ins = data.check_ins.len(),
                    weights = data.weights.len(),
                    "loaded state from {}",
                    path.display()
                );
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(|err| {
        error!("failed to write data file {}: {err}", path.display());
        AppError::internal(err)
    })?;
    Ok(())
}

/// Loads the state file and writes back any streaks that broke since the last run.
pub async fn load_reconciled(
    path: &Path,
    today: DayKey,
) -> Result<(AppData, ReconcileReport), AppError> {
    let mut data = load_data(path).await;
    let report = data.reconcile(today);
    if report.changed() {
        info!(
            reset = report.reset.len(),
            repaired = report.repaired.len(),
            "reconciled state on load"
        );
        persist_data(path, &data).await?;
    }
    Ok((data, report))
}
