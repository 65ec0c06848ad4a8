use axum::Json;
use axum::extract::State;

use crate::db;
use crate::error::AppError;
use crate::github::Contributor;
use crate::models::{HomeStats, ServiceStatus};
use crate::state::AppState;

pub async fn stats(State(state): State<AppState>) -> Result<Json<HomeStats>, AppError> {
    let stats = db::activity::home_stats(&state.db).await?;
    Ok(Json(stats))
}

pub async fn contributors(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contributor>>, AppError> {
    let contributors = state.contributors.fetch_contributors().await?;
    Ok(Json(contributors))
}

pub async fn service_status(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceStatus>>, AppError> {
    let statuses = db::activity::fetch_active_statuses(&state.db).await?;
    Ok(Json(statuses))
}
