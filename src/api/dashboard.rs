use axum::Json;
use axum::extract::State;

use crate::auth::SessionUser;
use crate::db;
use crate::error::AppError;
use crate::models::{RecentActivity, UserStatCount};
use crate::state::AppState;

const RECENT_LIMIT: i64 = 5;

pub async fn user_stat_count(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<UserStatCount>, AppError> {
    let counts = db::activity::user_stat_count(&state.db, &session.email).await?;
    Ok(Json(counts))
}

pub async fn recent_activity(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<RecentActivity>, AppError> {
    let reviews =
        db::activity::fetch_recent_reviews(&state.db, &session.email, RECENT_LIMIT).await?;
    let materials =
        db::activity::fetch_recent_materials(&state.db, &session.email, RECENT_LIMIT).await?;

    Ok(Json(RecentActivity { reviews, materials }))
}
