use axum::Json;
use axum::extract::{Path, State};

use crate::auth::SessionUser;
use crate::db;
use crate::error::AppError;
use crate::models::{FacultyDetail, FacultyLookupResponse};
use crate::state::AppState;

pub async fn lookup(
    State(state): State<AppState>,
    _session: SessionUser,
) -> Result<Json<FacultyLookupResponse>, AppError> {
    let faculty_map = db::faculty::build_lookup_map(&state.db).await?;
    Ok(Json(FacultyLookupResponse {
        success: true,
        faculty_map,
    }))
}

pub async fn detail(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(id): Path<String>,
) -> Result<Json<FacultyDetail>, AppError> {
    let faculty = db::faculty::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let initials = db::faculty::initials_for(&state.db, &faculty.id).await?;

    Ok(Json(FacultyDetail { faculty, initials }))
}
