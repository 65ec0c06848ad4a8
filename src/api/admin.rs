use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::info;

use crate::auth::SessionUser;
use crate::db;
use crate::error::AppError;
use crate::models::{
    Deleted, DeletedUser, FacultyDetail, NewFacultyRequest, User, normalize_initial,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub email: String,
}

pub async fn list_users(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<Vec<User>>, AppError> {
    session.require_admin()?;

    let users = db::users::fetch_all(&state.db).await?;
    Ok(Json(users))
}

/// Removes the account row only. Content the user created stays behind,
/// still keyed by the now-unregistered email.
pub async fn delete_user(
    State(state): State<AppState>,
    session: SessionUser,
    Json(req): Json<DeleteUserRequest>,
) -> Result<Json<DeletedUser>, AppError> {
    session.require_admin()?;

    let removed = db::users::delete_by_email(&state.db, &req.email).await?;
    if !removed {
        return Err(AppError::NotFound);
    }

    info!("admin {} removed account {}", session.email, req.email);
    Ok(Json(DeletedUser { email: req.email }))
}

pub async fn delete_swap(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, AppError> {
    session.require_admin()?;

    let removed = db::swaps::delete(&state.db, &id).await?;
    if !removed {
        return Err(AppError::NotFound);
    }

    Ok(Json(Deleted { id }))
}

pub async fn create_faculty(
    State(state): State<AppState>,
    session: SessionUser,
    Json(req): Json<NewFacultyRequest>,
) -> Result<Json<FacultyDetail>, AppError> {
    session.require_admin()?;

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if !req.initials.iter().any(|raw| normalize_initial(raw).is_some()) {
        return Err(AppError::BadRequest(
            "at least one non-empty initial is required".to_string(),
        ));
    }

    let faculty = db::faculty::insert(
        &state.db,
        req.name.trim(),
        req.email.as_deref(),
        req.img_url.as_deref(),
        &req.initials,
    )
    .await?;
    let initials = db::faculty::initials_for(&state.db, &faculty.id).await?;

    Ok(Json(FacultyDetail { faculty, initials }))
}
