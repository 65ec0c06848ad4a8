use axum::Json;
use axum::extract::{Path, State};

use crate::auth::{SessionUser, can_mutate};
use crate::db;
use crate::error::AppError;
use crate::models::{
    ANONYMOUS_OWNER, Deleted, MergedRoutine, NewMergedRoutineRequest, NewRoutineRequest,
    SavedRoutine, SharedMergedRoutine, SharedRoutine,
};
use crate::state::AppState;

const DEFAULT_ROUTINE_NAME: &str = "Untitled routine";

pub async fn list(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<Vec<SavedRoutine>>, AppError> {
    let routines = db::routines::fetch_for_owner(&state.db, &session.email).await?;
    Ok(Json(routines))
}

pub async fn create(
    State(state): State<AppState>,
    session: SessionUser,
    Json(req): Json<NewRoutineRequest>,
) -> Result<Json<SavedRoutine>, AppError> {
    // A client-supplied owner differing from the session is rejected
    // outright, never silently rewritten.
    if req.email != session.email {
        return Err(AppError::Forbidden);
    }
    if req.routine_str.trim().is_empty() {
        return Err(AppError::BadRequest("routineStr must not be empty".to_string()));
    }

    let name = req.routine_name.as_deref().unwrap_or(DEFAULT_ROUTINE_NAME);
    let routine = db::routines::insert(
        &state.db,
        &session.email,
        name,
        &req.routine_str,
        &state.config.current_semester,
    )
    .await?;

    Ok(Json(routine))
}

/// Public share view. The owner email never leaves the server: it is
/// swapped for a fixed placeholder, with only the first display-name token
/// attached for attribution.
pub async fn share(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SharedRoutine>, AppError> {
    let routine = db::routines::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    let owner_name = owner_first_name(&state, &routine.email).await?;

    Ok(Json(SharedRoutine {
        routine: SavedRoutine {
            email: ANONYMOUS_OWNER.to_string(),
            ..routine
        },
        owner_name,
    }))
}

pub async fn remove(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, AppError> {
    let routine = db::routines::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    can_mutate(Some(&session), &routine.email).require()?;

    db::routines::delete(&state.db, &id).await?;
    Ok(Json(Deleted { id }))
}

pub async fn list_merged(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<Vec<MergedRoutine>>, AppError> {
    let routines = db::routines::fetch_merged_for_owner(&state.db, &session.email).await?;
    Ok(Json(routines))
}

pub async fn create_merged(
    State(state): State<AppState>,
    session: SessionUser,
    Json(req): Json<NewMergedRoutineRequest>,
) -> Result<Json<MergedRoutine>, AppError> {
    if req.routine_data.trim().is_empty() {
        return Err(AppError::BadRequest("routineData must not be empty".to_string()));
    }

    let routine = db::routines::insert_merged(
        &state.db,
        &session.email,
        &req.routine_data,
        &state.config.current_semester,
    )
    .await?;

    Ok(Json(routine))
}

pub async fn share_merged(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SharedMergedRoutine>, AppError> {
    let routine = db::routines::find_merged_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    let owner_name = owner_first_name(&state, &routine.email).await?;

    Ok(Json(SharedMergedRoutine {
        routine: MergedRoutine {
            email: ANONYMOUS_OWNER.to_string(),
            ..routine
        },
        owner_name,
    }))
}

pub async fn remove_merged(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, AppError> {
    let routine = db::routines::find_merged_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    can_mutate(Some(&session), &routine.email).require()?;

    db::routines::delete_merged(&state.db, &id).await?;
    Ok(Json(Deleted { id }))
}

async fn owner_first_name(state: &AppState, email: &str) -> Result<Option<String>, AppError> {
    let owner = db::users::find_by_email(&state.db, email).await?;
    Ok(owner.and_then(|user| {
        user.name
            .split_whitespace()
            .next()
            .map(|token| token.to_string())
    }))
}
