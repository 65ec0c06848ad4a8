use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::auth::SessionUser;
use crate::db;
use crate::error::AppError;
use crate::models::{
    CourseMaterial, NewMaterialRequest, NewReviewRequest, Review, ScoredReview, VoteOutcome,
    VoteRequest, normalize_initial,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReviewQuery {
    #[serde(default)]
    initial: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialQuery {
    #[serde(default)]
    course_id: String,
}

pub async fn list_reviews(
    State(state): State<AppState>,
    _session: SessionUser,
    Query(params): Query<ReviewQuery>,
) -> Result<Json<Vec<ScoredReview>>, AppError> {
    let initial = normalize_initial(&params.initial)
        .ok_or_else(|| AppError::BadRequest("initial must not be empty".to_string()))?;

    let reviews = db::activity::fetch_reviews_by_initial(&state.db, &initial).await?;
    Ok(Json(reviews))
}

pub async fn create_review(
    State(state): State<AppState>,
    session: SessionUser,
    Json(req): Json<NewReviewRequest>,
) -> Result<Json<Review>, AppError> {
    let initial = normalize_initial(&req.initial)
        .ok_or_else(|| AppError::BadRequest("initial must not be empty".to_string()))?;
    if !(1..=5).contains(&req.rating) {
        return Err(AppError::BadRequest("rating must be between 1 and 5".to_string()));
    }
    if req.course_id.trim().is_empty() {
        return Err(AppError::BadRequest("courseId must not be empty".to_string()));
    }
    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest("content must not be empty".to_string()));
    }

    let review = db::activity::insert_review(
        &state.db,
        &session.email,
        &initial,
        &req.course_id,
        req.rating,
        &req.content,
    )
    .await?;

    Ok(Json(review))
}

pub async fn vote_review(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<VoteOutcome>, AppError> {
    let value = match req.value.as_str() {
        "up" => 1,
        "down" => -1,
        _ => {
            return Err(AppError::BadRequest(
                "value must be \"up\" or \"down\"".to_string(),
            ));
        }
    };

    let review = db::activity::find_review_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    db::activity::upsert_vote(&state.db, &review.id, &session.email, value).await?;
    let score = db::activity::review_score(&state.db, &review.id).await?;

    Ok(Json(VoteOutcome {
        review_id: review.id,
        score,
    }))
}

pub async fn list_materials(
    State(state): State<AppState>,
    _session: SessionUser,
    Query(params): Query<MaterialQuery>,
) -> Result<Json<Vec<CourseMaterial>>, AppError> {
    if params.course_id.trim().is_empty() {
        return Err(AppError::BadRequest("courseId must not be empty".to_string()));
    }

    let materials = db::activity::fetch_materials_by_course(&state.db, &params.course_id).await?;
    Ok(Json(materials))
}

pub async fn create_material(
    State(state): State<AppState>,
    session: SessionUser,
    Json(req): Json<NewMaterialRequest>,
) -> Result<Json<CourseMaterial>, AppError> {
    if req.course_id.trim().is_empty() {
        return Err(AppError::BadRequest("courseId must not be empty".to_string()));
    }
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }
    if req.link.trim().is_empty() {
        return Err(AppError::BadRequest("link must not be empty".to_string()));
    }

    let material = db::activity::insert_material(
        &state.db,
        &session.email,
        &req.course_id,
        &req.title,
        &req.link,
    )
    .await?;

    Ok(Json(material))
}
