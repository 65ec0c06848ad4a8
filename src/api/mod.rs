use axum::routing::{delete, get, patch, post};
use axum::{Router, extract::State, http::StatusCode};

use crate::error::AppError;
use crate::state::AppState;

pub mod activity;
pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod faculty;
pub mod home;
pub mod routines;
pub mod swaps;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/routine", get(routines::list).post(routines::create))
        .route(
            "/api/routine/{id}",
            get(routines::share).delete(routines::remove),
        )
        .route(
            "/api/merged-routine",
            get(routines::list_merged).post(routines::create_merged),
        )
        .route(
            "/api/merged-routine/{id}",
            get(routines::share_merged).delete(routines::remove_merged),
        )
        .route("/api/swap", get(swaps::list).post(swaps::create))
        .route("/api/swap/public", get(swaps::list_public))
        .route(
            "/api/swap/requests",
            get(swaps::list_requests).post(swaps::send_request),
        )
        .route("/api/swap/requests/{id}", patch(swaps::update_request))
        .route(
            "/api/swap/requests/{id}/read",
            patch(swaps::mark_request_read),
        )
        .route(
            "/api/swap/{id}",
            patch(swaps::mark_done).delete(swaps::remove),
        )
        .route("/api/faculty/lookup", get(faculty::lookup))
        .route("/api/faculty/{id}", get(faculty::detail))
        .route(
            "/api/review",
            get(activity::list_reviews).post(activity::create_review),
        )
        .route("/api/review/{id}/vote", post(activity::vote_review))
        .route(
            "/api/material",
            get(activity::list_materials).post(activity::create_material),
        )
        .route(
            "/api/admin/users",
            get(admin::list_users).delete(admin::delete_user),
        )
        .route("/api/admin/swap/{id}", delete(admin::delete_swap))
        .route("/api/admin/faculty", post(admin::create_faculty))
        .route("/api/dashboard/userStatCount", get(dashboard::user_stat_count))
        .route("/api/dashboard/recentActivity", get(dashboard::recent_activity))
        .route("/api/home/stats", get(home::stats))
        .route("/api/home/contributors", get(home::contributors))
        .route("/api/status", get(home::service_status))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}
