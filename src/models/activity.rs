use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub email: String,
    pub initial: String,
    pub course_id: String,
    pub rating: i64,
    pub content: String,
    pub created_at: String,
}

/// Review as listed per faculty, with its aggregate vote score.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScoredReview {
    pub id: String,
    pub email: String,
    pub initial: String,
    pub course_id: String,
    pub rating: i64,
    pub content: String,
    pub created_at: String,
    pub score: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReviewRequest {
    pub initial: String,
    pub course_id: String,
    pub rating: i64,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CourseMaterial {
    pub id: String,
    pub email: String,
    pub course_id: String,
    pub title: String,
    pub link: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterialRequest {
    pub course_id: String,
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    /// "up" or "down".
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    pub review_id: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub id: String,
    pub title: String,
    pub is_active: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatCount {
    pub routine_count: i64,
    pub merged_routine_count: i64,
    pub swap_count: i64,
    pub review_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub reviews: Vec<Review>,
    pub materials: Vec<CourseMaterial>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeStats {
    pub user_count: i64,
    pub routine_count: i64,
    pub swap_count: i64,
    pub review_count: i64,
    pub material_count: i64,
}
