use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Placeholder substituted for the owner email on publicly shared rows.
pub const ANONYMOUS_OWNER: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedRoutine {
    pub id: String,
    pub email: String,
    pub routine_name: String,
    pub routine_str: String,
    pub semester: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoutineRequest {
    pub routine_str: String,
    pub email: String,
    pub routine_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MergedRoutine {
    pub id: String,
    pub email: String,
    pub routine_data: String,
    pub semester: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMergedRoutineRequest {
    pub routine_data: String,
}

/// Share view of a routine: the owner email is already redacted and only the
/// first token of the owner's display name is attached for attribution.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedRoutine {
    #[serde(flatten)]
    pub routine: SavedRoutine,
    pub owner_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedMergedRoutine {
    #[serde(flatten)]
    pub routine: MergedRoutine,
    pub owner_name: Option<String>,
}
