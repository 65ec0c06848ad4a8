use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
}

/// Body returned when an admin removes an account.
#[derive(Debug, Serialize)]
pub struct DeletedUser {
    pub email: String,
}
