use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub img_url: Option<String>,
}

/// Value stored under each normalized initial in the lookup map.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyInfo {
    pub name: String,
    pub email: Option<String>,
    pub img_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyDetail {
    #[serde(flatten)]
    pub faculty: Faculty,
    pub initials: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyLookupResponse {
    pub success: bool,
    pub faculty_map: HashMap<String, FacultyInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFacultyRequest {
    pub name: String,
    pub email: Option<String>,
    pub img_url: Option<String>,
    pub initials: Vec<String>,
}

/// Canonical form of a faculty initial, applied at both write and read time.
/// Initials that are empty after trimming carry no information and are
/// dropped rather than stored or matched as blank keys.
pub fn normalize_initial(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
