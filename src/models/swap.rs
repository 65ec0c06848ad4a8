use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const REQUEST_PENDING: &str = "PENDING";
pub const REQUEST_ACCEPTED: &str = "ACCEPTED";
pub const REQUEST_REJECTED: &str = "REJECTED";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    pub id: String,
    pub email: String,
    pub get_section_id: i64,
    pub is_done: bool,
    pub semester: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSwapRequest {
    pub giving_section: i64,
    pub asking_section: Vec<i64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AskedSection {
    pub swap_id: String,
    pub section_id: i64,
}

/// Board row for signed-in users: offerer email plus an ownership flag
/// computed against the caller's session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapListing {
    pub id: String,
    pub u_email: String,
    pub get_section_id: i64,
    pub asking_sections: Vec<i64>,
    pub is_done: bool,
    pub is_owner: bool,
    pub semester: String,
    pub created_at: String,
}

/// Anonymized board row: no offerer email, no ownership flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSwapListing {
    pub id: String,
    pub get_section_id: i64,
    pub asking_sections: Vec<i64>,
    pub is_done: bool,
    pub semester: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub id: String,
    pub swap_id: String,
    pub sender_email: String,
    pub receiver_email: String,
    pub status: String,
    pub is_read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSwapRequest {
    pub swap_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSwapRequestBody {
    pub status: String,
}

/// Both directions of a user's request traffic in one payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInbox {
    pub incoming: Vec<SwapRequest>,
    pub outgoing: Vec<SwapRequest>,
}

/// Group asked-section rows by their parent swap id. Offers without any
/// asked rows are simply absent here; listing code must fall back to an
/// empty vec so every offer carries a list, never a null.
pub fn group_asked_sections(asked: Vec<AskedSection>) -> HashMap<String, Vec<i64>> {
    let mut grouped: HashMap<String, Vec<i64>> = HashMap::new();
    for row in asked {
        grouped.entry(row.swap_id).or_default().push(row.section_id);
    }
    grouped
}
