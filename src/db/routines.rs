use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{MergedRoutine, SavedRoutine};

pub async fn fetch_for_owner(
    db: &SqlitePool,
    email: &str,
) -> Result<Vec<SavedRoutine>, sqlx::Error> {
    sqlx::query_as::<_, SavedRoutine>(
        "SELECT id, email, routine_name, routine_str, semester, created_at \
         FROM saved_routines WHERE email = ? ORDER BY created_at DESC",
    )
    .bind(email)
    .fetch_all(db)
    .await
}

pub async fn insert(
    db: &SqlitePool,
    email: &str,
    routine_name: &str,
    routine_str: &str,
    semester: &str,
) -> Result<SavedRoutine, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO saved_routines (id, email, routine_name, routine_str, semester, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(email)
    .bind(routine_name)
    .bind(routine_str)
    .bind(semester)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(SavedRoutine {
        id,
        email: email.to_string(),
        routine_name: routine_name.to_string(),
        routine_str: routine_str.to_string(),
        semester: semester.to_string(),
        created_at: now,
    })
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<SavedRoutine>, sqlx::Error> {
    sqlx::query_as::<_, SavedRoutine>(
        "SELECT id, email, routine_name, routine_str, semester, created_at \
         FROM saved_routines WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM saved_routines WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn fetch_merged_for_owner(
    db: &SqlitePool,
    email: &str,
) -> Result<Vec<MergedRoutine>, sqlx::Error> {
    sqlx::query_as::<_, MergedRoutine>(
        "SELECT id, email, routine_data, semester, created_at \
         FROM merged_routines WHERE email = ? ORDER BY created_at DESC",
    )
    .bind(email)
    .fetch_all(db)
    .await
}

pub async fn insert_merged(
    db: &SqlitePool,
    email: &str,
    routine_data: &str,
    semester: &str,
) -> Result<MergedRoutine, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO merged_routines (id, email, routine_data, semester, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(email)
    .bind(routine_data)
    .bind(semester)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(MergedRoutine {
        id,
        email: email.to_string(),
        routine_data: routine_data.to_string(),
        semester: semester.to_string(),
        created_at: now,
    })
}

pub async fn find_merged_by_id(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<MergedRoutine>, sqlx::Error> {
    sqlx::query_as::<_, MergedRoutine>(
        "SELECT id, email, routine_data, semester, created_at \
         FROM merged_routines WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_merged(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM merged_routines WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
