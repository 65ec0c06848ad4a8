use std::collections::HashMap;

use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::models::{Faculty, FacultyInfo, normalize_initial};

/// Creates the faculty row and one row per distinct normalized initial.
/// Blank initials are dropped before they reach the table.
pub async fn insert(
    db: &SqlitePool,
    name: &str,
    email: Option<&str>,
    img_url: Option<&str>,
    initials: &[String],
) -> Result<Faculty, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    let mut normalized: Vec<String> = initials
        .iter()
        .filter_map(|raw| normalize_initial(raw))
        .collect();
    normalized.sort();
    normalized.dedup();

    let mut tx = db.begin().await?;

    sqlx::query("INSERT INTO faculties (id, name, email, img_url) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(email)
        .bind(img_url)
        .execute(&mut *tx)
        .await?;

    for initial in &normalized {
        sqlx::query("INSERT INTO initials (faculty_id, initial) VALUES (?, ?)")
            .bind(&id)
            .bind(initial)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(Faculty {
        id,
        name: name.to_string(),
        email: email.map(str::to_string),
        img_url: img_url.map(str::to_string),
    })
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Faculty>, sqlx::Error> {
    sqlx::query_as::<_, Faculty>("SELECT id, name, email, img_url FROM faculties WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn initials_for(db: &SqlitePool, faculty_id: &str) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT initial FROM initials WHERE faculty_id = ? ORDER BY initial",
    )
    .bind(faculty_id)
    .fetch_all(db)
    .await
}

#[derive(FromRow)]
struct InitialRow {
    initial: String,
    name: String,
    email: Option<String>,
    img_url: Option<String>,
}

/// The whole roster keyed by normalized initial. Rows whose stored initial
/// normalizes to nothing are skipped instead of producing a blank key.
pub async fn build_lookup_map(
    db: &SqlitePool,
) -> Result<HashMap<String, FacultyInfo>, sqlx::Error> {
    let rows = sqlx::query_as::<_, InitialRow>(
        "SELECT i.initial, f.name, f.email, f.img_url \
         FROM initials i JOIN faculties f ON f.id = i.faculty_id",
    )
    .fetch_all(db)
    .await?;

    let mut map = HashMap::new();
    for row in rows {
        if let Some(key) = normalize_initial(&row.initial) {
            map.insert(
                key,
                FacultyInfo {
                    name: row.name,
                    email: row.email,
                    img_url: row.img_url,
                },
            );
        }
    }

    Ok(map)
}
