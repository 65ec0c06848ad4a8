use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::User;

pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT email, name, role, created_at FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await
}

/// First-sign-in provisioning. An existing row wins: its name and role are
/// never overwritten by a later sign-in.
pub async fn provision(db: &SqlitePool, email: &str, name: &str) -> Result<User, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO users (email, name, role, created_at) VALUES (?, ?, 'student', ?) \
         ON CONFLICT(email) DO NOTHING",
    )
    .bind(email)
    .bind(name)
    .bind(&now)
    .execute(db)
    .await?;

    find_by_email(db, email)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn fetch_all(db: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT email, name, role, created_at FROM users ORDER BY created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn delete_by_email(db: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE email = ?")
        .bind(email)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    #[tokio::test]
    async fn provision_creates_student_once() {
        let pool = setup_test_db().await;

        let user = provision(&pool, "a@g.bracu.ac.bd", "Ayesha Rahman")
            .await
            .expect("Failed to provision user");
        assert_eq!(user.role, "student");
        assert_eq!(user.name, "Ayesha Rahman");

        let again = provision(&pool, "a@g.bracu.ac.bd", "Someone Else")
            .await
            .expect("Failed to re-provision user");
        assert_eq!(again.name, "Ayesha Rahman");

        let all = fetch_all(&pool).await.expect("Failed to fetch users");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn provision_keeps_an_existing_role() {
        let pool = setup_test_db().await;

        provision(&pool, "admin@g.bracu.ac.bd", "Portal Admin")
            .await
            .expect("Failed to provision user");
        sqlx::query("UPDATE users SET role = 'admin' WHERE email = ?")
            .bind("admin@g.bracu.ac.bd")
            .execute(&pool)
            .await
            .expect("Failed to update role");

        let user = provision(&pool, "admin@g.bracu.ac.bd", "Portal Admin")
            .await
            .expect("Failed to re-provision user");
        assert_eq!(user.role, "admin");
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let pool = setup_test_db().await;

        provision(&pool, "a@g.bracu.ac.bd", "Ayesha Rahman")
            .await
            .expect("Failed to provision user");

        assert!(delete_by_email(&pool, "a@g.bracu.ac.bd").await.expect("delete failed"));
        assert!(!delete_by_email(&pool, "a@g.bracu.ac.bd").await.expect("delete failed"));
    }
}
