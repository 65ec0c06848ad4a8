use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{AskedSection, REQUEST_PENDING, Swap, SwapRequest};

/// Creates the swap row together with its asked-section rows. Either all of
/// them land or none do.
pub async fn insert(
    db: &SqlitePool,
    email: &str,
    get_section_id: i64,
    asked_sections: &[i64],
    semester: &str,
) -> Result<Swap, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let mut tx = db.begin().await?;

    sqlx::query(
        "INSERT INTO swaps (id, email, get_section_id, is_done, semester, created_at) \
         VALUES (?, ?, ?, 0, ?, ?)",
    )
    .bind(&id)
    .bind(email)
    .bind(get_section_id)
    .bind(semester)
    .bind(&now)
    .execute(&mut *tx)
    .await?;

    for section_id in asked_sections {
        sqlx::query("INSERT INTO asked_sections (swap_id, section_id) VALUES (?, ?)")
            .bind(&id)
            .bind(section_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(Swap {
        id,
        email: email.to_string(),
        get_section_id,
        is_done: false,
        semester: semester.to_string(),
        created_at: now,
    })
}

pub async fn fetch_open(db: &SqlitePool) -> Result<Vec<Swap>, sqlx::Error> {
    sqlx::query_as::<_, Swap>(
        "SELECT id, email, get_section_id, is_done, semester, created_at \
         FROM swaps WHERE is_done = 0 ORDER BY created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_asked_sections(db: &SqlitePool) -> Result<Vec<AskedSection>, sqlx::Error> {
    sqlx::query_as::<_, AskedSection>("SELECT swap_id, section_id FROM asked_sections")
        .fetch_all(db)
        .await
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Swap>, sqlx::Error> {
    sqlx::query_as::<_, Swap>(
        "SELECT id, email, get_section_id, is_done, semester, created_at \
         FROM swaps WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn mark_done(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE swaps SET is_done = 1 WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Removes the swap and everything hanging off it: asked sections and any
/// requests other users sent against it.
pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM asked_sections WHERE swap_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM swap_requests WHERE swap_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM swaps WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

pub async fn insert_request(
    db: &SqlitePool,
    swap_id: &str,
    sender_email: &str,
    receiver_email: &str,
) -> Result<SwapRequest, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO swap_requests (id, swap_id, sender_email, receiver_email, status, is_read, created_at) \
         VALUES (?, ?, ?, ?, ?, 0, ?)",
    )
    .bind(&id)
    .bind(swap_id)
    .bind(sender_email)
    .bind(receiver_email)
    .bind(REQUEST_PENDING)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(SwapRequest {
        id,
        swap_id: swap_id.to_string(),
        sender_email: sender_email.to_string(),
        receiver_email: receiver_email.to_string(),
        status: REQUEST_PENDING.to_string(),
        is_read: false,
        created_at: now,
    })
}

pub async fn find_request_by_id(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<SwapRequest>, sqlx::Error> {
    sqlx::query_as::<_, SwapRequest>(
        "SELECT id, swap_id, sender_email, receiver_email, status, is_read, created_at \
         FROM swap_requests WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Lookup scoped to the addressee. A request someone else received is
/// indistinguishable from a missing one.
pub async fn find_request_for_receiver(
    db: &SqlitePool,
    id: &str,
    receiver_email: &str,
) -> Result<Option<SwapRequest>, sqlx::Error> {
    sqlx::query_as::<_, SwapRequest>(
        "SELECT id, swap_id, sender_email, receiver_email, status, is_read, created_at \
         FROM swap_requests WHERE id = ? AND receiver_email = ?",
    )
    .bind(id)
    .bind(receiver_email)
    .fetch_optional(db)
    .await
}

pub async fn find_pending_request(
    db: &SqlitePool,
    swap_id: &str,
    sender_email: &str,
) -> Result<Option<SwapRequest>, sqlx::Error> {
    sqlx::query_as::<_, SwapRequest>(
        "SELECT id, swap_id, sender_email, receiver_email, status, is_read, created_at \
         FROM swap_requests WHERE swap_id = ? AND sender_email = ? AND status = ?",
    )
    .bind(swap_id)
    .bind(sender_email)
    .bind(REQUEST_PENDING)
    .fetch_optional(db)
    .await
}

/// A status change resets the read flag so the outcome shows up as unread on
/// the sender's side.
pub async fn update_request_status(
    db: &SqlitePool,
    id: &str,
    status: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE swap_requests SET status = ?, is_read = 0 WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn mark_request_read(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE swap_requests SET is_read = 1 WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn fetch_incoming(
    db: &SqlitePool,
    receiver_email: &str,
) -> Result<Vec<SwapRequest>, sqlx::Error> {
    sqlx::query_as::<_, SwapRequest>(
        "SELECT id, swap_id, sender_email, receiver_email, status, is_read, created_at \
         FROM swap_requests WHERE receiver_email = ? ORDER BY created_at DESC",
    )
    .bind(receiver_email)
    .fetch_all(db)
    .await
}

pub async fn fetch_outgoing(
    db: &SqlitePool,
    sender_email: &str,
) -> Result<Vec<SwapRequest>, sqlx::Error> {
    sqlx::query_as::<_, SwapRequest>(
        "SELECT id, swap_id, sender_email, receiver_email, status, is_read, created_at \
         FROM swap_requests WHERE sender_email = ? ORDER BY created_at DESC",
    )
    .bind(sender_email)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::REQUEST_ACCEPTED;
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
    async fn insert_writes_swap_and_asked_sections_together() {
        let pool = setup_test_db().await;

        let swap = insert(&pool, "a@g.bracu.ac.bd", 101, &[202, 303], "Summer25")
            .await
            .expect("Failed to insert swap");

        let open = fetch_open(&pool).await.expect("Failed to fetch swaps");
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].get_section_id, 101);
        assert!(!open[0].is_done);

        let asked = fetch_asked_sections(&pool)
            .await
            .expect("Failed to fetch asked sections");
        let mine: Vec<i64> = asked
            .iter()
            .filter(|row| row.swap_id == swap.id)
            .map(|row| row.section_id)
            .collect();
        assert_eq!(mine, vec![202, 303]);
    }

    #[tokio::test]
    async fn done_swaps_drop_out_of_the_open_listing() {
        let pool = setup_test_db().await;

        let swap = insert(&pool, "a@g.bracu.ac.bd", 101, &[202], "Summer25")
            .await
            .expect("Failed to insert swap");

        assert!(mark_done(&pool, &swap.id).await.expect("mark_done failed"));

        let open = fetch_open(&pool).await.expect("Failed to fetch swaps");
        assert!(open.is_empty());

        // The row itself is still there.
        let found = find_by_id(&pool, &swap.id)
            .await
            .expect("lookup failed")
            .expect("swap missing");
        assert!(found.is_done);
    }

    #[tokio::test]
    async fn delete_takes_asked_sections_and_requests_with_it() {
        let pool = setup_test_db().await;

        let swap = insert(&pool, "a@g.bracu.ac.bd", 101, &[202], "Summer25")
            .await
            .expect("Failed to insert swap");
        insert_request(&pool, &swap.id, "b@g.bracu.ac.bd", "a@g.bracu.ac.bd")
            .await
            .expect("Failed to insert request");

        assert!(delete(&pool, &swap.id).await.expect("delete failed"));

        let asked = fetch_asked_sections(&pool)
            .await
            .expect("Failed to fetch asked sections");
        assert!(asked.is_empty());

        let incoming = fetch_incoming(&pool, "a@g.bracu.ac.bd")
            .await
            .expect("Failed to fetch requests");
        assert!(incoming.is_empty());
    }

    #[tokio::test]
    async fn status_update_clears_the_read_flag() {
        let pool = setup_test_db().await;

        let swap = insert(&pool, "a@g.bracu.ac.bd", 101, &[202], "Summer25")
            .await
            .expect("Failed to insert swap");
        let request = insert_request(&pool, &swap.id, "b@g.bracu.ac.bd", "a@g.bracu.ac.bd")
            .await
            .expect("Failed to insert request");

        assert!(
            mark_request_read(&pool, &request.id)
                .await
                .expect("mark read failed")
        );
        assert!(
            update_request_status(&pool, &request.id, REQUEST_ACCEPTED)
                .await
                .expect("status update failed")
        );

        let updated = find_request_by_id(&pool, &request.id)
            .await
            .expect("lookup failed")
            .expect("request missing");
        assert_eq!(updated.status, REQUEST_ACCEPTED);
        assert!(!updated.is_read);
    }

    #[tokio::test]
    async fn receiver_scoped_lookup_hides_other_peoples_requests() {
        let pool = setup_test_db().await;

        let swap = insert(&pool, "a@g.bracu.ac.bd", 101, &[202], "Summer25")
            .await
            .expect("Failed to insert swap");
        let request = insert_request(&pool, &swap.id, "b@g.bracu.ac.bd", "a@g.bracu.ac.bd")
            .await
            .expect("Failed to insert request");

        let as_receiver = find_request_for_receiver(&pool, &request.id, "a@g.bracu.ac.bd")
            .await
            .expect("lookup failed");
        assert!(as_receiver.is_some());

        let as_stranger = find_request_for_receiver(&pool, &request.id, "c@g.bracu.ac.bd")
            .await
            .expect("lookup failed");
        assert!(as_stranger.is_none());
    }
}
