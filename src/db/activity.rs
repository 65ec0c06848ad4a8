use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{
    CourseMaterial, HomeStats, Review, ScoredReview, ServiceStatus, UserStatCount,
};

pub async fn insert_review(
    db: &SqlitePool,
    email: &str,
    initial: &str,
    course_id: &str,
    rating: i64,
    content: &str,
) -> Result<Review, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO reviews (id, email, initial, course_id, rating, content, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(email)
    .bind(initial)
    .bind(course_id)
    .bind(rating)
    .bind(content)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(Review {
        id,
        email: email.to_string(),
        initial: initial.to_string(),
        course_id: course_id.to_string(),
        rating,
        content: content.to_string(),
        created_at: now,
    })
}

pub async fn fetch_reviews_by_initial(
    db: &SqlitePool,
    initial: &str,
) -> Result<Vec<ScoredReview>, sqlx::Error> {
    sqlx::query_as::<_, ScoredReview>(
        "SELECT r.id, r.email, r.initial, r.course_id, r.rating, r.content, r.created_at, \
                COALESCE(SUM(v.value), 0) AS score \
         FROM reviews r LEFT JOIN votes v ON v.review_id = r.id \
         WHERE r.initial = ? \
         GROUP BY r.id \
         ORDER BY r.created_at DESC",
    )
    .bind(initial)
    .fetch_all(db)
    .await
}

pub async fn find_review_by_id(db: &SqlitePool, id: &str) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "SELECT id, email, initial, course_id, rating, content, created_at \
         FROM reviews WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// One vote per user per review. Voting again replaces the previous value
/// instead of stacking.
pub async fn upsert_vote(
    db: &SqlitePool,
    review_id: &str,
    email: &str,
    value: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO votes (review_id, email, value) VALUES (?, ?, ?) \
         ON CONFLICT(review_id, email) DO UPDATE SET value = excluded.value",
    )
    .bind(review_id)
    .bind(email)
    .bind(value)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn review_score(db: &SqlitePool, review_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(value), 0) FROM votes WHERE review_id = ?",
    )
    .bind(review_id)
    .fetch_one(db)
    .await
}

pub async fn insert_material(
    db: &SqlitePool,
    email: &str,
    course_id: &str,
    title: &str,
    link: &str,
) -> Result<CourseMaterial, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO materials (id, email, course_id, title, link, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(email)
    .bind(course_id)
    .bind(title)
    .bind(link)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(CourseMaterial {
        id,
        email: email.to_string(),
        course_id: course_id.to_string(),
        title: title.to_string(),
        link: link.to_string(),
        created_at: now,
    })
}

pub async fn fetch_materials_by_course(
    db: &SqlitePool,
    course_id: &str,
) -> Result<Vec<CourseMaterial>, sqlx::Error> {
    sqlx::query_as::<_, CourseMaterial>(
        "SELECT id, email, course_id, title, link, created_at \
         FROM materials WHERE course_id = ? ORDER BY created_at DESC",
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_recent_reviews(
    db: &SqlitePool,
    email: &str,
    limit: i64,
) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "SELECT id, email, initial, course_id, rating, content, created_at \
         FROM reviews WHERE email = ? ORDER BY created_at DESC LIMIT ?",
    )
    .bind(email)
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn fetch_recent_materials(
    db: &SqlitePool,
    email: &str,
    limit: i64,
) -> Result<Vec<CourseMaterial>, sqlx::Error> {
    sqlx::query_as::<_, CourseMaterial>(
        "SELECT id, email, course_id, title, link, created_at \
         FROM materials WHERE email = ? ORDER BY created_at DESC LIMIT ?",
    )
    .bind(email)
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn user_stat_count(db: &SqlitePool, email: &str) -> Result<UserStatCount, sqlx::Error> {
    let routine_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM saved_routines WHERE email = ?")
            .bind(email)
            .fetch_one(db)
            .await?;
    let merged_routine_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM merged_routines WHERE email = ?")
            .bind(email)
            .fetch_one(db)
            .await?;
    let swap_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM swaps WHERE email = ?")
        .bind(email)
        .fetch_one(db)
        .await?;
    let review_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE email = ?")
        .bind(email)
        .fetch_one(db)
        .await?;

    Ok(UserStatCount {
        routine_count,
        merged_routine_count,
        swap_count,
        review_count,
    })
}

pub async fn home_stats(db: &SqlitePool) -> Result<HomeStats, sqlx::Error> {
    let user_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await?;
    let routine_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM saved_routines")
        .fetch_one(db)
        .await?;
    let swap_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM swaps")
        .fetch_one(db)
        .await?;
    let review_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews")
        .fetch_one(db)
        .await?;
    let material_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM materials")
        .fetch_one(db)
        .await?;

    Ok(HomeStats {
        user_count,
        routine_count,
        swap_count,
        review_count,
        material_count,
    })
}

pub async fn fetch_active_statuses(db: &SqlitePool) -> Result<Vec<ServiceStatus>, sqlx::Error> {
    sqlx::query_as::<_, ServiceStatus>(
        "SELECT id, title, is_active, message FROM service_status WHERE is_active = 1",
    )
    .fetch_all(db)
    .await
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
    async fn review_scores_sum_votes_per_review() {
        let pool = setup_test_db().await;

        let review = insert_review(&pool, "a@g.bracu.ac.bd", "MMA", "CSE110", 5, "Clear lectures")
            .await
            .expect("Failed to insert review");

        upsert_vote(&pool, &review.id, "b@g.bracu.ac.bd", 1)
            .await
            .expect("Failed to vote");
        upsert_vote(&pool, &review.id, "c@g.bracu.ac.bd", 1)
            .await
            .expect("Failed to vote");
        upsert_vote(&pool, &review.id, "d@g.bracu.ac.bd", -1)
            .await
            .expect("Failed to vote");

        let listed = fetch_reviews_by_initial(&pool, "MMA")
            .await
            .expect("Failed to fetch reviews");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].score, 1);
    }

    #[tokio::test]
    async fn revoting_replaces_instead_of_stacking() {
        let pool = setup_test_db().await;

        let review = insert_review(&pool, "a@g.bracu.ac.bd", "MMA", "CSE110", 4, "Good")
            .await
            .expect("Failed to insert review");

        upsert_vote(&pool, &review.id, "b@g.bracu.ac.bd", 1)
            .await
            .expect("Failed to vote");
        upsert_vote(&pool, &review.id, "b@g.bracu.ac.bd", -1)
            .await
            .expect("Failed to vote");

        assert_eq!(
            review_score(&pool, &review.id).await.expect("score failed"),
            -1
        );
    }

    #[tokio::test]
    async fn unvoted_reviews_score_zero() {
        let pool = setup_test_db().await;

        insert_review(&pool, "a@g.bracu.ac.bd", "MMA", "CSE110", 3, "Fine")
            .await
            .expect("Failed to insert review");

        let listed = fetch_reviews_by_initial(&pool, "MMA")
            .await
            .expect("Failed to fetch reviews");
        assert_eq!(listed[0].score, 0);
    }

    #[tokio::test]
    async fn recent_feeds_cap_at_the_limit_and_skip_other_users() {
        let pool = setup_test_db().await;

        for n in 0..7 {
            insert_review(&pool, "a@g.bracu.ac.bd", "MMA", "CSE110", 5, &format!("r{n}"))
                .await
                .expect("Failed to insert review");
        }
        insert_review(&pool, "b@g.bracu.ac.bd", "MMA", "CSE110", 1, "not mine")
            .await
            .expect("Failed to insert review");

        let recent = fetch_recent_reviews(&pool, "a@g.bracu.ac.bd", 5)
            .await
            .expect("Failed to fetch recent reviews");
        assert_eq!(recent.len(), 5);
        assert!(recent.iter().all(|r| r.email == "a@g.bracu.ac.bd"));
    }

    #[tokio::test]
    async fn stat_counts_are_scoped_to_the_owner() {
        let pool = setup_test_db().await;

        insert_review(&pool, "a@g.bracu.ac.bd", "MMA", "CSE110", 5, "Mine")
            .await
            .expect("Failed to insert review");
        insert_review(&pool, "b@g.bracu.ac.bd", "MMA", "CSE110", 2, "Theirs")
            .await
            .expect("Failed to insert review");

        let stats = user_stat_count(&pool, "a@g.bracu.ac.bd")
            .await
            .expect("Failed to count");
        assert_eq!(stats.review_count, 1);
        assert_eq!(stats.routine_count, 0);
    }
}
