#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use campushub::api::router;
use campushub::auth::token;
use campushub::auth::verifier::{IdentityVerifier, VerifiedIdentity};
use campushub::config::AppConfig;
use campushub::db;
use campushub::error::AppError;
use campushub::github::NoopContributorsClient;
use campushub::state::AppState;

/// Stand-in for the OAuth provider: an id token of the form
/// "email|Display Name" verifies to that identity, anything else fails the
/// same way a bad upstream token would.
pub struct StubVerifier;

#[async_trait]
impl IdentityVerifier for StubVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, AppError> {
        let (email, name) = id_token.split_once('|').ok_or(AppError::Unauthorized)?;
        Ok(VerifiedIdentity {
            email: email.to_string(),
            name: name.to_string(),
        })
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        session_secret: "test-secret".to_string(),
        session_ttl_days: 3,
        allowed_email_domain: "@g.bracu.ac.bd".to_string(),
        current_semester: "Summer25".to_string(),
        github_repo: "campushub/campushub".to_string(),
        github_token: None,
    }
}

pub async fn test_app() -> (Router, SqlitePool, Arc<AppConfig>) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let config = Arc::new(test_config());
    let state = AppState {
        db: pool.clone(),
        config: config.clone(),
        verifier: Arc::new(StubVerifier),
        contributors: Arc::new(NoopContributorsClient),
    };

    (router(state), pool, config)
}

/// Provisions a student row and returns a session token for it.
pub async fn signed_in_user(
    pool: &SqlitePool,
    config: &AppConfig,
    email: &str,
    name: &str,
) -> String {
    let user = db::users::provision(pool, email, name)
        .await
        .expect("Failed to provision user");
    token::issue(&user, &config.session_secret, config.session_ttl_days)
        .expect("Failed to issue token")
}

/// Provisions and promotes before issuing, so the claims carry the admin
/// role.
pub async fn signed_in_admin(
    pool: &SqlitePool,
    config: &AppConfig,
    email: &str,
    name: &str,
) -> String {
    db::users::provision(pool, email, name)
        .await
        .expect("Failed to provision user");
    sqlx::query("UPDATE users SET role = 'admin' WHERE email = ?")
        .bind(email)
        .execute(pool)
        .await
        .expect("Failed to promote user");

    let user = db::users::find_by_email(pool, email)
        .await
        .expect("Failed to look up user")
        .expect("User missing after promotion");
    token::issue(&user, &config.session_secret, config.session_ttl_days)
        .expect("Failed to issue token")
}

pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    app.clone()
        .oneshot(request)
        .await
        .expect("Failed to send request")
}

/// One-shot request returning status plus the parsed JSON body (Null when
/// the body is empty or not JSON).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send_raw(app, method, uri, bearer, body).await;
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
