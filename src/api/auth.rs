use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::token::{self, SESSION_COOKIE};
use crate::auth::{Role, SessionUser};
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub id_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfile {
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Exchanges a provider ID token for a session cookie. Every rejection on
/// this path is the same generic 401, whether the token was bad or the
/// email sits outside the institutional domain.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<User>), AppError> {
    let identity = state.verifier.verify(&req.id_token).await?;
    let email = identity.email.to_lowercase();

    if !email.ends_with(&state.config.allowed_email_domain) {
        return Err(AppError::Unauthorized);
    }

    let user = db::users::provision(&state.db, &email, &identity.name).await?;
    let token = token::issue(
        &user,
        &state.config.session_secret,
        state.config.session_ttl_days,
    )?;

    info!("signed in {}", user.email);

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(state.config.session_ttl_days));

    Ok((jar.add(cookie), Json(user)))
}

/// Profile straight from the claims. Role edits made in storage show up
/// here only after the token expires and the user signs in again.
pub async fn me(session: SessionUser) -> Json<SessionProfile> {
    Json(SessionProfile {
        email: session.email,
        name: session.name,
        role: session.role,
    })
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let removal = Cookie::build(SESSION_COOKIE).path("/");
    (jar.remove(removal), StatusCode::NO_CONTENT)
}
