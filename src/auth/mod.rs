pub mod token;
pub mod verifier;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Access role carried in the session claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn from_db(role: &str) -> Self {
        if role == "admin" { Role::Admin } else { Role::Student }
    }
}

/// The caller's identity for the duration of one request, decoded from the
/// session token. Extraction fails with 401 when the token is missing,
/// expired or tampered with.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admin gate. Non-admins get the same 401 as anonymous callers, so
    /// admin routes reveal nothing about the target resource.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .or_else(|| {
                CookieJar::from_headers(&parts.headers)
                    .get(token::SESSION_COOKIE)
                    .map(|cookie| cookie.value().to_string())
            })
            .ok_or(AppError::Unauthorized)?;

        let claims = token::verify(&token, &state.config.session_secret)?;

        Ok(SessionUser {
            email: claims.sub,
            name: claims.name,
            role: claims.role,
        })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

/// Outcome of the shared authorization predicate for owned resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Forbidden,
    Unauthenticated,
}

impl Access {
    /// Map to the uniform 401/403 outcome. Callers resolve missing rows to
    /// 404 before consulting ownership, so the three-way distinction stays
    /// consistent across handlers.
    pub fn require(self) -> Result<(), AppError> {
        match self {
            Access::Allowed => Ok(()),
            Access::Forbidden => Err(AppError::Forbidden),
            Access::Unauthenticated => Err(AppError::Unauthorized),
        }
    }
}

/// Single ownership-or-admin predicate used by every mutating handler.
pub fn can_mutate(session: Option<&SessionUser>, owner_email: &str) -> Access {
    match session {
        None => Access::Unauthenticated,
        Some(user) if user.email == owner_email || user.is_admin() => Access::Allowed,
        Some(_) => Access::Forbidden,
    }
}
