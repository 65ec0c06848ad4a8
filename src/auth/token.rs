use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::error::AppError;
use crate::models::User;

pub const SESSION_COOKIE: &str = "campushub_session";

/// Claims embedded in the session token. The token is the whole session:
/// nothing here is re-checked against storage until it expires, so a role
/// edited directly in the database only takes effect on the next sign-in.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub role: Role,
    pub exp: usize,
}

pub fn issue(user: &User, secret: &str, ttl_days: i64) -> Result<String, AppError> {
    let exp = Utc::now() + Duration::days(ttl_days);
    let claims = Claims {
        sub: user.email.clone(),
        name: user.name.clone(),
        role: Role::from_db(&user.role),
        exp: exp.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AppError::InternalServerError)
}

pub fn verify(token: &str, secret: &str) -> Result<Claims, AppError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}
