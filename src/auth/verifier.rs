use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::error::AppError;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Identity extracted from a successfully verified OAuth ID token. The
/// institutional-domain gate is applied by the login handler, not here.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub email: String,
    pub name: String,
}

/// Boundary to the OAuth provider. Every failure mode collapses into the
/// same generic `Unauthorized` so callers cannot probe which accounts exist.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, AppError>;
}

pub struct GoogleIdentityVerifier {
    client: Client,
}

impl GoogleIdentityVerifier {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|_| AppError::InternalServerError)?;
        Ok(Self { client })
    }
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    email: Option<String>,
    email_verified: Option<String>,
    name: Option<String>,
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, AppError> {
        let response = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| {
                warn!("tokeninfo request failed: {}", e);
                AppError::Unauthorized
            })?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized);
        }

        let info: TokenInfo = response.json().await.map_err(|_| AppError::Unauthorized)?;

        if info.email_verified.as_deref() != Some("true") {
            return Err(AppError::Unauthorized);
        }

        let email = info.email.ok_or(AppError::Unauthorized)?;

        Ok(VerifiedIdentity {
            email,
            name: info.name.unwrap_or_default(),
        })
    }
}
