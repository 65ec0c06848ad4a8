use std::env;

use tracing::warn;

const DEV_SESSION_SECRET: &str = "campushub-dev-secret";

/// Runtime configuration, loaded once at startup and injected into every
/// request handler through [`crate::state::AppState`]. The current semester
/// and the institutional email domain live here so tests can vary them per
/// instance instead of reaching for a global.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub session_secret: String,
    pub session_ttl_days: i64,
    /// Email suffix required at sign-in, e.g. "@g.bracu.ac.bd".
    pub allowed_email_domain: String,
    /// Academic semester stamped onto newly created records.
    pub current_semester: String,
    /// "owner/repo" slug for the contributors listing on the home page.
    /// Empty disables the lookup.
    pub github_repo: String,
    pub github_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let session_secret = env::var("SESSION_SECRET").unwrap_or_else(|_| {
            warn!("SESSION_SECRET not set, using the development secret");
            DEV_SESSION_SECRET.to_string()
        });

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://campushub.db".to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            session_secret,
            session_ttl_days: env::var("SESSION_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            allowed_email_domain: env::var("ALLOWED_EMAIL_DOMAIN")
                .unwrap_or_else(|_| "@g.bracu.ac.bd".to_string()),
            current_semester: env::var("CURRENT_SEMESTER")
                .unwrap_or_else(|_| "Summer25".to_string()),
            github_repo: env::var("GITHUB_REPO").unwrap_or_default(),
            github_token: env::var("GITHUB_TOKEN").ok(),
        }
    }
}
