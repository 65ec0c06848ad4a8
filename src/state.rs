use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::verifier::IdentityVerifier;
use crate::config::AppConfig;
use crate::github::ContributorsClient;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub contributors: Arc<dyn ContributorsClient>,
}
