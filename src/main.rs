use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campushub::api::router;
use campushub::auth::verifier::GoogleIdentityVerifier;
use campushub::config::AppConfig;
use campushub::github::{ContributorsClient, GithubClient, NoopContributorsClient};
use campushub::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "campushub=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let verifier = Arc::new(GoogleIdentityVerifier::new()?);
    let contributors: Arc<dyn ContributorsClient> = if config.github_repo.is_empty() {
        info!("GITHUB_REPO not set, contributors list disabled");
        Arc::new(NoopContributorsClient)
    } else {
        Arc::new(GithubClient::new(
            config.github_repo.clone(),
            config.github_token.clone(),
        )?)
    };

    let bind_addr = config.bind_addr.clone();

    let state = AppState {
        db: pool.clone(),
        config: Arc::new(config),
        verifier,
        contributors,
    };

    let app = router(state);

    info!("listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr.as_str()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
