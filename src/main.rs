//! Storefront gateway entry point
//!
//! Startup order matters: config → logging → store pool → schema →
//! media client → HTTP server.

use std::sync::Arc;

use storefront::config::AppConfig;
use storefront::db::Database;
use storefront::gateway;
use storefront::logging::init_logging;
use storefront::media::MediaClient;
use storefront::store::schema;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration (STOREFRONT_ENV selects config/{env}.yaml)
    let env = std::env::var("STOREFRONT_ENV").unwrap_or_else(|_| "dev".to_string());
    let config = AppConfig::load(&env);

    // 2. Logging; the guard must live for the whole run
    let _guard = init_logging(&config);
    tracing::info!(env = %env, "storefront starting");

    // 3. Document store
    let db = Arc::new(Database::connect(&config.database_url, &config.database).await?);
    schema::init_schema(db.pool()).await?;

    // 4. Media host collaborator
    let media = Arc::new(MediaClient::new(&config.media)?);

    // 5. Serve
    gateway::run_server(&config, db, media).await
}
