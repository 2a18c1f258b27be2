use std::sync::Arc;

use sqlx::PgPool;

use crate::db::Database;
use crate::media::MediaClient;

/// Shared gateway state
pub struct AppState {
    /// Document store (PostgreSQL)
    pub db: Arc<Database>,
    /// External media host client
    pub media: Arc<MediaClient>,
    /// Secret for verifying bearer tokens
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(db: Arc<Database>, media: Arc<MediaClient>, jwt_secret: String) -> Self {
        Self {
            db,
            media,
            jwt_secret,
        }
    }

    /// Shorthand for the store connection pool
    pub fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}
