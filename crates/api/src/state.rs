use std::sync::Arc;

use folio_db::versioning::ContentVersioning;

use crate::authorization::{ContentAuthorizer, OwnershipAuthorizer};
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Versioning engine: history, comparison, edits, and rollback.
    pub versioning: ContentVersioning,
    /// Decides whether an actor may modify a content item.
    pub authorizer: Arc<dyn ContentAuthorizer>,
}

impl AppState {
    /// Build state with the default [`OwnershipAuthorizer`] and the retry
    /// policy from `config`.
    pub fn new(pool: folio_db::DbPool, config: ServerConfig) -> Self {
        let versioning = ContentVersioning::new(pool.clone(), config.retry_policy());
        Self {
            pool,
            config: Arc::new(config),
            versioning,
            authorizer: Arc::new(OwnershipAuthorizer),
        }
    }
}
