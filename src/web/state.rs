use crate::config::Settings;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: the connection is a pool handle and settings sit behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Application settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Creates the state from an open connection and loaded settings.
    #[must_use]
    pub fn new(db: DatabaseConnection, settings: Settings) -> Self {
        Self {
            db,
            settings: Arc::new(settings),
        }
    }
}
