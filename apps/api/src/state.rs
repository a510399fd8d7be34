use sqlx::SqlitePool;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Rendering itself is stateless — each export request builds its own backend
/// (and, for snapshots, its own browser), so nothing here is render-scoped.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
}
