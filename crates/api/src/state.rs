use std::sync::Arc;

use voyago_db::{DbPool, Repositories};
use voyago_media::MediaRelay;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is an `Arc` or a bundle of `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// One repository per entity, Postgres- or memory-backed.
    pub repos: Repositories,
    /// Present when running against PostgreSQL; used by the health check.
    pub pool: Option<DbPool>,
    /// Upload pipeline to the external media host.
    pub media: MediaRelay,
    pub config: Arc<ServerConfig>,
}
