pub mod admin;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Every application route except `/health`.
///
/// Route tree:
///
/// ```text
/// /admin/...          admin pages and mutations (see `admin::router`)
/// /                   public pages and listings (see `public::router`)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(admin::router())
        .merge(public::router())
}
