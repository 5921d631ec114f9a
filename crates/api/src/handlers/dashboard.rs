//! Admin landing page.

use axum::extract::State;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AdminPage;
use crate::response::ViewModel;
use crate::state::AppState;

/// Entity counts shown on the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub category_count: i64,
    pub tour_count: i64,
    pub package_count: i64,
}

/// GET /admin/
pub async fn dashboard(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
) -> AppResult<ViewModel<DashboardData>> {
    let data = DashboardData {
        category_count: state.repos.categories.count().await?,
        tour_count: state.repos.tours.count().await?,
        package_count: state.repos.packages.count().await?,
    };
    Ok(ViewModel::new("admin/dashboard", data))
}
