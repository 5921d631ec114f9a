//! Handlers for categories: admin pages, admin mutations and the public list.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use voyago_core::error::CoreError;
use voyago_core::types::DbId;
use voyago_db::models::category::{Category, CreateCategory, UpdateCategory};
use voyago_db::StoreError;

use crate::error::{AppError, AppResult};
use crate::form::FormData;
use crate::middleware::auth::{AdminPage, AdminSession};
use crate::path::Path;
use crate::response::{ApiResponse, ViewModel};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CategoriesView {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub category: Category,
}

async fn find_category(state: &AppState, id: DbId) -> AppResult<Category> {
    state
        .repos
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", id).into())
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /admin/addcategory
pub async fn add_category_page(AdminPage(_session): AdminPage) -> ViewModel<serde_json::Value> {
    ViewModel::new("admin/addcategory", json!({}))
}

/// GET /admin/allcategory
pub async fn all_categories_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
) -> AppResult<ViewModel<CategoriesView>> {
    let categories = state.repos.categories.list().await?;
    Ok(ViewModel::new("admin/allcategory", CategoriesView { categories }))
}

/// GET /admin/categories/{id}
pub async fn edit_category_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ViewModel<CategoryView>> {
    let category = find_category(&state, id).await?;
    Ok(ViewModel::new("admin/editcategory", CategoryView { category }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /admin/categories
pub async fn create_category(
    session: AdminSession,
    State(state): State<AppState>,
    form: FormData,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let name = form
        .non_blank("name")
        .ok_or_else(|| CoreError::Validation("Category name is required".to_string()))?;
    let input = CreateCategory::new(&name, form.text("description"));

    let category = state.repos.categories.create(&input).await?;
    tracing::info!(
        category_id = category.id,
        slug = %category.slug,
        admin_id = session.admin_id,
        "Category created"
    );
    Ok(ApiResponse::created("Category added successfully", category))
}

/// PUT /admin/categories/{id}
pub async fn update_category(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: FormData,
) -> AppResult<ApiResponse<Category>> {
    if form.contains("name") && form.non_blank("name").is_none() {
        return Err(CoreError::Validation("Category name cannot be empty".to_string()).into());
    }
    let input = UpdateCategory::new(form.non_blank("name").as_deref(), form.text("description"));

    let category = state
        .repos
        .categories
        .update(id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", id))?;
    tracing::info!(category_id = id, admin_id = session.admin_id, "Category updated");
    Ok(ApiResponse::ok("Category updated successfully", category))
}

/// DELETE /admin/deletecategory/{id}
///
/// Hard delete. Refused with 409 while packages or tours reference it.
pub async fn delete_category(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Category>> {
    let deleted = match state.repos.categories.delete(id).await {
        Ok(deleted) => deleted,
        Err(StoreError::ForeignKeyViolation { .. }) => {
            return Err(AppError::Core(CoreError::Conflict(
                "Category is still used by packages or tours".to_string(),
            )));
        }
        Err(e) => return Err(e.into()),
    };
    let category = deleted.ok_or_else(|| CoreError::not_found("Category", id))?;

    tracing::info!(category_id = id, admin_id = session.admin_id, "Category deleted");
    Ok(ApiResponse::ok("Category deleted successfully", category))
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /categories
pub async fn list_active_categories(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Category>>> {
    let categories = state.repos.categories.list_active().await?;
    Ok(ApiResponse::ok("Categories fetched successfully", categories))
}
