//! Handlers for packages: admin pages, multipart create / update, soft
//! delete, single-image removal and the public listing.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use voyago_core::error::CoreError;
use voyago_core::media_list::remove_exact;
use voyago_core::normalize::parse_amount;
use voyago_core::package::{parse_features, DEFAULT_CURRENCY};
use voyago_core::types::DbId;
use voyago_db::models::category::Category;
use voyago_db::models::package::{CreatePackage, Package, PackageWithCategory, UpdatePackage};

use super::{existing_category_id, parse_flag, required_image_url};
use crate::error::AppResult;
use crate::form::{FormData, MAX_IMAGES};
use crate::middleware::auth::{AdminPage, AdminSession};
use crate::path::Path;
use crate::query::ImageUrlQuery;
use crate::response::{ApiResponse, ViewModel};
use crate::state::AppState;
use crate::uploads::{append_images, upload_images};

const REQUIRED_FIELDS_MESSAGE: &str = "Category, name and price are required";

#[derive(Debug, Serialize)]
pub struct PackagesView {
    pub packages: Vec<PackageWithCategory>,
}

#[derive(Debug, Serialize)]
pub struct PackageFormView {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct PackageEditView {
    pub package: Package,
    pub categories: Vec<Category>,
}

async fn find_package(state: &AppState, id: DbId) -> AppResult<Package> {
    state
        .repos
        .packages
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Package", id).into())
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /admin/packages
pub async fn all_packages_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
) -> AppResult<ViewModel<PackagesView>> {
    let packages = state.repos.packages.list_with_category().await?;
    Ok(ViewModel::new("admin/allpackages", PackagesView { packages }))
}

/// GET /admin/packages/add
pub async fn add_package_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
) -> AppResult<ViewModel<PackageFormView>> {
    let categories = state.repos.categories.list_active().await?;
    Ok(ViewModel::new("admin/addpackage", PackageFormView { categories }))
}

/// GET /admin/packages/{id}/edit
pub async fn edit_package_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ViewModel<PackageEditView>> {
    let package = find_package(&state, id).await?;
    let categories = state.repos.categories.list_active().await?;
    Ok(ViewModel::new(
        "admin/editpackage",
        PackageEditView {
            package,
            categories,
        },
    ))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// GET /admin/packages/{id}
pub async fn get_package(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Package>> {
    let package = find_package(&state, id).await?;
    Ok(ApiResponse::ok("Package fetched successfully", package))
}

/// POST /admin/packages
///
/// Every field is validated before any image is relayed, so a rejected form
/// never leaves media on the host.
pub async fn create_package(
    session: AdminSession,
    State(state): State<AppState>,
    mut form: FormData,
) -> AppResult<(StatusCode, Json<ApiResponse<Package>>)> {
    let files = form.take_images(MAX_IMAGES)?;

    let (Some(raw_category), Some(name), Some(raw_price)) = (
        form.non_blank("categoryId"),
        form.non_blank("name"),
        form.non_blank("price"),
    ) else {
        return Err(CoreError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()).into());
    };

    let price = parse_amount("price", &raw_price)?;
    let features = parse_features(form.get("features"))?;
    let category_id = existing_category_id(&state, &raw_category).await?;

    let images = upload_images(&state, &files).await?;
    let input = CreatePackage {
        category_id,
        name,
        description: form.text("description").unwrap_or_default(),
        price,
        currency: form
            .non_blank("currency")
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        features,
        images,
        videos: form.list("videos"),
    };

    let package = state.repos.packages.create(&input).await?;
    tracing::info!(
        package_id = package.id,
        category_id,
        images = package.images.len(),
        admin_id = session.admin_id,
        "Package created"
    );
    Ok(ApiResponse::created("Package created successfully", package))
}

/// PUT /admin/packages/{id}
///
/// Absent fields are left alone. New images are appended; a present
/// `videos` field (even empty) replaces the list.
pub async fn update_package(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut form: FormData,
) -> AppResult<ApiResponse<Package>> {
    let files = form.take_images(MAX_IMAGES)?;
    let existing = find_package(&state, id).await?;

    let category_id = match form.non_blank("categoryId") {
        Some(raw) => Some(existing_category_id(&state, &raw).await?),
        None => None,
    };
    let price = form
        .non_blank("price")
        .map(|raw| parse_amount("price", &raw))
        .transpose()?;
    let features = if form.contains("features") {
        Some(parse_features(form.get("features"))?)
    } else {
        None
    };
    let is_active = form
        .non_blank("isActive")
        .map(|raw| parse_flag("isActive", &raw))
        .transpose()?;

    let images = append_images(&state, &existing.images, &files).await?;
    let input = UpdatePackage {
        category_id,
        name: form.non_blank("name"),
        description: form.text("description"),
        price,
        currency: form.non_blank("currency"),
        features,
        images,
        videos: form.contains("videos").then(|| form.list("videos")),
        is_active,
    };

    let package = state
        .repos
        .packages
        .update(id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Package", id))?;
    tracing::info!(package_id = id, admin_id = session.admin_id, "Package updated");
    Ok(ApiResponse::ok("Package updated successfully", package))
}

/// DELETE /admin/packages/{id}
pub async fn delete_package(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Package>> {
    let package = state
        .repos
        .packages
        .soft_delete(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Package", id))?;
    tracing::info!(package_id = id, admin_id = session.admin_id, "Package soft-deleted");
    Ok(ApiResponse::ok("Package deleted successfully", package))
}

/// DELETE /admin/packages/{id}/image?imageUrl=
pub async fn delete_package_image(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ImageUrlQuery>,
) -> AppResult<ApiResponse<Package>> {
    let image_url = required_image_url(query)?;
    let existing = find_package(&state, id).await?;
    let images = remove_exact(&existing.images, &image_url)
        .ok_or_else(|| CoreError::not_found("Image", &image_url))?;

    let input = UpdatePackage {
        images: Some(images),
        ..Default::default()
    };
    let package = state
        .repos
        .packages
        .update(id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Package", id))?;
    tracing::info!(package_id = id, admin_id = session.admin_id, "Package image removed");
    Ok(ApiResponse::ok("Image deleted successfully", package))
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /packages
pub async fn list_active_packages(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Package>>> {
    let packages = state.repos.packages.list_active().await?;
    Ok(ApiResponse::ok("Packages fetched successfully", packages))
}

/// GET /packages/{id}
///
/// Returned whether or not the package is still active.
pub async fn get_public_package(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Package>> {
    let package = find_package(&state, id).await?;
    Ok(ApiResponse::ok("Package fetched successfully", package))
}
