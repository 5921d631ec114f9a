//! Handlers for blog posts (admin side).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use voyago_core::error::CoreError;
use voyago_core::media_list::remove_exact;
use voyago_core::types::DbId;
use voyago_db::models::blog::{Blog, CreateBlog, UpdateBlog};

use super::required_image_url;
use crate::error::AppResult;
use crate::form::{FormData, MAX_IMAGES};
use crate::middleware::auth::{AdminPage, AdminSession};
use crate::path::Path;
use crate::query::ImageUrlQuery;
use crate::response::{ApiResponse, ViewModel};
use crate::state::AppState;
use crate::uploads::{append_images, upload_images};

#[derive(Debug, Serialize)]
pub struct BlogsView {
    pub blogs: Vec<Blog>,
}

#[derive(Debug, Serialize)]
pub struct BlogView {
    pub blog: Blog,
}

async fn find_blog(state: &AppState, id: DbId) -> AppResult<Blog> {
    state
        .repos
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Blog", id).into())
}

/// GET /admin/allblogs
pub async fn all_blogs_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
) -> AppResult<ViewModel<BlogsView>> {
    let blogs = state.repos.blogs.list().await?;
    Ok(ViewModel::new("admin/allblog", BlogsView { blogs }))
}

/// GET /admin/blogs/{id}/edit
pub async fn edit_blog_page(
    AdminPage(_session): AdminPage,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ViewModel<BlogView>> {
    let blog = find_blog(&state, id).await?;
    Ok(ViewModel::new("admin/editblog", BlogView { blog }))
}

/// POST /admin/blogs
pub async fn create_blog(
    session: AdminSession,
    State(state): State<AppState>,
    mut form: FormData,
) -> AppResult<(StatusCode, Json<ApiResponse<Blog>>)> {
    let files = form.take_images(MAX_IMAGES)?;

    let (Some(name), Some(description), Some(mini_description)) = (
        form.non_blank("name"),
        form.non_blank("description"),
        form.non_blank("miniDescription"),
    ) else {
        return Err(
            CoreError::Validation("All fields are required except images.".to_string()).into(),
        );
    };

    let images = upload_images(&state, &files).await?;
    let blog = state
        .repos
        .blogs
        .create(&CreateBlog {
            name,
            description,
            mini_description,
            images,
        })
        .await?;
    tracing::info!(blog_id = blog.id, admin_id = session.admin_id, "Blog created");
    Ok(ApiResponse::created("Blog added successfully", blog))
}

/// PUT /admin/blogs/{id}
///
/// Blank fields keep the stored value.
pub async fn update_blog(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut form: FormData,
) -> AppResult<ApiResponse<Blog>> {
    let files = form.take_images(MAX_IMAGES)?;
    let existing = find_blog(&state, id).await?;

    let images = append_images(&state, &existing.images, &files).await?;
    let input = UpdateBlog {
        name: form.non_blank("name"),
        description: form.non_blank("description"),
        mini_description: form.non_blank("miniDescription"),
        images,
    };
    let blog = state
        .repos
        .blogs
        .update(id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Blog", id))?;
    tracing::info!(blog_id = id, admin_id = session.admin_id, "Blog updated");
    Ok(ApiResponse::ok("Blog updated successfully", blog))
}

/// DELETE /admin/blogs/{id}
pub async fn delete_blog(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Blog>> {
    let blog = state
        .repos
        .blogs
        .delete(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Blog", id))?;
    tracing::info!(blog_id = id, admin_id = session.admin_id, "Blog deleted");
    Ok(ApiResponse::ok("Blog deleted successfully", blog))
}

/// DELETE /admin/blogs/{id}/image?imageUrl=
pub async fn delete_blog_image(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ImageUrlQuery>,
) -> AppResult<ApiResponse<Blog>> {
    let image_url = required_image_url(query)?;
    let existing = find_blog(&state, id).await?;
    let images = remove_exact(&existing.images, &image_url)
        .ok_or_else(|| CoreError::not_found("Image", &image_url))?;

    let input = UpdateBlog {
        images: Some(images),
        ..Default::default()
    };
    let blog = state
        .repos
        .blogs
        .update(id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Blog", id))?;
    tracing::info!(blog_id = id, admin_id = session.admin_id, "Blog image removed");
    Ok(ApiResponse::ok("Image deleted successfully", blog))
}
