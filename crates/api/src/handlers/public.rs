//! Public pages and listings. No session required.

use axum::extract::{Query, State};
use serde::Serialize;
use serde_json::json;
use voyago_core::error::CoreError;
use voyago_db::models::blog::Blog;
use voyago_db::models::category::Category;
use voyago_db::models::ticket::Ticket;
use voyago_db::models::tour::Tour;

use crate::error::{AppError, AppResult};
use crate::query::{require_id, BlogDetailsQuery, CategoryPageQuery, IdQuery, SearchQuery};
use crate::response::{ApiResponse, ViewModel};
use crate::state::AppState;

/// Tours per category page.
pub const CATEGORY_PAGE_SIZE: i64 = 8;

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub tours: Vec<Tour>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct ToursView {
    pub tours: Vec<Tour>,
}

#[derive(Debug, Serialize)]
pub struct TourView {
    pub tour: Tour,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPageView {
    pub tours: Vec<Tour>,
    pub category_id: i64,
    pub category_name: String,
    pub current_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct BlogsView {
    pub blogs: Vec<Blog>,
}

#[derive(Debug, Serialize)]
pub struct BlogDetailsView {
    pub blog: Blog,
    pub blogs: Vec<Blog>,
}

#[derive(Debug, Serialize)]
pub struct TicketsView {
    pub tickets: Vec<Ticket>,
}

/// Requested page number; anything missing, malformed or below 1 is page 1.
fn page_number(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1)
}

fn total_pages(total: i64, page_size: i64) -> i64 {
    (total + page_size - 1) / page_size
}

/// GET /
pub async fn home(State(state): State<AppState>) -> AppResult<ViewModel<HomeView>> {
    let tours = state.repos.tours.list_active().await?;
    let categories = state.repos.categories.list_active().await?;
    Ok(ViewModel::new("user/home", HomeView { tours, categories }))
}

/// GET /aboutus
pub async fn about_page() -> ViewModel<serde_json::Value> {
    ViewModel::new("user/about", json!({}))
}

/// GET /contact
pub async fn contact_page() -> ViewModel<serde_json::Value> {
    ViewModel::new("user/contact", json!({}))
}

/// GET /tours
pub async fn tours_page(State(state): State<AppState>) -> AppResult<ViewModel<ToursView>> {
    let tours = state.repos.tours.list_active().await?;
    Ok(ViewModel::new("user/tour", ToursView { tours }))
}

/// GET /tour-details?id=
///
/// Returned whether or not the tour is still active.
pub async fn tour_details(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<ViewModel<TourView>> {
    let id = require_id(query.id.as_deref(), "Tour ID is required")?;
    let tour = state
        .repos
        .tours
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;
    Ok(ViewModel::new("user/tour-details", TourView { tour }))
}

/// GET /category?id=&page=
pub async fn category_page(
    State(state): State<AppState>,
    Query(query): Query<CategoryPageQuery>,
) -> AppResult<ViewModel<CategoryPageView>> {
    let category_id = require_id(query.id.as_deref(), "Invalid or missing category ID")?;
    let category = state
        .repos
        .categories
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", category_id))?;

    let current_page = page_number(query.page.as_deref());
    // Pages past the end come back empty, however large the number.
    let offset = (current_page - 1).saturating_mul(CATEGORY_PAGE_SIZE);
    let tours = state
        .repos
        .tours
        .list_active_by_category(category_id, CATEGORY_PAGE_SIZE, offset)
        .await?;
    let total = state.repos.tours.count_active_by_category(category_id).await?;

    Ok(ViewModel::new(
        "user/tours",
        CategoryPageView {
            tours,
            category_id,
            category_name: category.name,
            current_page,
            total_pages: total_pages(total, CATEGORY_PAGE_SIZE),
        },
    ))
}

/// GET /search?tours=
///
/// An empty term lists every active tour. No match is a 404.
pub async fn search_tours(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<Tour>>> {
    let term = query.tours.as_deref().map(str::trim).unwrap_or_default();
    let tours = if term.is_empty() {
        state.repos.tours.list_active().await?
    } else {
        state.repos.tours.search_active(term).await?
    };

    if tours.is_empty() {
        return Err(AppError::NotFound("No tours found".to_string()));
    }
    Ok(ApiResponse::ok("Tours fetched successfully", tours))
}

/// GET /blogs
pub async fn blogs_page(State(state): State<AppState>) -> AppResult<ViewModel<BlogsView>> {
    let blogs = state.repos.blogs.list().await?;
    Ok(ViewModel::new("user/blog", BlogsView { blogs }))
}

/// GET /blog-details?blogId=
pub async fn blog_details(
    State(state): State<AppState>,
    Query(query): Query<BlogDetailsQuery>,
) -> AppResult<ViewModel<BlogDetailsView>> {
    let id = require_id(query.blog_id.as_deref(), "Blog ID is required")?;
    let blog = state
        .repos
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Blog", id))?;
    let blogs = state.repos.blogs.list().await?;
    Ok(ViewModel::new("user/blogdetails", BlogDetailsView { blog, blogs }))
}

/// GET /tickets
pub async fn tickets_page(State(state): State<AppState>) -> AppResult<ViewModel<TicketsView>> {
    let tickets = state.repos.tickets.list().await?;
    Ok(ViewModel::new("user/tickets", TicketsView { tickets }))
}
