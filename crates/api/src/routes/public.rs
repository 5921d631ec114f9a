//! Route definitions for the public site. No session required.

use axum::routing::get;
use axum::Router;

use crate::handlers::{category, package, public};
use crate::state::AppState;

/// ```text
/// GET /                   -> home
/// GET /aboutus            -> about_page
/// GET /contact            -> contact_page
/// GET /tours              -> tours_page
/// GET /tour-details?id=   -> tour_details
/// GET /category?id=&page= -> category_page
/// GET /search?tours=      -> search_tours
/// GET /blogs              -> blogs_page
/// GET /blog-details?blogId= -> blog_details
/// GET /tickets            -> tickets_page
/// GET /categories         -> list_active_categories
/// GET /packages           -> list_active_packages
/// GET /packages/{id}      -> get_public_package
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home))
        .route("/aboutus", get(public::about_page))
        .route("/contact", get(public::contact_page))
        .route("/tours", get(public::tours_page))
        .route("/tour-details", get(public::tour_details))
        .route("/category", get(public::category_page))
        .route("/search", get(public::search_tours))
        .route("/blogs", get(public::blogs_page))
        .route("/blog-details", get(public::blog_details))
        .route("/tickets", get(public::tickets_page))
        .route("/categories", get(category::list_active_categories))
        .route("/packages", get(package::list_active_packages))
        .route("/packages/{id}", get(package::get_public_package))
}
