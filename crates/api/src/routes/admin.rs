//! Route definitions for the `/admin` area.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{auth, blog, category, dashboard, package, ticket, tour};
use crate::state::AppState;

/// Routes mounted under `/admin`.
///
/// Page routes redirect to the login page without a session; every other
/// route answers 401/403 JSON (enforced by handler extractors).
///
/// ```text
/// GET    /admin, /admin/               -> dashboard
/// GET    /admin/login                  -> login_page
/// POST   /admin/login                  -> login
/// POST   /admin/logout                 -> logout
/// POST   /admin/register               -> register
/// PUT    /admin/password               -> change_password
///
/// GET    /admin/addtour                -> add_tour_page
/// GET    /admin/alltour                -> all_tours_page
/// GET    /admin/tours?id=              -> edit_tour_page
/// POST   /admin/tours                  -> create_tour
/// PUT    /admin/tours/{id}             -> update_tour
/// PUT    /admin/tours/delete/{id}      -> delete_tour
/// PUT    /admin/tours/{id}/status      -> update_status
/// PUT    /admin/tours/{id}/bestseller  -> toggle_bestseller
/// PUT    /admin/tours/{id}/offer       -> toggle_offer
/// PUT    /admin/tours/{id}/priority    -> update_priority
/// DELETE /admin/tours/{id}/image       -> delete_tour_image
///
/// GET    /admin/addcategory            -> add_category_page
/// GET    /admin/allcategory            -> all_categories_page
/// POST   /admin/categories             -> create_category
/// GET    /admin/categories/{id}        -> edit_category_page
/// PUT    /admin/categories/{id}        -> update_category
/// DELETE /admin/deletecategory/{id}    -> delete_category
///
/// GET    /admin/packages               -> all_packages_page
/// GET    /admin/packages/add           -> add_package_page
/// POST   /admin/packages               -> create_package
/// GET    /admin/packages/{id}          -> get_package
/// GET    /admin/packages/{id}/edit     -> edit_package_page
/// PUT    /admin/packages/{id}          -> update_package
/// DELETE /admin/packages/{id}          -> delete_package
/// DELETE /admin/packages/{id}/image    -> delete_package_image
///
/// GET    /admin/allblogs               -> all_blogs_page
/// POST   /admin/blogs                  -> create_blog
/// GET    /admin/blogs/{id}/edit        -> edit_blog_page
/// PUT    /admin/blogs/{id}             -> update_blog
/// DELETE /admin/blogs/{id}             -> delete_blog
/// DELETE /admin/blogs/{id}/image       -> delete_blog_image
///
/// GET    /admin/alltickets             -> all_tickets_page
/// POST   /admin/tickets                -> create_ticket
/// PUT    /admin/tickets/{id}           -> update_ticket
/// DELETE /admin/tickets/{id}           -> delete_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(session_router())
        .merge(tour_router())
        .merge(category_router())
        .merge(package_router())
        .merge(blog_router())
        .merge(ticket_router())
}

fn session_router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard::dashboard))
        .route("/admin/", get(dashboard::dashboard))
        .route("/admin/login", get(auth::login_page).post(auth::login))
        .route("/admin/logout", post(auth::logout))
        .route("/admin/register", post(auth::register))
        .route("/admin/password", put(auth::change_password))
}

fn tour_router() -> Router<AppState> {
    Router::new()
        .route("/admin/addtour", get(tour::add_tour_page))
        .route("/admin/alltour", get(tour::all_tours_page))
        .route(
            "/admin/tours",
            get(tour::edit_tour_page).post(tour::create_tour),
        )
        .route("/admin/tours/{id}", put(tour::update_tour))
        .route("/admin/tours/delete/{id}", put(tour::delete_tour))
        .route("/admin/tours/{id}/status", put(tour::update_status))
        .route("/admin/tours/{id}/bestseller", put(tour::toggle_bestseller))
        .route("/admin/tours/{id}/offer", put(tour::toggle_offer))
        .route("/admin/tours/{id}/priority", put(tour::update_priority))
        .route("/admin/tours/{id}/image", delete(tour::delete_tour_image))
}

fn category_router() -> Router<AppState> {
    Router::new()
        .route("/admin/addcategory", get(category::add_category_page))
        .route("/admin/allcategory", get(category::all_categories_page))
        .route("/admin/categories", post(category::create_category))
        .route(
            "/admin/categories/{id}",
            get(category::edit_category_page).put(category::update_category),
        )
        .route(
            "/admin/deletecategory/{id}",
            delete(category::delete_category),
        )
}

fn package_router() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/packages",
            get(package::all_packages_page).post(package::create_package),
        )
        .route("/admin/packages/add", get(package::add_package_page))
        .route(
            "/admin/packages/{id}",
            get(package::get_package)
                .put(package::update_package)
                .delete(package::delete_package),
        )
        .route("/admin/packages/{id}/edit", get(package::edit_package_page))
        .route(
            "/admin/packages/{id}/image",
            delete(package::delete_package_image),
        )
}

fn blog_router() -> Router<AppState> {
    Router::new()
        .route("/admin/allblogs", get(blog::all_blogs_page))
        .route("/admin/blogs", post(blog::create_blog))
        .route(
            "/admin/blogs/{id}",
            put(blog::update_blog).delete(blog::delete_blog),
        )
        .route("/admin/blogs/{id}/edit", get(blog::edit_blog_page))
        .route("/admin/blogs/{id}/image", delete(blog::delete_blog_image))
}

fn ticket_router() -> Router<AppState> {
    Router::new()
        .route("/admin/alltickets", get(ticket::all_tickets_page))
        .route("/admin/tickets", post(ticket::create_ticket))
        .route(
            "/admin/tickets/{id}",
            put(ticket::update_ticket).delete(ticket::delete_ticket),
        )
}
