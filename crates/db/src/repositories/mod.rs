//! Repository traits (one per entity) and their PostgreSQL implementations.
//!
//! Handlers only ever see the traits, so the same router runs against
//! Postgres in production and [`crate::memory::MemoryStore`] in tests.

pub mod admin_repo;
pub mod blog_repo;
pub mod category_repo;
pub mod package_repo;
pub mod ticket_repo;
pub mod tour_repo;

pub use admin_repo::{AdminRepo, PgAdminRepo};
pub use blog_repo::{BlogRepo, PgBlogRepo};
pub use category_repo::{CategoryRepo, PgCategoryRepo};
pub use package_repo::{PackageRepo, PgPackageRepo};
pub use ticket_repo::{PgTicketRepo, TicketRepo};
pub use tour_repo::{PgTourRepo, TourRepo};
