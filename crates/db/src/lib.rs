//! Persistence layer: entity models, one repository trait per entity, and
//! the PostgreSQL and in-memory implementations behind them.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;

pub use error::{StoreError, StoreResult};

use memory::MemoryStore;
use repositories::{
    AdminRepo, BlogRepo, CategoryRepo, PackageRepo, PgAdminRepo, PgBlogRepo, PgCategoryRepo,
    PgPackageRepo, PgTicketRepo, PgTourRepo, TicketRepo, TourRepo,
};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations under `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Every repository the HTTP layer needs, as trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepo>,
    pub packages: Arc<dyn PackageRepo>,
    pub tours: Arc<dyn TourRepo>,
    pub blogs: Arc<dyn BlogRepo>,
    pub tickets: Arc<dyn TicketRepo>,
    pub admins: Arc<dyn AdminRepo>,
}

impl Repositories {
    /// Repositories backed by a PostgreSQL pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            categories: Arc::new(PgCategoryRepo::new(pool.clone())),
            packages: Arc::new(PgPackageRepo::new(pool.clone())),
            tours: Arc::new(PgTourRepo::new(pool.clone())),
            blogs: Arc::new(PgBlogRepo::new(pool.clone())),
            tickets: Arc::new(PgTicketRepo::new(pool.clone())),
            admins: Arc::new(PgAdminRepo::new(pool)),
        }
    }

    /// Repositories sharing one fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()))
    }

    /// Repositories over an existing [`MemoryStore`], so callers can keep a
    /// handle for seeding.
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            categories: store.clone(),
            packages: store.clone(),
            tours: store.clone(),
            blogs: store.clone(),
            tickets: store.clone(),
            admins: store,
        }
    }
}
