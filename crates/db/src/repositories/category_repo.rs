//! Repository for the `categories` table.

use async_trait::async_trait;
use sqlx::PgPool;
use voyago_core::types::DbId;

use crate::error::StoreResult;
use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, is_active, created_at, updated_at";

#[async_trait]
pub trait CategoryRepo: Send + Sync {
    /// Insert a new category. Duplicate names fail with a unique violation.
    async fn create(&self, input: &CreateCategory) -> StoreResult<Category>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Category>>;

    /// All categories, newest first.
    async fn list(&self) -> StoreResult<Vec<Category>>;

    /// Active categories sorted by name, for public menus and form pickers.
    async fn list_active(&self) -> StoreResult<Vec<Category>>;

    /// Apply the non-`None` fields. Returns `None` if the row does not exist.
    async fn update(&self, id: DbId, input: &UpdateCategory) -> StoreResult<Option<Category>>;

    /// Permanently delete a category, returning the removed row.
    ///
    /// Fails with a foreign key violation while packages or tours still
    /// reference it.
    async fn delete(&self, id: DbId) -> StoreResult<Option<Category>>;

    async fn count(&self) -> StoreResult<i64>;
}

/// PostgreSQL-backed [`CategoryRepo`].
pub struct PgCategoryRepo {
    pool: PgPool,
}

impl PgCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepo for PgCategoryRepo {
    async fn create(&self, input: &CreateCategory) -> StoreResult<Category> {
        let query = format!(
            "INSERT INTO categories (name, slug, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Category>> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> StoreResult<Vec<Category>> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY created_at DESC, id DESC");
        Ok(sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn list_active(&self) -> StoreResult<Vec<Category>> {
        let query =
            format!("SELECT {COLUMNS} FROM categories WHERE is_active = true ORDER BY name ASC");
        Ok(sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update(&self, id: DbId, input: &UpdateCategory) -> StoreResult<Option<Category>> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Category>> {
        let query = format!("DELETE FROM categories WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
