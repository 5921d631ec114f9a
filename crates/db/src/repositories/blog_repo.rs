//! Repository for the `blogs` table.

use async_trait::async_trait;
use sqlx::PgPool;
use voyago_core::types::DbId;

use crate::error::StoreResult;
use crate::models::blog::{Blog, CreateBlog, UpdateBlog};

const COLUMNS: &str = "id, name, description, mini_description, images, created_at, updated_at";

#[async_trait]
pub trait BlogRepo: Send + Sync {
    async fn create(&self, input: &CreateBlog) -> StoreResult<Blog>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Blog>>;
    /// All posts, newest first.
    async fn list(&self) -> StoreResult<Vec<Blog>>;
    async fn update(&self, id: DbId, input: &UpdateBlog) -> StoreResult<Option<Blog>>;
    /// Permanently delete a post, returning the removed row.
    async fn delete(&self, id: DbId) -> StoreResult<Option<Blog>>;
}

/// PostgreSQL-backed [`BlogRepo`].
pub struct PgBlogRepo {
    pool: PgPool,
}

impl PgBlogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepo for PgBlogRepo {
    async fn create(&self, input: &CreateBlog) -> StoreResult<Blog> {
        let query = format!(
            "INSERT INTO blogs (name, description, mini_description, images)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Blog>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.mini_description)
            .bind(&input.images)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Blog>> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        let row = sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> StoreResult<Vec<Blog>> {
        let query = format!("SELECT {COLUMNS} FROM blogs ORDER BY created_at DESC, id DESC");
        Ok(sqlx::query_as::<_, Blog>(&query).fetch_all(&self.pool).await?)
    }

    async fn update(&self, id: DbId, input: &UpdateBlog) -> StoreResult<Option<Blog>> {
        let query = format!(
            "UPDATE blogs SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                mini_description = COALESCE($4, mini_description),
                images = COALESCE($5, images)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.mini_description)
            .bind(&input.images)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Blog>> {
        let query = format!("DELETE FROM blogs WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
