//! Repository for the `packages` table.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use voyago_core::types::DbId;

use crate::error::StoreResult;
use crate::models::package::{CreatePackage, Package, PackageWithCategory, UpdatePackage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, name, description, price, currency, features, \
                       images, videos, is_active, created_at, updated_at";

#[async_trait]
pub trait PackageRepo: Send + Sync {
    async fn create(&self, input: &CreatePackage) -> StoreResult<Package>;

    /// Find a package by id, active or not.
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Package>>;

    /// All packages with their category name, newest first.
    async fn list_with_category(&self) -> StoreResult<Vec<PackageWithCategory>>;

    /// Active packages, newest first.
    async fn list_active(&self) -> StoreResult<Vec<Package>>;

    /// Apply the non-`None` fields. Returns `None` if the row does not exist.
    async fn update(&self, id: DbId, input: &UpdatePackage) -> StoreResult<Option<Package>>;

    /// Mark a package inactive, returning the updated row.
    async fn soft_delete(&self, id: DbId) -> StoreResult<Option<Package>>;

    async fn count(&self) -> StoreResult<i64>;
}

/// PostgreSQL-backed [`PackageRepo`].
pub struct PgPackageRepo {
    pool: PgPool,
}

impl PgPackageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PackageRepo for PgPackageRepo {
    async fn create(&self, input: &CreatePackage) -> StoreResult<Package> {
        let query = format!(
            "INSERT INTO packages
                (category_id, name, description, price, currency, features, images, videos)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Package>(&query)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.currency)
            .bind(Json(&input.features))
            .bind(&input.images)
            .bind(&input.videos)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Package>> {
        let query = format!("SELECT {COLUMNS} FROM packages WHERE id = $1");
        let row = sqlx::query_as::<_, Package>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_with_category(&self) -> StoreResult<Vec<PackageWithCategory>> {
        let rows = sqlx::query_as::<_, PackageWithCategory>(
            "SELECT p.id, p.category_id, p.name, p.description, p.price, p.currency,
                    p.features, p.images, p.videos, p.is_active, p.created_at, p.updated_at,
                    c.name AS category_name
             FROM packages p
             LEFT JOIN categories c ON c.id = p.category_id
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_active(&self) -> StoreResult<Vec<Package>> {
        let query = format!(
            "SELECT {COLUMNS} FROM packages WHERE is_active = true
             ORDER BY created_at DESC, id DESC"
        );
        Ok(sqlx::query_as::<_, Package>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update(&self, id: DbId, input: &UpdatePackage) -> StoreResult<Option<Package>> {
        let query = format!(
            "UPDATE packages SET
                category_id = COALESCE($2, category_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                currency = COALESCE($6, currency),
                features = COALESCE($7, features),
                images = COALESCE($8, images),
                videos = COALESCE($9, videos),
                is_active = COALESCE($10, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Package>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.currency)
            .bind(input.features.as_ref().map(Json))
            .bind(&input.images)
            .bind(&input.videos)
            .bind(input.is_active)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn soft_delete(&self, id: DbId) -> StoreResult<Option<Package>> {
        let query =
            format!("UPDATE packages SET is_active = false WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, Package>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM packages")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
