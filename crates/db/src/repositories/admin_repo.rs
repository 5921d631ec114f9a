//! Repository for the `admins` table.

use async_trait::async_trait;
use sqlx::PgPool;
use voyago_core::password::HashedPassword;
use voyago_core::types::DbId;

use crate::error::StoreResult;
use crate::models::admin::{Admin, CreateAdmin};

const COLUMNS: &str = "id, username, password_hash, status, created_at, updated_at";

#[async_trait]
pub trait AdminRepo: Send + Sync {
    /// Insert a new admin. Duplicate usernames fail with a unique violation.
    async fn create(&self, input: &CreateAdmin) -> StoreResult<Admin>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Admin>>;

    /// Find an admin by username (case-sensitive).
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Admin>>;

    /// Replace the stored password hash. Returns `true` if a row was updated.
    async fn update_password(&self, id: DbId, password: &HashedPassword) -> StoreResult<bool>;
}

/// PostgreSQL-backed [`AdminRepo`].
pub struct PgAdminRepo {
    pool: PgPool,
}

impl PgAdminRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepo for PgAdminRepo {
    async fn create(&self, input: &CreateAdmin) -> StoreResult<Admin> {
        let query = format!(
            "INSERT INTO admins (username, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Admin>(&query)
            .bind(&input.username)
            .bind(input.password.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Admin>> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        let row = sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Admin>> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE username = $1");
        let row = sqlx::query_as::<_, Admin>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_password(&self, id: DbId, password: &HashedPassword) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE admins SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
