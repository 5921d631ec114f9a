//! Repository for the `tickets` table.

use async_trait::async_trait;
use sqlx::PgPool;
use voyago_core::types::DbId;

use crate::error::StoreResult;
use crate::models::ticket::{CreateTicket, Ticket, UpdateTicket};

const COLUMNS: &str = "id, name, description, offer_price, actual_price, off_percentage, \
                       images, created_at, updated_at";

#[async_trait]
pub trait TicketRepo: Send + Sync {
    async fn create(&self, input: &CreateTicket) -> StoreResult<Ticket>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Ticket>>;
    /// All tickets, newest first.
    async fn list(&self) -> StoreResult<Vec<Ticket>>;
    async fn update(&self, id: DbId, input: &UpdateTicket) -> StoreResult<Option<Ticket>>;
    /// Permanently delete a ticket, returning the removed row.
    async fn delete(&self, id: DbId) -> StoreResult<Option<Ticket>>;
}

/// PostgreSQL-backed [`TicketRepo`].
pub struct PgTicketRepo {
    pool: PgPool,
}

impl PgTicketRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepo for PgTicketRepo {
    async fn create(&self, input: &CreateTicket) -> StoreResult<Ticket> {
        let query = format!(
            "INSERT INTO tickets
                (name, description, offer_price, actual_price, off_percentage, images)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.offer_price)
            .bind(input.actual_price)
            .bind(input.off_percentage)
            .bind(&input.images)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Ticket>> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        let row = sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> StoreResult<Vec<Ticket>> {
        let query = format!("SELECT {COLUMNS} FROM tickets ORDER BY created_at DESC, id DESC");
        Ok(sqlx::query_as::<_, Ticket>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update(&self, id: DbId, input: &UpdateTicket) -> StoreResult<Option<Ticket>> {
        let query = format!(
            "UPDATE tickets SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                offer_price = COALESCE($4, offer_price),
                actual_price = COALESCE($5, actual_price),
                off_percentage = COALESCE($6, off_percentage),
                images = COALESCE($7, images)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.offer_price)
            .bind(input.actual_price)
            .bind(input.off_percentage)
            .bind(&input.images)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Ticket>> {
        let query = format!("DELETE FROM tickets WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
