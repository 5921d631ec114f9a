//! Ticket offer model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use voyago_core::types::{DbId, Timestamp};

/// A row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub offer_price: f64,
    pub actual_price: f64,
    /// Discount shown on the card, 0 to 100.
    pub off_percentage: f64,
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct CreateTicket {
    pub name: String,
    pub description: String,
    pub offer_price: f64,
    pub actual_price: f64,
    pub off_percentage: f64,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTicket {
    pub name: Option<String>,
    pub description: Option<String>,
    pub offer_price: Option<f64>,
    pub actual_price: Option<f64>,
    pub off_percentage: Option<f64>,
    pub images: Option<Vec<String>>,
}
