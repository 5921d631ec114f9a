//! Blog post model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use voyago_core::types::{DbId, Timestamp};

/// A row from the `blogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub mini_description: String,
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateBlog {
    pub name: String,
    pub description: String,
    pub mini_description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBlog {
    pub name: Option<String>,
    pub description: Option<String>,
    pub mini_description: Option<String>,
    pub images: Option<Vec<String>>,
}
