//! Category entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use voyago_core::slug::slugify;
use voyago_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category. The slug is always derived from the name.
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl CreateCategory {
    pub fn new(name: &str, description: Option<String>) -> Self {
        let name = name.trim().to_string();
        Self {
            slug: slugify(&name),
            name,
            description: description.unwrap_or_default(),
        }
    }
}

/// DTO for updating a category. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    /// Set together with `name`; never supplied independently.
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl UpdateCategory {
    pub fn new(name: Option<&str>, description: Option<String>) -> Self {
        let name = name.map(|n| n.trim().to_string());
        Self {
            slug: name.as_deref().map(slugify),
            name,
            description,
        }
    }
}
