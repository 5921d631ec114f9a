//! Package entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use voyago_core::package::Feature;
use voyago_core::types::{DbId, Timestamp};

/// A row from the `packages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    #[sqlx(json)]
    pub features: Vec<Feature>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A package joined with the name of its category, for the admin listing.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub package: Package,
    pub category_name: Option<String>,
}

/// DTO for creating a package.
#[derive(Debug, Clone)]
pub struct CreatePackage {
    pub category_id: DbId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub features: Vec<Feature>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
}

/// DTO for updating a package. `None` leaves the stored value unchanged;
/// `Some` list values replace the stored list.
#[derive(Debug, Clone, Default)]
pub struct UpdatePackage {
    pub category_id: Option<DbId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub features: Option<Vec<Feature>>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub is_active: Option<bool>,
}
