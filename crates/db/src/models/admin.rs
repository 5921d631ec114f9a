//! Admin account model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use voyago_core::password::HashedPassword;
use voyago_core::types::{DbId, Timestamp};

pub const ADMIN_STATUS_ACTIVE: &str = "active";
pub const ADMIN_STATUS_DISABLED: &str = "disabled";

/// Full row from the `admins` table.
///
/// Contains the password hash -- never serialize this directly.
/// Use [`AdminResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Admin {
    pub fn password(&self) -> HashedPassword {
        HashedPassword::from_stored(self.password_hash.clone())
    }

    pub fn is_active(&self) -> bool {
        self.status == ADMIN_STATUS_ACTIVE
    }
}

/// Safe admin representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: DbId,
    pub username: String,
    pub status: String,
    pub created_at: Timestamp,
}

impl From<&Admin> for AdminResponse {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
            status: admin.status.clone(),
            created_at: admin.created_at,
        }
    }
}

/// DTO for creating an admin. Only a hashed password is accepted.
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub username: String,
    pub password: HashedPassword,
}
