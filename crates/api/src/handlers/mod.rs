//! Request handlers, one module per resource.

pub mod auth;
pub mod blog;
pub mod category;
pub mod dashboard;
pub mod package;
pub mod public;
pub mod ticket;
pub mod tour;

use voyago_core::error::CoreError;
use voyago_core::normalize::parse_integer;
use voyago_core::types::DbId;

use crate::error::AppResult;
use crate::query::ImageUrlQuery;
use crate::state::AppState;

/// Parse a submitted `categoryId` and check that the category exists.
async fn existing_category_id(state: &AppState, raw: &str) -> AppResult<DbId> {
    let id: DbId = parse_integer("categoryId", raw)?;
    if state.repos.categories.find_by_id(id).await?.is_none() {
        return Err(CoreError::Validation("Invalid category".to_string()).into());
    }
    Ok(id)
}

/// Boolean form fields: `true`/`false`, `on`/`off`, `1`/`0`.
fn parse_flag(field: &str, raw: &str) -> Result<bool, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => Err(CoreError::Validation(format!("{field} must be true or false"))),
    }
}

/// The `imageUrl` query parameter of image-removal endpoints.
fn required_image_url(query: ImageUrlQuery) -> Result<String, CoreError> {
    query
        .image_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| CoreError::Validation("imageUrl is required".to_string()))
}
