//! Shared query parameter types for API handlers.
//!
//! Query strings are kept as raw text so a missing or malformed id can be
//! answered with the handler's own message instead of a generic rejection.

use serde::Deserialize;
use voyago_core::error::CoreError;
use voyago_core::types::DbId;

/// `?id=` on read-for-edit and detail pages.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// `?imageUrl=` on single-image removal endpoints.
#[derive(Debug, Deserialize)]
pub struct ImageUrlQuery {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// `?id=&page=` on the public category page.
#[derive(Debug, Deserialize)]
pub struct CategoryPageQuery {
    pub id: Option<String>,
    pub page: Option<String>,
}

/// `?tours=` on the public search page.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub tours: Option<String>,
}

/// `?blogId=` on the public blog detail page.
#[derive(Debug, Deserialize)]
pub struct BlogDetailsQuery {
    #[serde(rename = "blogId")]
    pub blog_id: Option<String>,
}

/// Parse an optional raw id, failing with `message` when it is missing,
/// blank or not a positive integer.
pub fn require_id(raw: Option<&str>, message: &str) -> Result<DbId, CoreError> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<DbId>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn require_id_accepts_positive_integers() {
        assert_eq!(require_id(Some(" 42 "), "bad").unwrap(), 42);
    }

    #[test]
    fn require_id_rejects_missing_and_garbage() {
        for raw in [None, Some(""), Some("abc"), Some("0"), Some("-3")] {
            assert_matches!(
                require_id(raw, "Invalid or missing category ID"),
                Err(CoreError::Validation(msg)) if msg == "Invalid or missing category ID"
            );
        }
    }
}
