//! Glue between admin forms and the media relay.

use voyago_core::media_list::merge_unique;
use voyago_media::{ResourceKind, UploadedFile};

use crate::error::AppResult;
use crate::state::AppState;

/// Relay every uploaded image and return the hosted URLs in submission order.
pub async fn upload_images(state: &AppState, files: &[UploadedFile]) -> AppResult<Vec<String>> {
    if files.is_empty() {
        return Ok(Vec::new());
    }
    let urls = state.media.upload_all(files, ResourceKind::Image).await?;
    tracing::debug!(count = urls.len(), "Images relayed to media host");
    Ok(urls)
}

/// Upload new images and merge them into `existing`.
///
/// Returns `None` when nothing was uploaded, so the stored list is left
/// untouched by the update.
pub async fn append_images(
    state: &AppState,
    existing: &[String],
    files: &[UploadedFile],
) -> AppResult<Option<Vec<String>>> {
    let uploaded = upload_images(state, files).await?;
    if uploaded.is_empty() {
        return Ok(None);
    }
    Ok(Some(merge_unique(existing, &uploaded)))
}
