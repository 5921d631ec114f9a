//! Image / video URL list rules.
//!
//! Lists are append-only by default: new uploads are merged into the stored
//! list with value deduplication, and single entries are removed by exact
//! string match, never by position.

/// Append `incoming` URLs to `existing`, skipping any URL already present.
///
/// Order is preserved: existing entries first, then new ones in submission
/// order. Duplicates inside `incoming` are collapsed too.
pub fn merge_unique(existing: &[String], incoming: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(existing.len() + incoming.len());
    for url in existing.iter().chain(incoming) {
        if !merged.contains(url) {
            merged.push(url.clone());
        }
    }
    merged
}

/// Remove every entry equal to `url`.
///
/// Returns `None` when nothing was removed, so callers can report the image
/// as not found without comparing lengths themselves.
pub fn remove_exact(list: &[String], url: &str) -> Option<Vec<String>> {
    let filtered: Vec<String> = list.iter().filter(|u| u.as_str() != url).cloned().collect();
    if filtered.len() == list.len() {
        None
    } else {
        Some(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merge_appends_in_order() {
        let merged = merge_unique(&urls(&["a", "b"]), &urls(&["c", "d"]));
        assert_eq!(merged, urls(&["a", "b", "c", "d"]));
    }

    #[test]
    fn merge_skips_known_urls() {
        let merged = merge_unique(&urls(&["a", "b"]), &urls(&["b", "c", "c"]));
        assert_eq!(merged, urls(&["a", "b", "c"]));
    }

    #[test]
    fn merge_with_nothing_new_keeps_list() {
        let existing = urls(&["a"]);
        assert_eq!(merge_unique(&existing, &[]), existing);
    }

    #[test]
    fn remove_present_url_shrinks_by_one() {
        let list = urls(&["a", "b", "c"]);
        let updated = remove_exact(&list, "b").expect("b is present");
        assert_eq!(updated, urls(&["a", "c"]));
        assert_eq!(updated.len(), list.len() - 1);
    }

    #[test]
    fn remove_absent_url_reports_none() {
        assert!(remove_exact(&urls(&["a", "b"]), "z").is_none());
    }

    #[test]
    fn remove_is_exact_match_only() {
        assert!(remove_exact(&urls(&["https://cdn/x.jpg"]), "https://cdn/x.JPG").is_none());
    }
}
