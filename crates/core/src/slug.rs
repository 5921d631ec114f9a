//! Category slug derivation.

/// Derive a URL slug from a display name.
///
/// The name is lowercased, every run of characters outside `[a-z0-9]` is
/// collapsed into a single `-`, and leading/trailing hyphens are dropped.
///
/// ```
/// use voyago_core::slug::slugify;
///
/// assert_eq!(slugify("City Tours"), "city-tours");
/// assert_eq!(slugify("Old & New!!"), "old-new");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
