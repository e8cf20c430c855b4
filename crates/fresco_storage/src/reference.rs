//! Storage key parsing for media references.
//!
//! Uploaded media lands under path-like storage keys such as
//! `users/u42/media/9f8e7d6c-....jpg`. The reference id used in prompts and
//! usage tracking is the key's file stem; keys the extractor cannot make
//! sense of fall back to the raw key so no item is ever dropped.

use regex::Regex;
use std::sync::LazyLock;

static ID_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{8,}$").unwrap());

static LEGACY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]+").unwrap());

/// Extract a reference id from a storage key.
///
/// Takes the file stem of the key's last path segment when it looks like an
/// identifier; otherwise returns the raw key unchanged.
///
/// # Examples
///
/// ```
/// use fresco_storage::media_id_from_key;
///
/// assert_eq!(
///     media_id_from_key("users/u42/media/9f8e7d6c-aa11.jpg"),
///     "9f8e7d6c-aa11"
/// );
/// // Non-extractable keys pass through untouched.
/// assert_eq!(media_id_from_key("IMG 01.jpg"), "IMG 01.jpg");
/// ```
pub fn media_id_from_key(key: &str) -> String {
    let segment = key.rsplit('/').next().unwrap_or(key);
    let stem = segment.rsplit_once('.').map(|(s, _)| s).unwrap_or(segment);
    if ID_STEM.is_match(stem) {
        stem.to_string()
    } else {
        key.to_string()
    }
}

/// Whether a reference matches the 24-character legacy identifier scheme.
pub fn is_legacy_id(reference: &str) -> bool {
    LEGACY_ID.is_match(reference)
}

/// Derive a human-readable title from a storage key's filename.
///
/// Returns `None` when the filename carries no words to show (pure
/// identifier stems make bad titles).
///
/// # Examples
///
/// ```
/// use fresco_storage::title_from_key;
///
/// assert_eq!(
///     title_from_key("media/autumn_menu-shoot.jpg").as_deref(),
///     Some("Autumn menu shoot")
/// );
/// assert_eq!(title_from_key("media/507f1f77bcf86cd799439011.jpg"), None);
/// ```
pub fn title_from_key(key: &str) -> Option<String> {
    let segment = key.rsplit('/').next().unwrap_or(key);
    let stem = segment.rsplit_once('.').map(|(s, _)| s).unwrap_or(segment);
    if stem.is_empty() || is_legacy_id(stem) {
        return None;
    }
    let spaced = SEPARATORS.replace_all(stem, " ");
    let cleaned = spaced.trim();
    // A stem with no letters is an identifier, not a name
    if !cleaned.chars().any(|c| c.is_alphabetic()) {
        return None;
    }
    let mut chars = cleaned.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + chars.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_uuid_stems() {
        assert_eq!(
            media_id_from_key("users/u1/media/9f8e7d6c-1234-5678-9abc-def012345678.png"),
            "9f8e7d6c-1234-5678-9abc-def012345678"
        );
    }

    #[test]
    fn falls_back_to_raw_key() {
        assert_eq!(media_id_from_key("a.b"), "a.b");
        assert_eq!(media_id_from_key("short.png"), "short.png");
    }

    #[test]
    fn legacy_ids_are_24_hex_chars() {
        assert!(is_legacy_id("507f1f77bcf86cd799439011"));
        assert!(!is_legacy_id("507f1f77bcf86cd79943901"));
        assert!(!is_legacy_id("507f1f77bcf86cd79943901z"));
    }

    #[test]
    fn titles_come_from_filenames() {
        assert_eq!(
            title_from_key("media/new-spring_collection.jpg").as_deref(),
            Some("New spring collection")
        );
        assert_eq!(title_from_key("media/12345678.jpg"), None);
    }
}
