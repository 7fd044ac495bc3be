//! # Upload URL Resolution
//!
//! The backend stores uploads (avatars, article thumbnails, music covers)
//! as paths relative to its storage root, but older records and external
//! media carry absolute URLs. [`resolve_upload_url`] turns either form
//! into one absolute URL the client can render.
//!
//! ## Rules
//!
//! - Empty or whitespace-only paths resolve to nothing.
//! - Absolute `http`/`https` URLs are returned unchanged.
//! - Any other absolute scheme (`javascript:`, `data:`, `file:`) is refused.
//! - Relative paths drop leading `/` or `\` and a leading `storage/`
//!   segment (the base already points at the storage root) and are joined
//!   onto the base. Paths with `..` segments are refused, including
//!   percent-encoded forms such as `%2e%2e`.
//! - A joined URL must keep the base origin and stay under the base path.

use url::Url;

const STORAGE_PREFIX: &str = "storage/";

/// Resolve a stored upload path against the storage base URL.
///
/// Returns `None` when there is nothing to display or the path is refused.
pub fn resolve_upload_url(base: &Url, path: &str) -> Option<Url> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    if let Ok(absolute) = Url::parse(path) {
        return match absolute.scheme() {
            "http" | "https" => Some(absolute),
            scheme => {
                tracing::warn!(scheme, "refusing upload path with non-http scheme");
                None
            }
        };
    }

    let relative = path.trim_start_matches(['/', '\\']);
    let relative = relative.strip_prefix(STORAGE_PREFIX).unwrap_or(relative);

    if relative.split(['/', '\\']).any(is_parent_segment) {
        tracing::warn!(path, "refusing upload path with parent segment");
        return None;
    }
    if relative.is_empty() {
        return None;
    }

    let joined = base.join(relative).ok()?;
    if joined.origin() != base.origin() || !joined.path().starts_with(base.path()) {
        tracing::warn!(path, resolved = %joined, "refusing upload path outside storage root");
        return None;
    }
    Some(joined)
}

/// `..` with either dot optionally percent-encoded (`%2e`, `%2E`).
fn is_parent_segment(segment: &str) -> bool {
    segment.to_ascii_lowercase().replace("%2e", ".") == ".."
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Relative paths never escape the storage origin.
        #[test]
        fn relative_paths_stay_under_base(path in "[a-zA-Z0-9_./%\\\\-]{1,40}") {
            let base = Url::parse("https://api.tenang.id/storage/").unwrap();
            if let Some(url) = resolve_upload_url(&base, &path) {
                prop_assert_eq!(url.origin(), base.origin());
                prop_assert!(url.path().starts_with("/storage/"), "escaped base: {}", url);
            }
        }

        #[test]
        fn encoded_parent_segments_are_refused(
            dots in prop::sample::select(vec!["..", ".%2e", "%2E.", "%2e%2E"]),
            sep in prop::sample::select(vec!["/", "\\"]),
            rest in "[a-z]{1,12}",
        ) {
            let base = Url::parse("https://api.tenang.id/storage/").unwrap();
            let path = format!("avatars{sep}{dots}{sep}{rest}");
            prop_assert_eq!(resolve_upload_url(&base, &path), None);
        }

        /// Resolution never panics on arbitrary input.
        #[test]
        fn never_panics(path in ".{0,64}") {
            let base = Url::parse("https://api.tenang.id/storage/").unwrap();
            let _ = resolve_upload_url(&base, &path);
        }
    }
}
