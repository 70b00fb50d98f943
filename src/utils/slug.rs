//! Slug derivation for problem and contest titles

use std::sync::LazyLock;

use regex::Regex;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("valid regex"));

/// Derive a URL-safe slug from a title.
///
/// Lowercases, strips everything but letters, digits, spaces and hyphens,
/// then collapses whitespace runs into single hyphens.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let cleaned = NON_SLUG_CHARS.replace_all(&lowered, "");
    WHITESPACE
        .replace_all(cleaned.trim(), "-")
        .into_owned()
}
