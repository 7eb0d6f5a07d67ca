//! URL slugs derived from post titles.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Base slug used when a title has no ASCII letters or digits left.
pub const FALLBACK_SLUG: &str = "post";

/// Turn a title into a URL-safe slug.
///
/// The title is lowercased and decomposed (NFD) so accents can be dropped,
/// then everything outside `[a-z0-9]`, whitespace and `-` is removed.
/// Whitespace and hyphen runs become a single hyphen, and the result never
/// starts or ends with one.
///
/// ```
/// use pena_core::domain::slugify;
///
/// assert_eq!(slugify("Política de Saúde!"), "politica-de-saude");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.to_lowercase().nfd() {
        if is_combining_mark(c) {
            continue;
        }

        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        }
    }

    slug
}

/// Like [`slugify`], but never empty.
pub fn base_slug(source: &str) -> String {
    let slug = slugify(source);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Append a uniqueness suffix to a slug that is already taken.
///
/// `attempt` is zero for the first collision found by the pre-check and
/// grows with every write-time conflict, so two retries in the same
/// millisecond still produce different slugs.
pub fn disambiguate(base: &str, unix_millis: i64, attempt: u32) -> String {
    if attempt == 0 {
        format!("{base}-{unix_millis}")
    } else {
        format!("{base}-{unix_millis}-{attempt}")
    }
}

/// Whether `slug` is already in canonical form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
