//! Country name folding.

use super::reference::alias_target;

/// Trims surrounding whitespace and lowercases. `None` folds to `""`.
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    raw.into()
        .map(|value| value.trim().to_lowercase())
        .unwrap_or_default()
}

/// Maps a normalized alias to its canonical normalized name.
///
/// Names that are not aliases come back unchanged.
pub fn resolve_alias(normalized_name: &str) -> &str {
    alias_target(normalized_name).unwrap_or(normalized_name)
}

/// `normalize` followed by `resolve_alias`.
pub fn canonical_key(raw: &str) -> String {
    let folded = normalize(raw);
    resolve_alias(&folded).to_string()
}
