//! Language-token validation and quote normalization.
//!
//! Target languages are never checked against a real ISO list; the provider
//! rejects codes it does not know, so a shallow syntactic test is enough to
//! tell "this is a language argument" from "this is the text to translate".

/// Returns `true` if `token` is plausibly a language code: 1 to 10
/// characters, each an alphabetic letter, hyphen, or underscore.
///
/// Deliberately permissive. `"FR"`, `"EN-GB"`, and `"zh_hant"` pass, but so
/// does `"ok"`; false positives are accepted in exchange for simplicity.
pub fn looks_like_lang(token: &str) -> bool {
    let len = token.chars().count();
    if len == 0 || len > 10 {
        return false;
    }
    token
        .chars()
        .all(|ch| ch.is_alphabetic() || ch == '-' || ch == '_')
}

/// Removes one pair of matching wrapping quotes (`"..."` or `'...'`).
///
/// Unmatched or absent quotes leave the input untouched, so `it's` survives
/// and the function is idempotent on already-normalized text.
pub fn strip_wrapping_quotes(text: &str) -> &str {
    if text.len() >= 2 {
        for quote in ['"', '\''] {
            if text.starts_with(quote) && text.ends_with(quote) {
                return &text[1..text.len() - 1];
            }
        }
    }
    text
}
