//! Normalization and conflation-key derivation.

use crate::stemmer::TokenStemmer;

/// Terms shorter than this (in characters, after trimming) are extraction
/// noise and never counted.
pub const MIN_TERM_CHARS: usize = 3;

/// Trim and lowercase a raw term. Returns `None` for terms shorter than
/// [`MIN_TERM_CHARS`].
pub fn normalize(raw: &str) -> Option<String> {
    let normalized = raw.trim().to_lowercase();
    if normalized.chars().count() < MIN_TERM_CHARS {
        return None;
    }
    Some(normalized)
}

/// Stem every whitespace-separated token and rejoin with single spaces.
pub fn conflation_key<S: TokenStemmer + ?Sized>(normalized: &str, stemmer: &S) -> String {
    let mut key = String::with_capacity(normalized.len());
    for (i, token) in normalized.split_whitespace().enumerate() {
        if i > 0 {
            key.push(' ');
        }
        key.push_str(&stemmer.stem(token));
    }
    key
}
