//! Token stemmers used to derive conflation keys.
//!
//! The engine only needs a `stem(token) -> token` capability, so the
//! linguistic resource is injected through [`TokenStemmer`]. The default is
//! the Snowball (Porter2) English stemmer; [`SuffixStemmer`] is a small
//! dependency-free alternative and [`FnStemmer`] adapts any closure.

use std::borrow::Cow;
use std::fmt;

use geovocab_core::{Error, Result};
use rust_stemmers::{Algorithm, Stemmer};

/// Reduces a single lowercase token to its conflation root.
pub trait TokenStemmer {
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str>;
}

impl<T: TokenStemmer + ?Sized> TokenStemmer for &T {
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str> {
        (**self).stem(token)
    }
}

impl<T: TokenStemmer + ?Sized> TokenStemmer for Box<T> {
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str> {
        (**self).stem(token)
    }
}

/// Snowball stemmer backed by `rust-stemmers`.
pub struct SnowballStemmer {
    language: &'static str,
    inner: Stemmer,
}

impl SnowballStemmer {
    /// English Porter2, the algorithm the vocabulary is built with.
    pub fn english() -> Self {
        Self {
            language: "english",
            inner: Stemmer::create(Algorithm::English),
        }
    }

    /// Look up a Snowball algorithm by its lowercase language name.
    pub fn for_language(name: &str) -> Result<Self> {
        let (language, algorithm) = match name.trim().to_lowercase().as_str() {
            "danish" => ("danish", Algorithm::Danish),
            "dutch" => ("dutch", Algorithm::Dutch),
            "english" => ("english", Algorithm::English),
            "finnish" => ("finnish", Algorithm::Finnish),
            "french" => ("french", Algorithm::French),
            "german" => ("german", Algorithm::German),
            "hungarian" => ("hungarian", Algorithm::Hungarian),
            "italian" => ("italian", Algorithm::Italian),
            "norwegian" => ("norwegian", Algorithm::Norwegian),
            "portuguese" => ("portuguese", Algorithm::Portuguese),
            "romanian" => ("romanian", Algorithm::Romanian),
            "russian" => ("russian", Algorithm::Russian),
            "spanish" => ("spanish", Algorithm::Spanish),
            "swedish" => ("swedish", Algorithm::Swedish),
            "turkish" => ("turkish", Algorithm::Turkish),
            other => {
                return Err(Error::ResourceUnavailable(format!(
                    "no Snowball stemmer for language '{}'",
                    other
                )))
            }
        };
        Ok(Self {
            language,
            inner: Stemmer::create(algorithm),
        })
    }

    pub fn language(&self) -> &'static str {
        self.language
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

impl TokenStemmer for SnowballStemmer {
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str> {
        self.inner.stem(token)
    }
}

/// Suffix rules: (suffix, replacement). Longer suffixes first.
const SUFFIX_RULES: &[(&str, &str)] = &[
    // plurals
    ("sses", "ss"),
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("ss", "ss"),
    ("us", "us"),
    ("is", "is"),
    ("s", ""),
];

/// Plural-only suffix stripper. Leaves derivational morphology alone, so
/// "carbonate" and "carbonation" stay distinct.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixStemmer;

impl TokenStemmer for SuffixStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if word.len() <= 3 {
            return Cow::Borrowed(word);
        }

        for &(suffix, replacement) in SUFFIX_RULES {
            if word.len() > suffix.len() + 1 && word.ends_with(suffix) {
                let stem = &word[..word.len() - suffix.len()];
                if replacement.is_empty() {
                    return Cow::Borrowed(stem);
                }
                return Cow::Owned(format!("{}{}", stem, replacement));
            }
        }

        Cow::Borrowed(word)
    }
}

/// Adapts a closure into a [`TokenStemmer`].
pub struct FnStemmer<F>(pub F);

impl<F> TokenStemmer for FnStemmer<F>
where
    F: Fn(&str) -> String,
{
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str> {
        Cow::Owned((self.0)(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowball_english_plurals() {
        let stemmer = SnowballStemmer::english();
        assert_eq!(stemmer.stem("carbonates"), stemmer.stem("carbonate"));
        assert_eq!(stemmer.stem("rocks"), "rock");
        assert_eq!(stemmer.stem("traps"), "trap");
        assert_eq!(stemmer.stem("faults"), "fault");
    }

    #[test]
    fn test_for_language() {
        let stemmer = SnowballStemmer::for_language("Portuguese").unwrap();
        assert_eq!(stemmer.language(), "portuguese");

        let err = SnowballStemmer::for_language("klingon").unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable(_)));
    }

    #[test]
    fn test_suffix_stemmer() {
        let stemmer = SuffixStemmer;
        assert_eq!(stemmer.stem("carbonates"), "carbonate");
        assert_eq!(stemmer.stem("porosities"), "porosity");
        assert_eq!(stemmer.stem("processes"), "process");
        assert_eq!(stemmer.stem("boxes"), "box");
        assert_eq!(stemmer.stem("analysis"), "analysis");
        assert_eq!(stemmer.stem("basalt"), "basalt");
        // Short words are never touched
        assert_eq!(stemmer.stem("gas"), "gas");
    }

    #[test]
    fn test_fn_stemmer_and_boxed() {
        let upper = FnStemmer(|t: &str| t.to_uppercase());
        assert_eq!(upper.stem("trap"), "TRAP");

        let boxed: Box<dyn TokenStemmer> = Box::new(SuffixStemmer);
        assert_eq!(boxed.stem("faults"), "fault");
    }
}
