//! GeoVocab Conflate — turns noisy extracted term mentions into a
//! deduplicated, frequency-ranked vocabulary.
//!
//! Terms are trimmed and lowercased, short noise is dropped, every token is
//! stemmed and the stemmed phrase becomes the conflation key. Each key keeps
//! its shortest observed spelling as the readable label.

pub mod engine;
pub mod normalize;
pub mod stemmer;
pub mod term;

pub use engine::{log_top_terms, ConflationEngine, ConflationStats, RankedResult, RankedTerm};
pub use normalize::{conflation_key, normalize, MIN_TERM_CHARS};
pub use stemmer::{FnStemmer, SnowballStemmer, SuffixStemmer, TokenStemmer};
pub use term::RawTerm;
