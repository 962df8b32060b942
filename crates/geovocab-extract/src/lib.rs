//! GeoVocab Extract — asks an external LLM for the geological concepts in
//! each paper of a corpus.
//!
//! The corpus is split on a paper delimiter, each paper is sent with a fixed
//! instruction prompt, and the JSON array in the reply becomes a run of raw
//! terms. Papers are processed one at a time; a failed paper is logged and
//! skipped.

pub mod corpus;
pub mod extractor;
pub mod prompt;
pub mod providers;
pub mod response;

pub use corpus::{load_corpus, split_papers};
pub use extractor::{ExtractionReport, TermExtractor};
pub use prompt::{build_prompt, SYSTEM_INSTRUCTION};
pub use providers::{CompletionClient, GeminiClient};
pub use response::{cell_text, parse_term_array, raw_term_from_json};
