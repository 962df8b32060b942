//! Term conflation engine: normalize, conflate by stem, count, rank.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::normalize::{conflation_key, normalize};
use crate::stemmer::{SnowballStemmer, TokenStemmer};
use crate::term::RawTerm;

/// One row of the ranked vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTerm {
    #[serde(rename = "Readable_Term")]
    pub label: String,
    #[serde(rename = "Frequency")]
    pub frequency: u64,
}

impl RankedTerm {
    pub fn new(label: impl Into<String>, frequency: u64) -> Self {
        Self {
            label: label.into(),
            frequency,
        }
    }
}

/// Per-run counters. Diagnostic only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConflationStats {
    /// Items offered to the engine.
    pub seen: usize,
    /// Items that were not text.
    pub non_textual: usize,
    /// Text items below the minimum length.
    pub too_short: usize,
    /// Items that contributed to a count.
    pub accepted: usize,
}

/// Frequency-ranked vocabulary: count descending, ties in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResult {
    pub terms: Vec<RankedTerm>,
    pub stats: ConflationStats,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedTerm> {
        self.terms.iter()
    }

    /// The first `n` rows.
    pub fn top(&self, n: usize) -> &[RankedTerm] {
        &self.terms[..n.min(self.terms.len())]
    }

    /// Sum of all frequencies; equals `stats.accepted`.
    pub fn total_frequency(&self) -> u64 {
        self.terms.iter().map(|t| t.frequency).sum()
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a RankedTerm;
    type IntoIter = std::slice::Iter<'a, RankedTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Accumulator for one conflation key.
struct Group {
    label: String,
    label_chars: usize,
    count: u64,
}

/// Conflates raw term mentions into a ranked vocabulary.
///
/// Holds nothing but the stemmer; every call to [`ConflationEngine::conflate`]
/// starts from empty accumulators.
#[derive(Debug)]
pub struct ConflationEngine<S = SnowballStemmer> {
    stemmer: S,
}

impl ConflationEngine<SnowballStemmer> {
    /// Engine using the Snowball English stemmer.
    pub fn english() -> Self {
        Self::new(SnowballStemmer::english())
    }
}

impl<S: TokenStemmer> ConflationEngine<S> {
    pub fn new(stemmer: S) -> Self {
        Self { stemmer }
    }

    /// Conflation key for an already-normalized term.
    pub fn key(&self, normalized: &str) -> String {
        conflation_key(normalized, &self.stemmer)
    }

    /// Run one pass over `raw_terms`.
    ///
    /// Non-textual items and terms shorter than three characters are dropped
    /// silently. A key's label is replaced only by a strictly shorter term, so
    /// the first-seen spelling wins ties.
    pub fn conflate<I>(&self, raw_terms: I) -> RankedResult
    where
        I: IntoIterator,
        I::Item: Into<RawTerm>,
    {
        let mut stats = ConflationStats::default();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<Group> = Vec::new();

        for item in raw_terms {
            stats.seen += 1;
            let raw = item.into();
            let Some(text) = raw.as_text() else {
                stats.non_textual += 1;
                continue;
            };
            let Some(term) = normalize(text) else {
                stats.too_short += 1;
                continue;
            };
            stats.accepted += 1;

            let key = self.key(&term);
            let term_chars = term.chars().count();
            match index.get(&key).copied() {
                Some(i) => {
                    let group = &mut groups[i];
                    group.count += 1;
                    if term_chars < group.label_chars {
                        group.label = term;
                        group.label_chars = term_chars;
                    }
                }
                None => {
                    index.insert(key, groups.len());
                    groups.push(Group {
                        label: term,
                        label_chars: term_chars,
                        count: 1,
                    });
                }
            }
        }

        // Stable sort keeps first-insertion order among equal counts.
        groups.sort_by(|a, b| b.count.cmp(&a.count));

        debug!(
            "Conflated {} items: accepted={}, non_textual={}, too_short={}, keys={}",
            stats.seen,
            stats.accepted,
            stats.non_textual,
            stats.too_short,
            groups.len()
        );

        RankedResult {
            terms: groups
                .into_iter()
                .map(|g| RankedTerm::new(g.label, g.count))
                .collect(),
            stats,
        }
    }
}

/// Log the `n` most frequent terms.
pub fn log_top_terms(result: &RankedResult, n: usize) {
    info!("--- Most Common Terms ---");
    for term in result.top(n) {
        info!("Term: '{}' | Count: {}", term.label, term.frequency);
    }
}
