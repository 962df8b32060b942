//! Paper-by-paper term extraction.

use geovocab_conflate::RawTerm;
use serde::Serialize;
use tracing::{info, warn};

use crate::corpus::split_papers;
use crate::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::providers::CompletionClient;
use crate::response::parse_term_array;

/// Outcome of extracting a whole corpus.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    pub papers: usize,
    pub failed_papers: usize,
    #[serde(skip)]
    pub terms: Vec<RawTerm>,
}

/// Drives a [`CompletionClient`] over every paper of a corpus.
pub struct TermExtractor<C> {
    client: C,
    delimiter: String,
}

impl<C: CompletionClient> TermExtractor<C> {
    pub fn new(client: C, delimiter: impl Into<String>) -> Self {
        Self {
            client,
            delimiter: delimiter.into(),
        }
    }

    /// Extract raw terms from each paper in order.
    ///
    /// A paper whose request or reply fails is logged and skipped; its terms
    /// are simply absent from the result.
    pub async fn extract_corpus(&self, text: &str) -> ExtractionReport {
        let papers = split_papers(text, &self.delimiter);
        let total = papers.len();
        info!("Text has been split into {} separate papers", total);

        let mut report = ExtractionReport {
            papers: total,
            ..Default::default()
        };

        for (i, paper) in papers.iter().enumerate() {
            let paper_num = i + 1;
            info!("Processing paper {}/{}", paper_num, total);

            match self.extract_paper(paper).await {
                Ok(terms) => {
                    info!("  -> Extracted {} terms from this paper", terms.len());
                    report.terms.extend(terms);
                }
                Err(e) => {
                    warn!("  -> Paper {} skipped: {}", paper_num, e);
                    report.failed_papers += 1;
                }
            }
        }

        info!(
            "Extraction complete: {} raw terms from {} papers ({} failed)",
            report.terms.len(),
            report.papers,
            report.failed_papers
        );
        report
    }

    async fn extract_paper(&self, paper: &str) -> geovocab_core::Result<Vec<RawTerm>> {
        let reply = self
            .client
            .complete(SYSTEM_INSTRUCTION, &build_prompt(paper))
            .await?;
        parse_term_array(&reply)
    }
}
