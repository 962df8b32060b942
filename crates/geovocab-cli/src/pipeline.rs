//! Pipeline stages: extract → aggregate → filter.
//!
//! Each stage reads its inputs from the paths in [`PipelineConfig`] and
//! writes one table. Resource errors abort the stage and are returned to the
//! caller; nothing is retried.

use std::time::Instant;

use geovocab_conflate::{log_top_terms, ConflationEngine, ConflationStats};
use geovocab_core::{PipelineConfig, Result};
use geovocab_extract::{cell_text, load_corpus, CompletionClient, GeminiClient, TermExtractor};
use geovocab_store::{filter_table, load_entities, write_entities, write_ranked, FilterReport};
use serde::Serialize;
use tracing::info;

/// Number of terms shown in the aggregation log.
pub const DEFAULT_TOP_TERMS: usize = 15;

/// Pipeline stages that can be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Extract,
    Aggregate,
    Filter,
}

impl PipelineStage {
    pub fn all() -> &'static [PipelineStage] {
        &[Self::Extract, Self::Aggregate, Self::Filter]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Aggregate => "aggregate",
            Self::Filter => "filter",
        }
    }
}

/// Result of the extraction stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractSummary {
    pub papers: usize,
    #[serde(rename = "failedPapers")]
    pub failed_papers: usize,
    #[serde(rename = "rawTerms")]
    pub raw_terms: usize,
}

/// Result of the aggregation stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateSummary {
    #[serde(rename = "distinctTerms")]
    pub distinct_terms: usize,
    pub stats: ConflationStats,
}

/// Result of running one or more stages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract: Option<ExtractSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<AggregateSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterReport>,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

/// Corpus → raw entity table, using the Gemini client from `config`.
pub async fn extract(config: &PipelineConfig) -> Result<ExtractSummary> {
    let client = GeminiClient::from_settings(&config.llm)?;
    info!("Using model {}", client.model());
    extract_with(config, client).await
}

/// Corpus → raw entity table, using any completion client.
pub async fn extract_with<C: CompletionClient>(
    config: &PipelineConfig,
    client: C,
) -> Result<ExtractSummary> {
    let corpus_path = config.corpus_file()?;
    let output = config.raw_terms_file()?;
    let delimiter = config.llm.paper_delimiter()?;

    let corpus = load_corpus(corpus_path)?;
    let report = TermExtractor::new(client, delimiter)
        .extract_corpus(&corpus)
        .await;

    let cells: Vec<String> = report.terms.iter().map(cell_text).collect();
    write_entities(output, &cells)?;

    Ok(ExtractSummary {
        papers: report.papers,
        failed_papers: report.failed_papers,
        raw_terms: report.terms.len(),
    })
}

/// Raw entity table → ranked `Readable_Term,Frequency` table.
pub fn aggregate(config: &PipelineConfig, top: usize) -> Result<AggregateSummary> {
    let input = config.raw_terms_file()?;
    let output = config.ranked_terms_file()?;

    let engine = ConflationEngine::english();
    let raw_terms = load_entities(input)?;

    info!("Starting normalization, stemming and mapping");
    let result = engine.conflate(raw_terms);
    info!("Processing complete");

    log_top_terms(&result, top);
    write_ranked(output, &result)?;

    Ok(AggregateSummary {
        distinct_terms: result.len(),
        stats: result.stats,
    })
}

/// Ranked table → table of terms at or above the minimum frequency.
pub fn filter(config: &PipelineConfig) -> Result<FilterReport> {
    let input = config.ranked_terms_file()?;
    let output = config.filtered_terms_file()?;
    let minimum = config.minimum_frequency()?;
    filter_table(input, output, minimum)
}

/// Run every stage in order, stopping at the first error.
pub async fn run_all(config: &PipelineConfig, top: usize) -> Result<PipelineReport> {
    let start = Instant::now();
    let mut report = PipelineReport::default();

    info!("Starting pipeline");
    for &stage in PipelineStage::all() {
        info!("Running stage {}", stage.name());
        match stage {
            PipelineStage::Extract => report.extract = Some(extract(config).await?),
            PipelineStage::Aggregate => report.aggregate = Some(aggregate(config, top)?),
            PipelineStage::Filter => report.filter = Some(filter(config)?),
        }
    }
    report.duration_ms = start.elapsed().as_millis() as u64;

    info!("Pipeline complete in {}ms", report.duration_ms);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages() {
        let stages = PipelineStage::all();
        assert_eq!(stages.len(), 3);
        assert_eq!(stages[0], PipelineStage::Extract);
        assert_eq!(stages[2], PipelineStage::Filter);
        assert_eq!(PipelineStage::Aggregate.name(), "aggregate");
    }

    #[test]
    fn test_report_omits_stages_not_run() {
        let report = PipelineReport {
            filter: Some(FilterReport {
                minimum_frequency: 2,
                before: 10,
                after: 4,
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("extract").is_none());
        assert_eq!(json["filter"]["after"], 4);
        assert_eq!(json["durationMs"], 0);
    }

    #[test]
    fn test_aggregate_requires_paths() {
        let config = PipelineConfig::default();
        let err = aggregate(&config, DEFAULT_TOP_TERMS).unwrap_err();
        assert!(err.to_string().contains("LLM_OUTPUT_FILE"));
    }
}
