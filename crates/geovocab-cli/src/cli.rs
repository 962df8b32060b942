//! Command-line arguments. Flags override the environment configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use geovocab_core::PipelineConfig;

use crate::pipeline::DEFAULT_TOP_TERMS;

#[derive(Debug, Parser)]
#[command(
    name = "geovocab",
    version,
    about = "Extract, conflate and rank geological terminology from a document corpus"
)]
pub struct Cli {
    /// Print the stage report as JSON on stdout
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask the LLM for the concepts in every paper of the corpus
    Extract {
        /// Corpus text file [env: LLM_INPUT_FILE]
        #[arg(long, value_name = "FILE")]
        corpus: Option<PathBuf>,
        /// Raw entity table to write [env: LLM_OUTPUT_FILE]
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Text separating papers in the corpus [env: PAPER_END_DELIMITER]
        #[arg(long)]
        delimiter: Option<String>,
        /// Model name [env: LLM_MODEL_NAME]
        #[arg(long)]
        model: Option<String>,
        /// Sampling temperature [env: LLM_MODEL_TEMPERATURE]
        #[arg(long)]
        temperature: Option<f64>,
    },
    /// Conflate raw entities into a frequency-ranked vocabulary
    Aggregate {
        /// Raw entity table [env: LLM_OUTPUT_FILE]
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Ranked table to write [env: AGGREGATOR_OUTPUT_FILE]
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Number of top terms to log
        #[arg(long, default_value_t = DEFAULT_TOP_TERMS)]
        top: usize,
    },
    /// Keep ranked terms at or above a minimum frequency
    Filter {
        /// Ranked table [env: AGGREGATOR_OUTPUT_FILE]
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Filtered table to write [env: FILTERED_TERMS_OUTPUT]
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Minimum frequency, inclusive [env: MINIMUM_FREQUENCY_FILTER]
        #[arg(long)]
        min_frequency: Option<u64>,
    },
    /// Run extract, aggregate and filter in order
    Run {
        /// Number of top terms to log
        #[arg(long, default_value_t = DEFAULT_TOP_TERMS)]
        top: usize,
    },
}

impl Command {
    /// Overlay command-line values on top of `config`.
    pub fn apply(&self, config: &mut PipelineConfig) {
        match self {
            Command::Extract {
                corpus,
                output,
                delimiter,
                model,
                temperature,
            } => {
                override_with(&mut config.corpus_file, corpus);
                override_with(&mut config.raw_terms_file, output);
                override_with(&mut config.llm.paper_delimiter, delimiter);
                if let Some(m) = model {
                    config.llm.model = m.clone();
                }
                if let Some(t) = temperature {
                    config.llm.temperature = *t;
                }
            }
            Command::Aggregate { input, output, .. } => {
                override_with(&mut config.raw_terms_file, input);
                override_with(&mut config.ranked_terms_file, output);
            }
            Command::Filter {
                input,
                output,
                min_frequency,
            } => {
                override_with(&mut config.ranked_terms_file, input);
                override_with(&mut config.filtered_terms_file, output);
                override_with(&mut config.minimum_frequency, min_frequency);
            }
            Command::Run { .. } => {}
        }
    }
}

fn override_with<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if let Some(v) = value {
        *target = Some(v.clone());
    }
}
