//! Pipeline configuration, read once from the environment.
//!
//! Every stage receives a [`PipelineConfig`] explicitly; nothing below the
//! binary reads environment variables on its own.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const ENV_CORPUS_FILE: &str = "LLM_INPUT_FILE";
pub const ENV_RAW_TERMS_FILE: &str = "LLM_OUTPUT_FILE";
pub const ENV_RANKED_TERMS_FILE: &str = "AGGREGATOR_OUTPUT_FILE";
pub const ENV_FILTERED_TERMS_FILE: &str = "FILTERED_TERMS_OUTPUT";
pub const ENV_MINIMUM_FREQUENCY: &str = "MINIMUM_FREQUENCY_FILTER";
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL_NAME: &str = "LLM_MODEL_NAME";
pub const ENV_MODEL_TEMPERATURE: &str = "LLM_MODEL_TEMPERATURE";
pub const ENV_PAPER_DELIMITER: &str = "PAPER_END_DELIMITER";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TEMPERATURE: f64 = 0.0;

/// LLM settings for the extraction stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub paper_delimiter: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            paper_delimiter: None,
        }
    }
}

impl LlmSettings {
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| missing(ENV_API_KEY))
    }

    pub fn paper_delimiter(&self) -> Result<&str> {
        self.paper_delimiter
            .as_deref()
            .ok_or_else(|| missing(ENV_PAPER_DELIMITER))
    }
}

/// Paths and thresholds for every pipeline stage.
///
/// Fields are optional because each stage only needs a subset; the accessors
/// fail with [`Error::Config`] naming the variable that was not set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub corpus_file: Option<PathBuf>,
    pub raw_terms_file: Option<PathBuf>,
    pub ranked_terms_file: Option<PathBuf>,
    pub filtered_terms_file: Option<PathBuf>,
    pub minimum_frequency: Option<u64>,
    pub llm: LlmSettings,
}

impl PipelineConfig {
    /// Create configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let minimum_frequency = get(ENV_MINIMUM_FREQUENCY)
            .map(|v| {
                v.trim().parse::<u64>().map_err(|_| {
                    Error::Config(format!(
                        "{} must be a non-negative integer, got '{}'",
                        ENV_MINIMUM_FREQUENCY, v
                    ))
                })
            })
            .transpose()?;

        let temperature = get(ENV_MODEL_TEMPERATURE)
            .map(|v| {
                v.trim().parse::<f64>().map_err(|_| {
                    Error::Config(format!(
                        "{} must be a number, got '{}'",
                        ENV_MODEL_TEMPERATURE, v
                    ))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_TEMPERATURE);

        Ok(Self {
            corpus_file: get(ENV_CORPUS_FILE).map(PathBuf::from),
            raw_terms_file: get(ENV_RAW_TERMS_FILE).map(PathBuf::from),
            ranked_terms_file: get(ENV_RANKED_TERMS_FILE).map(PathBuf::from),
            filtered_terms_file: get(ENV_FILTERED_TERMS_FILE).map(PathBuf::from),
            minimum_frequency,
            llm: LlmSettings {
                api_key: get(ENV_API_KEY),
                model: get(ENV_MODEL_NAME).unwrap_or_else(|| DEFAULT_MODEL.into()),
                temperature,
                // The delimiter is taken verbatim; surrounding whitespace may be significant.
                paper_delimiter: lookup(ENV_PAPER_DELIMITER).filter(|v| !v.is_empty()),
            },
        })
    }

    pub fn corpus_file(&self) -> Result<&Path> {
        require(&self.corpus_file, ENV_CORPUS_FILE)
    }

    pub fn raw_terms_file(&self) -> Result<&Path> {
        require(&self.raw_terms_file, ENV_RAW_TERMS_FILE)
    }

    pub fn ranked_terms_file(&self) -> Result<&Path> {
        require(&self.ranked_terms_file, ENV_RANKED_TERMS_FILE)
    }

    pub fn filtered_terms_file(&self) -> Result<&Path> {
        require(&self.filtered_terms_file, ENV_FILTERED_TERMS_FILE)
    }

    pub fn minimum_frequency(&self) -> Result<u64> {
        self.minimum_frequency
            .ok_or_else(|| missing(ENV_MINIMUM_FREQUENCY))
    }
}

fn require<'a>(value: &'a Option<PathBuf>, var: &str) -> Result<&'a Path> {
    value.as_deref().ok_or_else(|| missing(var))
}

fn missing(var: &str) -> Error {
    Error::Config(format!("environment variable {} must be set", var))
}
