//! GeoVocab Core — error taxonomy and pipeline configuration.

pub mod config;
pub mod error;

pub use config::{LlmSettings, PipelineConfig};
pub use error::{Error, Result};
