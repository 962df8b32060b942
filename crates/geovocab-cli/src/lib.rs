//! GeoVocab pipeline stages and command-line surface.

pub mod cli;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use pipeline::{PipelineReport, PipelineStage};
