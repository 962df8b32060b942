//! Error types for GeoVocab.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {}", .0.display())]
    MissingResource(PathBuf),

    #[error("Column '{column}' not found in '{}'", .path.display())]
    SchemaMismatch { path: PathBuf, column: String },

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Failed to write '{}': {source}", .path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value in '{}' row {row}: {reason}", .path.display())]
    InvalidRow {
        path: PathBuf,
        row: u64,
        reason: String,
    },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a [`Error::SinkWrite`] for `path`.
    pub fn sink(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        Self::SinkWrite {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
