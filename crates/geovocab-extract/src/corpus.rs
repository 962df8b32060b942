//! Corpus loading and paper splitting.

use std::path::Path;

use geovocab_core::{Error, Result};
use tracing::info;

/// Read the whole corpus as UTF-8 text.
pub fn load_corpus(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::MissingResource(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    info!(
        "Loaded {} characters from '{}'",
        content.chars().count(),
        path.display()
    );
    Ok(content)
}

/// Split on `delimiter`, trimming each paper and dropping empty ones.
pub fn split_papers<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        let whole = text.trim();
        return if whole.is_empty() { Vec::new() } else { vec![whole] };
    }
    text.split(delimiter)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
