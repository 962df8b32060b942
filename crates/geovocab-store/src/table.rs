//! CSV table reading and writing.

use std::fs;
use std::io::Write;
use std::path::Path;

use geovocab_conflate::{RankedTerm, RawTerm};
use geovocab_core::{Error, Result};
use serde::Serialize;
use tracing::{debug, info};

pub const ENTITY_COLUMN: &str = "Entity";
pub const LABEL_COLUMN: &str = "Readable_Term";
pub const FREQUENCY_COLUMN: &str = "Frequency";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Cell values read as missing rather than as text.
const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Serialize)]
struct EntityRow<'a> {
    #[serde(rename = "Entity")]
    entity: &'a str,
}

/// Load the `Entity` column of a CSV file, in row order.
///
/// Empty cells and the usual null markers (`N/A`, `null`, `NaN`, ...) become
/// [`RawTerm::Missing`]; every other cell is text.
pub fn load_entities(path: &Path) -> Result<Vec<RawTerm>> {
    let mut reader = open_reader(path)?;
    let idx = column_index(&mut reader, path, ENTITY_COLUMN)?;

    let mut terms = Vec::new();
    for record in reader.records() {
        let record = record?;
        let term = match record.get(idx) {
            Some(cell) if !cell.is_empty() && !NA_VALUES.contains(&cell) => {
                RawTerm::Text(cell.to_string())
            }
            _ => RawTerm::Missing,
        };
        terms.push(term);
    }

    info!("{} raw terms loaded from '{}'", terms.len(), path.display());
    Ok(terms)
}

/// Load a ranked `Readable_Term,Frequency` table.
pub fn load_ranked(path: &Path) -> Result<Vec<RankedTerm>> {
    let mut reader = open_reader(path)?;
    let label_idx = column_index(&mut reader, path, LABEL_COLUMN)?;
    let freq_idx = column_index(&mut reader, path, FREQUENCY_COLUMN)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record.position().map(|p| p.line()).unwrap_or(0);
        let label = record.get(label_idx).unwrap_or("").to_string();
        let raw_freq = record.get(freq_idx).unwrap_or("").trim();
        let frequency = raw_freq.parse::<u64>().map_err(|_| Error::InvalidRow {
            path: path.to_path_buf(),
            row,
            reason: format!("'{}' is not a non-negative integer frequency", raw_freq),
        })?;
        rows.push(RankedTerm { label, frequency });
    }

    debug!("{} ranked rows loaded from '{}'", rows.len(), path.display());
    Ok(rows)
}

/// Write raw extracted terms as a single `Entity` column.
pub fn write_entities<S: AsRef<str>>(path: &Path, terms: &[S]) -> Result<()> {
    write_atomically(path, |writer| {
        writer.write_record([ENTITY_COLUMN])?;
        for term in terms {
            writer.serialize(EntityRow {
                entity: term.as_ref(),
            })?;
        }
        Ok(())
    })?;
    info!("{} raw terms saved to '{}'", terms.len(), path.display());
    Ok(())
}

/// Write ranked terms as `Readable_Term,Frequency`, preserving order.
pub fn write_ranked<'a, I>(path: &Path, rows: I) -> Result<()>
where
    I: IntoIterator<Item = &'a RankedTerm>,
{
    let mut count = 0usize;
    write_atomically(path, |writer| {
        writer.write_record([LABEL_COLUMN, FREQUENCY_COLUMN])?;
        for row in rows {
            writer.serialize(row)?;
            count += 1;
        }
        Ok(())
    })?;
    info!("{} ranked terms saved to '{}'", count, path.display());
    Ok(())
}

fn open_reader(path: &Path) -> Result<csv::Reader<fs::File>> {
    if !path.exists() {
        return Err(Error::MissingResource(path.to_path_buf()));
    }
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    Ok(reader)
}

fn column_index(reader: &mut csv::Reader<fs::File>, path: &Path, column: &str) -> Result<usize> {
    reader
        .headers()?
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == column)
        .ok_or_else(|| Error::SchemaMismatch {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Write a BOM-prefixed CSV into a temporary file next to `path`, then
/// rename it over `path`. Nothing is left at `path` on failure.
fn write_atomically<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut csv::Writer<&mut fs::File>) -> std::result::Result<(), csv::Error>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::sink(path, e))?;
        info!("Created output directory: {}", dir.display());
    }

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::sink(path, e))?;
    tmp.write_all(UTF8_BOM).map_err(|e| Error::sink(path, e))?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        fill(&mut writer).map_err(|e| Error::sink(path, e))?;
        writer.flush().map_err(|e| Error::sink(path, e))?;
    }
    tmp.as_file().sync_all().map_err(|e| Error::sink(path, e))?;
    tmp.persist(path).map_err(|e| Error::sink(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_roundtrip_keeps_missing_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        fs::write(&path, "Entity,Paper\nFault,1\n,1\n\"Source Rock, Lacustrine\",2\n").unwrap();

        let terms = load_entities(&path).unwrap();
        assert_eq!(
            terms,
            vec![
                RawTerm::Text("Fault".into()),
                RawTerm::Missing,
                RawTerm::Text("Source Rock, Lacustrine".into()),
            ]
        );
    }

    #[test]
    fn test_null_markers_are_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        fs::write(&path, "Entity\nN/A\nnull\nNone\nnan\n<NA>\nFault\nNone of the above\n").unwrap();

        let terms = load_entities(&path).unwrap();
        assert_eq!(terms.len(), 7);
        assert!(terms[..5].iter().all(|t| *t == RawTerm::Missing));
        assert_eq!(terms[5], RawTerm::Text("Fault".into()));
        assert_eq!(terms[6], RawTerm::Text("None of the above".into()));

        let result = geovocab_conflate::ConflationEngine::english().conflate(terms);
        assert_eq!(result.terms.len(), 2);
        assert_eq!(result.total_frequency(), 2);
        assert_eq!(result.stats.non_textual, 5);
    }

    #[test]
    fn test_bom_header_is_recognised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        fs::write(&path, "\u{feff}Entity\nTrap\n").unwrap();

        let terms = load_entities(&path).unwrap();
        assert_eq!(terms, vec![RawTerm::Text("Trap".into())]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_entities(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, Error::MissingResource(_)));
    }

    #[test]
    fn test_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        fs::write(&path, "Term\nFault\n").unwrap();

        let err = load_entities(&path).unwrap_err();
        match err {
            Error::SchemaMismatch { column, .. } => assert_eq!(column, ENTITY_COLUMN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_write_entities_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        write_entities(&path, &["Fault", "Source Rock, Lacustrine"]).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "Entity\nFault\n\"Source Rock, Lacustrine\"\n");
    }

    #[test]
    fn test_invalid_frequency_reports_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranked.csv");
        fs::write(&path, "Readable_Term,Frequency\nfault,3\ntrap,many\n").unwrap();

        let err = load_ranked(&path).unwrap_err();
        match err {
            Error::InvalidRow { row, .. } => assert_eq!(row, 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
