//! Minimum-frequency filtering of ranked tables.

use std::path::Path;

use geovocab_conflate::RankedTerm;
use geovocab_core::Result;
use serde::Serialize;
use tracing::info;

use crate::table::{load_ranked, write_ranked};

/// Row counts before and after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub minimum_frequency: u64,
    pub before: usize,
    pub after: usize,
}

/// Keep rows with `frequency >= minimum`, preserving order.
pub fn filter_by_frequency(rows: Vec<RankedTerm>, minimum: u64) -> Vec<RankedTerm> {
    rows.into_iter()
        .filter(|row| row.frequency >= minimum)
        .collect()
}

/// Read a ranked table, filter it, and write the surviving rows.
pub fn filter_table(input: &Path, output: &Path, minimum: u64) -> Result<FilterReport> {
    let rows = load_ranked(input)?;
    let before = rows.len();
    let kept = filter_by_frequency(rows, minimum);
    write_ranked(output, &kept)?;

    let report = FilterReport {
        minimum_frequency: minimum,
        before,
        after: kept.len(),
    };
    info!(
        "Filtered terms (Frequency >= {}) saved to '{}'; reduced from {} to {}",
        minimum,
        output.display(),
        report.before,
        report.after
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let rows = vec![
            RankedTerm::new("source rock", 5),
            RankedTerm::new("trap", 3),
            RankedTerm::new("fault", 3),
            RankedTerm::new("delta", 2),
        ];
        let kept = filter_by_frequency(rows, 3);
        assert_eq!(
            kept,
            vec![
                RankedTerm::new("source rock", 5),
                RankedTerm::new("trap", 3),
                RankedTerm::new("fault", 3),
            ]
        );
    }

    #[test]
    fn test_zero_threshold_keeps_everything() {
        let rows = vec![RankedTerm::new("trap", 0), RankedTerm::new("fault", 1)];
        assert_eq!(filter_by_frequency(rows.clone(), 0), rows);
    }
}
