//! GeoVocab Store — tabular persistence for the term pipeline.
//!
//! Reads the `Entity` column produced by extraction, writes ranked
//! `Readable_Term,Frequency` tables, and applies the minimum-frequency cut.
//! Every table is written UTF-8 with a byte-order mark and replaced
//! atomically.

pub mod filter;
pub mod table;

pub use filter::{filter_by_frequency, filter_table, FilterReport};
pub use table::{
    load_entities, load_ranked, write_entities, write_ranked, ENTITY_COLUMN, FREQUENCY_COLUMN,
    LABEL_COLUMN,
};
