//! Behavioural tests for the conflation engine with the English Snowball stemmer.

use geovocab_conflate::{normalize, ConflationEngine, RankedTerm, RawTerm, SnowballStemmer};

fn rows(result: &geovocab_conflate::RankedResult) -> Vec<(String, u64)> {
    result
        .iter()
        .map(|t| (t.label.clone(), t.frequency))
        .collect()
}

#[test]
fn test_key_derivation_is_deterministic() {
    let engine = ConflationEngine::english();
    assert_eq!(
        engine.key("microbial carbonates"),
        engine.key("microbial carbonates")
    );
}

#[test]
fn test_case_and_whitespace_invariance() {
    let engine = ConflationEngine::english();
    let result = engine.conflate(vec![" Carbonate ", "carbonate", "CARBONATE"]);
    assert_eq!(rows(&result), vec![("carbonate".to_string(), 3)]);
}

#[test]
fn test_plural_conflation() {
    let engine = ConflationEngine::english();
    assert_eq!(engine.key("carbonates"), engine.key("carbonate"));

    let result = engine.conflate(vec!["carbonates", "carbonate"]);
    assert_eq!(rows(&result), vec![("carbonate".to_string(), 2)]);
}

#[test]
fn test_short_terms_excluded() {
    let engine = ConflationEngine::english();
    let result = engine.conflate(vec!["pH", "CO", " Fe ", "Porosity"]);
    assert_eq!(rows(&result), vec![("porosity".to_string(), 1)]);
    assert_eq!(result.total_frequency(), 1);
}

#[test]
fn test_non_string_items_are_skipped() {
    let engine = ConflationEngine::english();
    let items = vec![
        RawTerm::from("Fault"),
        RawTerm::from(42),
        RawTerm::from(None::<String>),
        RawTerm::from("fault"),
    ];
    let result = engine.conflate(items);
    assert_eq!(rows(&result), vec![("fault".to_string(), 2)]);
}

#[test]
fn test_shortest_label_wins() {
    let engine = ConflationEngine::english();
    let result = engine.conflate(vec!["Microbial Carbonates", "microbial carbonate"]);
    assert_eq!(rows(&result), vec![("microbial carbonate".to_string(), 2)]);
}

#[test]
fn test_frequency_sum_matches_accepted_items() {
    let engine = ConflationEngine::english();
    let items: Vec<RawTerm> = vec![
        "Diagenesis".into(),
        "pH".into(),
        RawTerm::Number(3.5),
        "Source Rock".into(),
        "  ".into(),
        "source rocks".into(),
        "Lacustrine Environment".into(),
        RawTerm::Missing,
        "Aptian".into(),
    ];
    let expected = items
        .iter()
        .filter_map(|t| t.as_text())
        .filter_map(normalize)
        .count() as u64;

    let result = engine.conflate(items);
    assert_eq!(result.total_frequency(), expected);
    assert_eq!(result.total_frequency(), 5);
    assert_eq!(result.stats.accepted, 5);
}

#[test]
fn test_ties_keep_first_seen_order() {
    let engine = ConflationEngine::english();
    let mut items = Vec::new();
    // "basin" first appears before "fault"; both reach 5, "delta" reaches 3
    items.push("basin");
    items.push("fault");
    items.extend(["delta"; 3]);
    items.extend(["fault"; 4]);
    items.extend(["basins"; 4]);

    let result = engine.conflate(items);
    assert_eq!(
        result.terms,
        vec![
            RankedTerm::new("basin", 5),
            RankedTerm::new("fault", 5),
            RankedTerm::new("delta", 3),
        ]
    );
}

#[test]
fn test_end_to_end_example() {
    let engine = ConflationEngine::new(SnowballStemmer::english());
    let result = engine.conflate(vec![
        "Source Rock",
        "source rocks",
        "Trap",
        "structural trap",
        "Structural Traps",
    ]);
    assert_eq!(
        rows(&result),
        vec![
            ("source rock".to_string(), 2),
            ("structural trap".to_string(), 2),
            ("trap".to_string(), 1),
        ]
    );
}

#[test]
fn test_ranked_term_serializes_with_table_headers() {
    let json = serde_json::to_value(RankedTerm::new("source rock", 2)).unwrap();
    assert_eq!(json["Readable_Term"], "source rock");
    assert_eq!(json["Frequency"], 2);
}
