//! Parsing of LLM replies into raw terms.

use geovocab_conflate::RawTerm;
use geovocab_core::{Error, Result};
use serde_json::Value;

/// Map one JSON array element onto a [`RawTerm`].
pub fn raw_term_from_json(value: Value) -> RawTerm {
    match value {
        Value::String(s) => RawTerm::Text(s),
        Value::Number(n) => n.as_f64().map(RawTerm::Number).unwrap_or(RawTerm::Other),
        Value::Null => RawTerm::Missing,
        _ => RawTerm::Other,
    }
}

/// Parse a reply that should be a JSON array of concept strings.
///
/// A surrounding Markdown code fence is tolerated. Anything other than an
/// array is an [`Error::Extraction`].
pub fn parse_term_array(text: &str) -> Result<Vec<RawTerm>> {
    let body = strip_code_fence(text.trim());
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(items) => Ok(items.into_iter().map(raw_term_from_json).collect()),
        other => Err(Error::Extraction(format!(
            "expected a JSON array of terms, got {}",
            json_kind(&other)
        ))),
    }
}

/// Cell text used when raw terms are written to a table. Integral numbers
/// print without a fractional part; missing and structured values are empty.
pub fn cell_text(term: &RawTerm) -> String {
    match term {
        RawTerm::Text(s) => s.clone(),
        RawTerm::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
        RawTerm::Number(n) => n.to_string(),
        RawTerm::Missing | RawTerm::Other => String::new(),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let terms = parse_term_array(r#"["Microbial Carbonate", "Diagenesis"]"#).unwrap();
        assert_eq!(
            terms,
            vec![
                RawTerm::Text("Microbial Carbonate".into()),
                RawTerm::Text("Diagenesis".into()),
            ]
        );
    }

    #[test]
    fn test_parse_fenced_array_with_noise() {
        let reply = "```json\n[\"Fault\", 42, null, {\"a\": 1}]\n```";
        let terms = parse_term_array(reply).unwrap();
        assert_eq!(
            terms,
            vec![
                RawTerm::Text("Fault".into()),
                RawTerm::Number(42.0),
                RawTerm::Missing,
                RawTerm::Other,
            ]
        );
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_term_array(r#"{"terms": ["Fault"]}"#).unwrap_err();
        assert!(err.to_string().contains("an object"));
        assert!(matches!(parse_term_array("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&RawTerm::Text("Trap".into())), "Trap");
        assert_eq!(cell_text(&RawTerm::Number(42.0)), "42");
        assert_eq!(cell_text(&RawTerm::Number(2.5)), "2.5");
        assert_eq!(cell_text(&RawTerm::Missing), "");
    }
}
