//! Raw input items as produced by the extraction step.

/// One candidate term before normalization.
///
/// Upstream rows are not guaranteed to be textual; only [`RawTerm::Text`]
/// ever reaches the conflation key.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTerm {
    Text(String),
    Number(f64),
    Missing,
    Other,
}

impl RawTerm {
    /// The textual payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for RawTerm {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawTerm {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for RawTerm {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for RawTerm {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<f64> for RawTerm {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl<T: Into<RawTerm>> From<Option<T>> for RawTerm {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Missing)
    }
}
