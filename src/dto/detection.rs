use indexmap::IndexMap;
use serde::Deserialize;
use utoipa::ToSchema;

/// Raw classifier report mapping labels to confidences.
///
/// Insertion-ordered so tie-breaking between equal confidences stays
/// deterministic (first seen wins).
pub type DetectionReport = IndexMap<String, ConfidenceValue>;

/// Confidence carried by one detection entry.
///
/// The classifier delivers either a bare fractional number or a structured
/// value exposing a `confidence` field; anything else is tolerated and
/// treated as no confidence at all rather than failing the whole report.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ConfidenceValue {
    /// Plain fractional confidence in `[0, 1]`.
    Bare(f64),
    /// Structured form wrapping the confidence.
    Structured {
        /// Fractional confidence in `[0, 1]`.
        confidence: f64,
    },
    /// Unrecognized shape, ignored by the feed adapter.
    Other(serde_json::Value),
}

impl ConfidenceValue {
    /// Extract the fractional confidence regardless of shape.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            ConfidenceValue::Bare(value) => Some(*value),
            ConfidenceValue::Structured { confidence } => Some(*confidence),
            ConfidenceValue::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_and_structured_confidences() {
        let report: DetectionReport =
            serde_json::from_str(r#"{"rock": 0.9, "paper": {"confidence": 0.7}}"#).unwrap();
        assert_eq!(report["rock"].confidence(), Some(0.9));
        assert_eq!(report["paper"].confidence(), Some(0.7));
    }

    #[test]
    fn unrecognized_shapes_do_not_fail_the_report() {
        let report: DetectionReport =
            serde_json::from_str(r#"{"rock": {"score": 0.9}, "paper": 0.8, "scissors": "high"}"#)
                .unwrap();
        assert_eq!(report["rock"].confidence(), None);
        assert_eq!(report["paper"].confidence(), Some(0.8));
        assert_eq!(report["scissors"].confidence(), None);
    }

    #[test]
    fn preserves_report_order() {
        let report: DetectionReport =
            serde_json::from_str(r#"{"scissors": 0.8, "rock": 0.8}"#).unwrap();
        let labels: Vec<&str> = report.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["scissors", "rock"]);
    }
}
