//! Adapter between the gesture classifier and the game store.
//!
//! The classifier is a black box emitting label-to-confidence reports at
//! arbitrary frequency. This adapter filters each report down to a single
//! confident gesture and forwards it; everything malformed or below the
//! threshold is dropped silently, never surfaced as an error.

use crate::{
    dto::detection::DetectionReport,
    state::{SharedState, game::Move},
};

/// Filter a raw classifier report and forward the best candidate to the store.
///
/// No side effects when the report is empty or nothing survives filtering.
pub async fn ingest(state: &SharedState, detections: &DetectionReport) {
    let threshold = state.config().confidence_threshold;
    let Some((label, confidence)) = best_candidate(detections, threshold) else {
        return;
    };
    state.update_detection(label, confidence).await;
}

/// Highest-confidence valid gesture at or above `threshold`.
///
/// Labels are lowercased before matching; ties keep the first entry seen.
fn best_candidate(detections: &DetectionReport, threshold: f64) -> Option<(Move, f64)> {
    let mut best: Option<(Move, f64)> = None;
    for (raw_label, value) in detections {
        let Some(label) = Move::from_label(&raw_label.to_lowercase()) else {
            continue;
        };
        let Some(confidence) = value.confidence() else {
            continue;
        };
        if confidence < threshold {
            continue;
        }
        if best.is_none_or(|(_, current)| confidence > current) {
            best = Some((label, confidence));
        }
    }
    best
}
