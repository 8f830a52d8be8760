//! Clip candidate and final clip models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An LLM-proposed clip window. Untrusted input: `end_time` is nominally
/// greater than `start_time` but not guaranteed, and neither value is
/// validated for plausibility beyond the expansion/clamping algorithm.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClipCandidate {
    /// Proposed start time (seconds)
    pub start_time: f64,

    /// Proposed end time (seconds)
    pub end_time: f64,

    /// Advisory virality score, 0-100
    #[serde(default)]
    pub virality_score: u8,

    /// Advisory free-text rationale
    #[serde(default)]
    pub reasoning: String,
}

/// A finalized, segment-anchored, duration-bounded clip ready for rendering.
///
/// Invariants: `0 <= start_time`, `end_time <= video duration`,
/// `duration <= 179.0`; all times rounded to 2 decimal places.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FinalClip {
    /// Final start time (seconds, 2-decimal)
    pub start_time: f64,

    /// Final end time (seconds, 2-decimal)
    pub end_time: f64,

    /// `end_time - start_time` (seconds, 2-decimal)
    pub duration: f64,

    /// Carried over from the candidate
    pub virality_score: u8,

    /// Carried over from the candidate
    pub reasoning: String,
}
