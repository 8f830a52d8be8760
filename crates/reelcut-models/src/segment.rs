//! Transcript segment and word models.
//!
//! These mirror the JSON produced by the external transcription/alignment
//! engine: `[{start, end, text, words?: [{word, start?, end?}]}]`. A full
//! transcript is an ordered `Vec<Segment>` with non-decreasing `start`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A contiguous span of transcribed speech.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds (`end >= start`)
    pub end: f64,

    /// Full transcribed text for this span
    pub text: String,

    /// Word-level timings; empty when alignment was skipped or failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,
}

impl Segment {
    /// Create a segment without word-level timings.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            words: Vec::new(),
        }
    }

    /// Attach word-level timings.
    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = words;
        self
    }
}

/// The smallest timed unit of a transcript, owned by exactly one segment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Word {
    /// Token text as emitted by the aligner (may carry surrounding whitespace)
    pub word: String,

    /// Start time in seconds; `None` when alignment failed for this token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,

    /// End time in seconds; `None` when alignment failed for this token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl Word {
    /// Create a fully-timed word.
    pub fn timed(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both timings, if the token was aligned.
    pub fn timing(&self) -> Option<(f64, f64)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// Total video duration as seen by the transcript: the last segment's `end`.
///
/// Returns `None` for an empty transcript.
pub fn video_duration(segments: &[Segment]) -> Option<f64> {
    segments.last().map(|seg| seg.end)
}
