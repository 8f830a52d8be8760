//! Tunable limits for the core algorithms.
//!
//! Both structs are passed explicitly into the algorithms instead of living
//! as module-level constants, so tests and callers can run with alternate
//! limits.

use serde::{Deserialize, Serialize};

/// Limits for caption chunking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionConfig {
    /// Maximum words per caption chunk
    pub max_words_per_line: usize,

    /// Character budget per chunk, counting one trailing separator per word
    pub max_chars_per_line: usize,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            max_words_per_line: 2,
            max_chars_per_line: 18,
        }
    }
}

/// Limits and thresholds for clip boundary expansion.
///
/// The backward and forward passes are deliberately asymmetric: setup context
/// is valuable but bounded (step cap), while the payoff is bounded only by
/// the absolute duration ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Maximum segments absorbed before the anchored start
    pub back_look_max_steps: usize,

    /// Backward gap below which speech counts as flowing (seconds)
    pub back_gap_threshold: f64,

    /// Keep absorbing setup while the clip is shorter than this (seconds)
    pub min_setup_duration: f64,

    /// Forward gap below which the thought continues (seconds)
    pub forward_gap_threshold: f64,

    /// Keep absorbing forward while the clip is shorter than this (seconds)
    pub min_clip_duration: f64,

    /// Stop forward expansion once the clip already exceeds this (seconds).
    /// A soft early-exit heuristic, not a guarantee: the last absorbed
    /// segment can overshoot it by up to its own length.
    pub soft_duration_ceiling: f64,

    /// Absolute trim applied after finalization (seconds)
    pub hard_duration_ceiling: f64,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            back_look_max_steps: 2,
            back_gap_threshold: 1.5,
            min_setup_duration: 20.0,
            forward_gap_threshold: 1.0,
            min_clip_duration: 30.0,
            soft_duration_ceiling: 175.0,
            hard_duration_ceiling: 179.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let caption = CaptionConfig::default();
        assert_eq!(caption.max_words_per_line, 2);
        assert_eq!(caption.max_chars_per_line, 18);

        let expansion = ExpansionConfig::default();
        assert_eq!(expansion.back_look_max_steps, 2);
        assert!(expansion.soft_duration_ceiling < expansion.hard_duration_ceiling);
    }
}
