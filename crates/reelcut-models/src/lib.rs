//! Shared data models for the ReelCut pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Transcript segments and word-level timings
//! - Caption chunks for subtitle rendering
//! - LLM-proposed clip candidates and finalized clips
//! - Timestamp formatting (ASS and report styles)
//! - Encoding configuration for clip rendering

pub mod caption;
pub mod clip;
pub mod encoding;
pub mod segment;
pub mod timestamp;

// Re-export common types
pub use caption::CaptionChunk;
pub use clip::{ClipCandidate, FinalClip};
pub use encoding::EncodingConfig;
pub use segment::{video_duration, Segment, Word};
pub use timestamp::{format_ass_timestamp, format_mm_ss};
