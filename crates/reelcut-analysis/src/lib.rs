//! Core analysis algorithms for the ReelCut pipeline.
//!
//! This crate holds the two pieces of the system that make real decisions:
//!
//! - [`chunker`]: converts word-level transcript timings into short,
//!   fixed-cadence caption chunks for on-screen display.
//! - [`expand`]: converts rough LLM-proposed clip windows into final clip
//!   boundaries anchored to transcript segment edges, expanded for narrative
//!   coherence and clamped to platform duration limits.
//!
//! Both are synchronous, single-threaded pure functions over in-memory data:
//! no shared mutable state, no I/O, no suspension points. They are safe to
//! call from any thread, and independent candidates can be expanded in
//! parallel against the same read-only segment slice.

pub mod chunker;
pub mod config;
pub mod expand;

pub use chunker::chunk_segments;
pub use config::{CaptionConfig, ExpansionConfig};
pub use expand::{anchor_end_index, anchor_start_index, expand};
