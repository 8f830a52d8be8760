//! Caption chunk model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A display unit for subtitles: a short, upper-cased run of words sized for
/// rapid on-screen display.
///
/// Created transiently during chunking, serialized into a subtitle file, then
/// discarded. A chunk never spans a segment boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CaptionChunk {
    /// Space-joined, upper-cased word texts
    pub text: String,

    /// Start of the first included word (seconds)
    pub start: f64,

    /// End of the last included word (seconds)
    pub end: f64,
}

impl CaptionChunk {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_json_shape() {
        let chunk = CaptionChunk::new("THE QUICK", 0.0, 0.5);
        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["text"], "THE QUICK");
        assert_eq!(json["start"], 0.0);
        assert_eq!(json["end"], 0.5);
    }
}
