//! Flat-file persistence for pipeline artifacts.
//!
//! Everything the pipeline produces lives as JSON next to the work files:
//! `transcript.json` (segment array) and `clips.json` (final clip array).

use std::path::Path;

use reelcut_models::{FinalClip, Segment};

use crate::error::{PipelineError, PipelineResult};

/// File name for the persisted transcript.
pub const TRANSCRIPT_FILE: &str = "transcript.json";

/// File name for the persisted final clips.
pub const CLIPS_FILE: &str = "clips.json";

/// File name for the generated subtitles.
pub const SUBTITLES_FILE: &str = "subtitles.ass";

/// Load a transcript (segment array) from disk.
pub async fn load_transcript(path: impl AsRef<Path>) -> PipelineResult<Vec<Segment>> {
    let path = path.as_ref();
    let data = tokio::fs::read_to_string(path).await.map_err(|_| {
        PipelineError::invalid_input(format!("transcript not found: {}", path.display()))
    })?;
    Ok(serde_json::from_str(&data)?)
}

/// Persist a transcript as pretty-printed JSON.
pub async fn save_transcript(segments: &[Segment], path: impl AsRef<Path>) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(segments)?;
    tokio::fs::write(path.as_ref(), json).await?;
    Ok(())
}

/// Load final clips from disk.
pub async fn load_clips(path: impl AsRef<Path>) -> PipelineResult<Vec<FinalClip>> {
    let path = path.as_ref();
    let data = tokio::fs::read_to_string(path).await.map_err(|_| {
        PipelineError::invalid_input(format!("clips not found: {}", path.display()))
    })?;
    Ok(serde_json::from_str(&data)?)
}

/// Persist final clips as pretty-printed JSON.
pub async fn save_clips(clips: &[FinalClip], path: impl AsRef<Path>) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(clips)?;
    tokio::fs::write(path.as_ref(), json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcut_models::Word;

    #[tokio::test]
    async fn test_transcript_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TRANSCRIPT_FILE);
        let segments = vec![Segment::new(0.0, 2.0, "hello")
            .with_words(vec![Word::timed("hello", 0.0, 2.0)])];

        save_transcript(&segments, &path).await.unwrap();
        let loaded = load_transcript(&path).await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "hello");
        assert_eq!(loaded[0].words.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_transcript_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_transcript(dir.path().join("nope.json")).await;
        assert!(matches!(result, Err(PipelineError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_clips_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CLIPS_FILE);
        let clips = vec![FinalClip {
            start_time: 5.2,
            end_time: 40.0,
            duration: 34.8,
            virality_score: 88,
            reasoning: "strong hook".to_string(),
        }];

        save_clips(&clips, &path).await.unwrap();
        let loaded = load_clips(&path).await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].virality_score, 88);
    }
}
