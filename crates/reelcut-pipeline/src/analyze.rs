//! Analysis stage: viral segment proposals and boundary expansion.
//!
//! The transcript is rendered into timestamped lines, handed to the language
//! model for candidate windows, and every candidate is expanded to
//! segment-anchored, duration-clamped final boundaries.

use std::path::Path;

use tracing::info;

use reelcut_analysis::{expand, ExpansionConfig};
use reelcut_models::{video_duration, ClipCandidate, FinalClip, Segment};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::ollama::{strip_code_fences, OllamaClient};
use crate::store::{save_clips, CLIPS_FILE};

/// Render segments as `[start-end] text` lines for the prompt.
pub fn transcript_prompt_text(segments: &[Segment]) -> String {
    let mut text = String::new();
    for seg in segments {
        let start = (seg.start * 100.0).round() / 100.0;
        let end = (seg.end * 100.0).round() / 100.0;
        text.push_str(&format!("[{}-{}] {}\n", start, end, seg.text.trim()));
    }
    text
}

/// Build the viral-editor prompt around a rendered transcript.
pub fn build_prompt(transcript_text: &str) -> String {
    format!(
        r#"You are a viral content editor. Analyze the transcript below from a YouTube video.
Identify the TOP most engaging segments suitable for YouTube Shorts and Instagram Reels.

CRITICAL RULES:
1. EACH CLIP MUST BE 30 TO 180 SECONDS LONG.
2. Context is key: Include the full setup (intro), the main hook, and the conclusion. Do not rush.

Transcript:
{transcript_text}

RETURN ONLY RAW JSON. Structure:
[
  {{
    "start_time": 12.0,
    "end_time": 145.0,
    "virality_score": 95,
    "reasoning": "Complete story about X, starting from the setup."
  }}
]
"#
    )
}

/// Parse the model's response into candidate windows.
///
/// Markdown fences are tolerated; anything else malformed is a fatal
/// analysis error.
pub fn parse_candidates(raw: &str) -> PipelineResult<Vec<ClipCandidate>> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned)
        .map_err(|e| PipelineError::ai_failed(format!("LLM did not return valid JSON: {}", e)))
}

/// Expand every candidate against the transcript, preserving order.
///
/// Fails on an empty transcript; the expansion itself is total and always
/// yields one final clip per candidate.
pub fn expand_candidates(
    segments: &[Segment],
    candidates: &[ClipCandidate],
    config: &ExpansionConfig,
) -> PipelineResult<Vec<FinalClip>> {
    let max_time = video_duration(segments)
        .ok_or_else(|| PipelineError::invalid_input("empty transcript"))?;

    let clips = candidates
        .iter()
        .map(|candidate| {
            let clip = expand(segments, candidate, max_time, config);
            info!(
                "Final clip: {}-{} -> {}-{} (dur: {}s)",
                candidate.start_time, candidate.end_time, clip.start_time, clip.end_time,
                clip.duration
            );
            clip
        })
        .collect();

    Ok(clips)
}

/// Run the full analysis stage: prompt the model, expand candidates, and
/// persist `clips.json` into `workdir`.
pub async fn analyze_stage(
    config: &PipelineConfig,
    segments: &[Segment],
    workdir: &Path,
) -> PipelineResult<Vec<FinalClip>> {
    if segments.is_empty() {
        return Err(PipelineError::invalid_input("empty transcript"));
    }

    let client = OllamaClient::new(&config.ollama_host, &config.ollama_model);
    let prompt = build_prompt(&transcript_prompt_text(segments));
    let response = client.chat(&prompt).await?;

    let candidates = parse_candidates(&response)?;
    info!("LLM proposed {} candidate windows", candidates.len());

    let clips = expand_candidates(segments, &candidates, &config.expansion)?;
    save_clips(&clips, workdir.join(CLIPS_FILE)).await?;
    info!("Saved {} expanded clips", clips.len());

    Ok(clips)
}
