//! Transcription stage.
//!
//! Invokes the external WhisperX CLI for speech recognition and word-level
//! alignment, persists the segment transcript, and generates the caption
//! subtitle file from the word timings.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use reelcut_analysis::chunk_segments;
use reelcut_media::write_ass;
use reelcut_models::Segment;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::store::{save_transcript, SUBTITLES_FILE, TRANSCRIPT_FILE};

/// WhisperX JSON output; only the segment list matters downstream.
#[derive(Debug, Deserialize)]
struct WhisperxOutput {
    segments: Vec<Segment>,
}

/// Transcribe `video` into `workdir`, writing `transcript.json` and
/// `subtitles.ass`, and return the parsed segments.
pub async fn transcribe_stage(
    config: &PipelineConfig,
    video: &Path,
    workdir: &Path,
) -> PipelineResult<Vec<Segment>> {
    if !video.exists() {
        return Err(PipelineError::invalid_input(format!(
            "video not found: {}",
            video.display()
        )));
    }
    tokio::fs::create_dir_all(workdir).await?;

    let segments = run_whisperx(config, video, workdir).await?;
    info!("Transcribed {} segments", segments.len());

    save_transcript(&segments, workdir.join(TRANSCRIPT_FILE)).await?;

    let chunks = chunk_segments(&segments, &config.caption);
    write_ass(&chunks, workdir.join(SUBTITLES_FILE)).await?;
    info!("Created {} caption chunks", chunks.len());

    Ok(segments)
}

/// Run the WhisperX CLI and parse its JSON output.
async fn run_whisperx(
    config: &PipelineConfig,
    video: &Path,
    workdir: &Path,
) -> PipelineResult<Vec<Segment>> {
    which::which("whisperx")
        .map_err(|_| PipelineError::transcription_failed("whisperx not found in PATH"))?;

    info!(
        "Running WhisperX ({} | {} | cpu) on {}",
        config.whisper_model,
        config.compute_type,
        video.display()
    );

    let output = tokio::process::Command::new("whisperx")
        .arg(video)
        .arg("--model")
        .arg(&config.whisper_model)
        .arg("--compute_type")
        .arg(&config.compute_type)
        .arg("--batch_size")
        .arg(config.batch_size.to_string())
        // CPU keeps CTranslate2 stable across driver setups
        .args(["--device", "cpu"])
        .args(["--output_format", "json"])
        .arg("--output_dir")
        .arg(workdir)
        .output()
        .await
        .map_err(|e| PipelineError::transcription_failed(format!("failed to run whisperx: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PipelineError::transcription_failed(format!(
            "whisperx exited with {:?}: {}",
            output.status.code(),
            stderr.trim()
        )));
    }

    let json_path = whisperx_output_path(video, workdir);
    let data = tokio::fs::read_to_string(&json_path).await.map_err(|_| {
        PipelineError::transcription_failed(format!(
            "whisperx output not found: {}",
            json_path.display()
        ))
    })?;

    parse_whisperx_output(&data)
}

/// WhisperX writes `<input stem>.json` into the output directory.
fn whisperx_output_path(video: &Path, workdir: &Path) -> PathBuf {
    let stem = video.file_stem().unwrap_or_default();
    workdir.join(stem).with_extension("json")
}

fn parse_whisperx_output(data: &str) -> PipelineResult<Vec<Segment>> {
    let parsed: WhisperxOutput = serde_json::from_str(data)
        .map_err(|e| PipelineError::transcription_failed(format!("bad whisperx JSON: {}", e)))?;
    Ok(parsed.segments)
}
