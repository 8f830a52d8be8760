//! Batch runner: drive every stage for each video in the input folder.

use std::path::{Path, PathBuf};

use tokio::sync::watch;
use tracing::{error, info, warn};

use reelcut_media::{normalize_input, MediaError};

use crate::analyze::analyze_stage;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::render::render_stage;
use crate::report::report_stage;
use crate::store::SUBTITLES_FILE;
use crate::transcribe::transcribe_stage;

/// Extensions accepted by the batch scanner.
pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mov", "mkv", "avi", "webm"];

/// Output directory name inside each video's work directory.
const FINAL_CLIPS_DIR: &str = "final_clips";

/// Whether a path looks like a processable video file.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            VIDEO_EXTENSIONS.iter().any(|v| *v == ext)
        })
        .unwrap_or(false)
}

/// Process every video in the input folder; returns the number of videos
/// that completed.
///
/// A failing video is logged and skipped; a stop request aborts the whole
/// batch between stages.
pub async fn run_batch(
    config: &PipelineConfig,
    stop_rx: watch::Receiver<bool>,
) -> PipelineResult<usize> {
    tokio::fs::create_dir_all(&config.input_dir).await?;
    tokio::fs::create_dir_all(&config.processed_dir).await?;

    let mut videos: Vec<PathBuf> = std::fs::read_dir(&config.input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_video_file(path))
        .collect();
    videos.sort();

    if videos.is_empty() {
        warn!("No videos found in {}", config.input_dir.display());
        return Ok(0);
    }

    info!("Found {} videos, starting batch pipeline", videos.len());
    let mut completed = 0;
    for video in &videos {
        match process_video(config, video, &stop_rx).await {
            Ok(dest) => {
                info!("Done: results saved to {}", dest.display());
                completed += 1;
            }
            Err(e) if e.is_stop_request() => {
                warn!("Stop requested, halting batch");
                break;
            }
            Err(e) => error!("Pipeline failed for {}: {}", video.display(), e),
        }
    }

    Ok(completed)
}

/// Run every stage for a single video and move the results into the
/// processed folder. Returns the destination directory.
pub async fn process_video(
    config: &PipelineConfig,
    video: &Path,
    stop_rx: &watch::Receiver<bool>,
) -> PipelineResult<PathBuf> {
    let stem = video
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| PipelineError::invalid_input("video has no usable file name"))?;

    info!("Processing: {}", video.display());
    let workdir = config.work_dir.join(stem);
    tokio::fs::create_dir_all(&workdir).await?;

    // Stage 0: force constant frame rate so subtitles stay in sync. Skipped
    // when HandBrakeCLI is not installed.
    ensure_not_stopped(stop_rx)?;
    let source = match normalize_source(video, &workdir).await? {
        Some(normalized) => normalized,
        None => video.to_path_buf(),
    };

    // Stage 1: transcribe + align + captions
    ensure_not_stopped(stop_rx)?;
    info!("[1/5] Transcribing audio");
    let segments = transcribe_stage(config, &source, &workdir).await?;

    // Stage 2: candidate windows + boundary expansion
    ensure_not_stopped(stop_rx)?;
    info!("[2/5] Analyzing viral hooks");
    let clips = analyze_stage(config, &segments, &workdir).await?;

    // Stage 3: render clips
    ensure_not_stopped(stop_rx)?;
    info!("[3/5] Cropping and subtitling clips");
    let clips_dir = workdir.join(FINAL_CLIPS_DIR);
    render_stage(
        config,
        &source,
        &clips,
        &workdir.join(SUBTITLES_FILE),
        &clips_dir,
        Some(stop_rx.clone()),
    )
    .await?;

    // Stage 4: report
    ensure_not_stopped(stop_rx)?;
    info!("[4/5] Generating virality report");
    report_stage(&clips, &segments, &clips_dir).await?;

    // Stage 5: move results out of the work area
    info!("[5/5] Finalizing");
    let dest = config.processed_dir.join(stem);
    if dest.exists() {
        tokio::fs::remove_dir_all(&dest).await?;
    }
    tokio::fs::create_dir_all(&config.processed_dir).await?;
    tokio::fs::rename(&clips_dir, &dest).await?;

    Ok(dest)
}

/// Normalize the source video into the work directory.
///
/// Returns `None` (use the original file) when HandBrakeCLI is missing;
/// any other normalization failure aborts this video.
async fn normalize_source(video: &Path, workdir: &Path) -> PipelineResult<Option<PathBuf>> {
    let normalized = workdir.join("input_normalized.mp4");
    match normalize_input(video, &normalized).await {
        Ok(()) => Ok(Some(normalized)),
        Err(MediaError::HandbrakeNotFound) => {
            warn!("HandBrakeCLI not found, processing the source as-is");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn ensure_not_stopped(stop_rx: &watch::Receiver<bool>) -> PipelineResult<()> {
    if *stop_rx.borrow() {
        return Err(PipelineError::Stopped);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_extension_filter() {
        assert!(is_video_file(Path::new("input_videos/talk.mp4")));
        assert!(is_video_file(Path::new("talk.MKV")));
        assert!(is_video_file(Path::new("clip.webm")));
        assert!(!is_video_file(Path::new("notes.txt")));
        assert!(!is_video_file(Path::new("transcript.json")));
        assert!(!is_video_file(Path::new("no_extension")));
    }

    #[test]
    fn test_stop_flag() {
        let (tx, rx) = watch::channel(false);
        assert!(ensure_not_stopped(&rx).is_ok());
        tx.send(true).unwrap();
        assert!(matches!(
            ensure_not_stopped(&rx),
            Err(PipelineError::Stopped)
        ));
    }
}
