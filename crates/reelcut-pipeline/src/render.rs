//! Render stage: produce one captioned vertical clip per final clip.

use std::path::{Path, PathBuf};

use tokio::sync::watch;
use tracing::{error, info};

use reelcut_media::{render_clip, FfmpegRunner};
use reelcut_models::FinalClip;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;

/// Output file name for clip `index` (1-based on disk).
pub fn clip_filename(index: usize) -> String {
    format!("clip_{}.mp4", index + 1)
}

/// Render all clips into `out_dir`, burning `subtitle_path` captions.
///
/// A failed clip is logged and skipped so the rest of the batch still
/// renders; the number of successfully rendered clips is returned.
pub async fn render_stage(
    config: &PipelineConfig,
    input_video: &Path,
    clips: &[FinalClip],
    subtitle_path: &Path,
    out_dir: &Path,
    cancel_rx: Option<watch::Receiver<bool>>,
) -> PipelineResult<usize> {
    tokio::fs::create_dir_all(out_dir).await?;

    let mut rendered = 0;
    for (index, clip) in clips.iter().enumerate() {
        let output: PathBuf = out_dir.join(clip_filename(index));
        info!(
            "Processing clip {} ({}s - {}s)",
            index + 1,
            clip.start_time,
            clip.end_time
        );

        let mut runner = FfmpegRunner::new().with_timeout(config.ffmpeg_timeout_secs);
        if let Some(rx) = &cancel_rx {
            runner = runner.with_cancel(rx.clone());
        }

        match render_clip(
            input_video,
            &output,
            clip.start_time,
            clip.end_time,
            subtitle_path,
            &runner,
        )
        .await
        {
            Ok(()) => rendered += 1,
            Err(e) => error!("Clip {} failed: {}", index + 1, e),
        }
    }

    info!("Rendered {}/{} clips", rendered, clips.len());
    Ok(rendered)
}
