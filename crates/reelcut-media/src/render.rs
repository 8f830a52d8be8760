//! Clip rendering with GPU encoding and CPU fallback.

use std::path::Path;

use tracing::{info, warn};

use reelcut_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::filters::build_burn_filter;

/// Render a single clip: burn subtitles, center-crop to 9:16, trim to
/// `[start, end)`, and encode.
///
/// Tries the NVENC profile first and falls back to the CPU profile when the
/// encoder fails (no NVIDIA hardware, driver mismatch). Cancellation and
/// timeouts are not retried.
pub async fn render_clip(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    start: f64,
    end: f64,
    subtitle_path: impl AsRef<Path>,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();
    let subtitle_path = subtitle_path.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }
    if !subtitle_path.exists() {
        return Err(MediaError::FileNotFound(subtitle_path.to_path_buf()));
    }

    let filter = build_burn_filter(&subtitle_path.to_string_lossy(), start, end);

    info!(
        "Rendering clip {} ({:.2}s - {:.2}s)",
        output.display(),
        start,
        end
    );

    let gpu_cmd = command_for(input, output, &filter, &EncodingConfig::nvenc());
    match runner.run(&gpu_cmd).await {
        Ok(()) => {
            info!("Clip rendered with NVENC: {}", output.display());
            Ok(())
        }
        Err(e) if e.is_encoder_failure() => {
            warn!("GPU encode failed ({}), falling back to CPU", e);
            let cpu_cmd = command_for(input, output, &filter, &EncodingConfig::cpu_fallback());
            runner.run(&cpu_cmd).await?;
            info!("Clip rendered with libx264: {}", output.display());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn command_for(
    input: &Path,
    output: &Path,
    filter: &str,
    encoding: &EncodingConfig,
) -> FfmpegCommand {
    FfmpegCommand::new(input, output)
        .filter_complex(filter)
        .map("[v]")
        .map("[a]")
        .encoding(encoding)
}
