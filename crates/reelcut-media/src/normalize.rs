//! Input normalization through HandBrakeCLI.
//!
//! Source videos frequently arrive with variable frame rate, which drifts
//! audio/video sync once subtitles and trims are applied. HandBrake re-encode
//! with `--cfr` forces a constant frame rate before the pipeline proper.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{MediaError, MediaResult};

/// Check if HandBrakeCLI is available.
pub fn check_handbrake() -> MediaResult<PathBuf> {
    which::which("HandBrakeCLI").map_err(|_| MediaError::HandbrakeNotFound)
}

/// Re-encode `src` into `dest` with a constant frame rate.
///
/// Uses the GPU encoder with passthrough audio where compatible, falling
/// back to AAC. HandBrake itself falls back to software encoding when NVENC
/// is unavailable.
pub async fn normalize_input(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    if !src.exists() {
        return Err(MediaError::FileNotFound(src.to_path_buf()));
    }
    let handbrake = check_handbrake()?;

    info!("Normalizing {} -> {}", src.display(), dest.display());

    let output = tokio::process::Command::new(handbrake)
        .arg("--input")
        .arg(src)
        .arg("--output")
        .arg(dest)
        .args(["--format", "av_mp4"])
        .args(["--encoder", "nvenc_h264"])
        .args(["--quality", "20"])
        .arg("--cfr")
        .args(["--aencoder", "copy"])
        .args(["--audio-fallback", "aac"])
        .args(["--ab", "192"])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail: String = stderr
            .lines()
            .rev()
            .take(10)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n");
        return Err(MediaError::handbrake_failed(tail, output.status.code()));
    }

    info!("Normalization complete: {}", dest.display());
    Ok(())
}
