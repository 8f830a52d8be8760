//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during media processing.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("HandBrakeCLI not found in PATH")]
    HandbrakeNotFound,

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("HandBrake command failed: {message}")]
    HandbrakeFailed {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create a HandBrake failure error.
    pub fn handbrake_failed(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::HandbrakeFailed {
            message: message.into(),
            exit_code,
        }
    }

    /// Whether the encoder itself failed (the case worth retrying with the
    /// CPU fallback profile).
    pub fn is_encoder_failure(&self) -> bool {
        matches!(self, Self::FfmpegFailed { .. })
    }
}
