//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("AI analysis failed: {0}")]
    AiFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Report generation failed: {0}")]
    ReportFailed(String),

    #[error("Pipeline stopped")]
    Stopped,

    #[error("Media error: {0}")]
    Media(#[from] reelcut_media::MediaError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn transcription_failed(msg: impl Into<String>) -> Self {
        Self::TranscriptionFailed(msg.into())
    }

    pub fn ai_failed(msg: impl Into<String>) -> Self {
        Self::AiFailed(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the batch runner should keep going with the next video.
    ///
    /// A stop request aborts the whole batch; everything else is scoped to
    /// the current video.
    pub fn is_stop_request(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}
