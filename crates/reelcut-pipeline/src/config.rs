//! Pipeline configuration.

use std::path::PathBuf;

use reelcut_analysis::{CaptionConfig, ExpansionConfig};

/// Pipeline configuration, read from environment variables with defaults
/// suitable for a single workstation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// WhisperX model size (e.g. "small", "medium")
    pub whisper_model: String,
    /// WhisperX compute type ("int8" keeps CPU inference stable)
    pub compute_type: String,
    /// WhisperX batch size
    pub batch_size: u32,
    /// Ollama base URL
    pub ollama_host: String,
    /// Ollama model name
    pub ollama_model: String,
    /// Folder scanned by the batch runner
    pub input_dir: PathBuf,
    /// Folder receiving per-video result directories
    pub processed_dir: PathBuf,
    /// Working directory for intermediate files
    pub work_dir: PathBuf,
    /// Per-clip FFmpeg timeout
    pub ffmpeg_timeout_secs: u64,
    /// Caption chunking limits
    pub caption: CaptionConfig,
    /// Clip expansion limits
    pub expansion: ExpansionConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            whisper_model: "small".to_string(),
            compute_type: "int8".to_string(),
            batch_size: 4,
            ollama_host: "http://127.0.0.1:11434".to_string(),
            ollama_model: "gemma3:4b".to_string(),
            input_dir: PathBuf::from("input_videos"),
            processed_dir: PathBuf::from("processed_videos"),
            work_dir: PathBuf::from("work"),
            ffmpeg_timeout_secs: 1800,
            caption: CaptionConfig::default(),
            expansion: ExpansionConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            whisper_model: env_or("REELCUT_WHISPER_MODEL", defaults.whisper_model),
            compute_type: env_or("REELCUT_COMPUTE_TYPE", defaults.compute_type),
            batch_size: env_parsed("REELCUT_BATCH_SIZE", defaults.batch_size),
            ollama_host: env_or("REELCUT_OLLAMA_HOST", defaults.ollama_host),
            ollama_model: env_or("REELCUT_OLLAMA_MODEL", defaults.ollama_model),
            input_dir: PathBuf::from(env_or(
                "REELCUT_INPUT_DIR",
                defaults.input_dir.to_string_lossy().to_string(),
            )),
            processed_dir: PathBuf::from(env_or(
                "REELCUT_PROCESSED_DIR",
                defaults.processed_dir.to_string_lossy().to_string(),
            )),
            work_dir: PathBuf::from(env_or(
                "REELCUT_WORK_DIR",
                defaults.work_dir.to_string_lossy().to_string(),
            )),
            ffmpeg_timeout_secs: env_parsed("REELCUT_FFMPEG_TIMEOUT", defaults.ffmpeg_timeout_secs),
            caption: CaptionConfig {
                max_words_per_line: env_parsed(
                    "REELCUT_MAX_WORDS_PER_LINE",
                    defaults.caption.max_words_per_line,
                ),
                max_chars_per_line: env_parsed(
                    "REELCUT_MAX_CHARS_PER_LINE",
                    defaults.caption.max_chars_per_line,
                ),
            },
            expansion: defaults.expansion,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
