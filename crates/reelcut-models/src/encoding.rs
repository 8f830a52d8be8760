//! Video encoding configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pixel format forced on every output (player compatibility).
pub const DEFAULT_PIX_FMT: &str = "yuv420p";

/// Video encoding configuration for clip rendering.
///
/// Two stock profiles exist: [`EncodingConfig::nvenc`] for GPU encoding and
/// [`EncodingConfig::cpu_fallback`] used when the GPU encoder fails or is
/// unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EncodingConfig {
    /// Video codec (e.g. "h264_nvenc", "libx264")
    pub codec: String,

    /// Encoder preset (e.g. "p6", "medium")
    pub preset: String,

    /// Pixel format
    #[serde(default = "default_pix_fmt")]
    pub pix_fmt: String,

    /// Constant Rate Factor; used by CPU encoders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crf: Option<u8>,

    /// Target video bitrate (e.g. "15M"); used by NVENC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_bitrate: Option<String>,

    /// Audio codec
    pub audio_codec: String,

    /// Audio bitrate (e.g. "192k")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_bitrate: Option<String>,
}

fn default_pix_fmt() -> String {
    DEFAULT_PIX_FMT.to_string()
}

impl EncodingConfig {
    /// High-quality NVENC profile (GPU).
    pub fn nvenc() -> Self {
        Self {
            codec: "h264_nvenc".to_string(),
            preset: "p6".to_string(),
            pix_fmt: DEFAULT_PIX_FMT.to_string(),
            crf: None,
            video_bitrate: Some("15M".to_string()),
            audio_codec: "aac".to_string(),
            audio_bitrate: Some("192k".to_string()),
        }
    }

    /// High-quality software profile, the fallback when NVENC fails.
    pub fn cpu_fallback() -> Self {
        Self {
            codec: "libx264".to_string(),
            preset: "medium".to_string(),
            pix_fmt: DEFAULT_PIX_FMT.to_string(),
            crf: Some(18),
            video_bitrate: None,
            audio_codec: "aac".to_string(),
            audio_bitrate: None,
        }
    }

    /// Whether this profile uses a hardware encoder.
    pub fn is_hardware(&self) -> bool {
        self.codec.contains("nvenc")
    }

    /// Convert to FFmpeg output arguments.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            self.codec.clone(),
            "-pix_fmt".to_string(),
            self.pix_fmt.clone(),
            "-preset".to_string(),
            self.preset.clone(),
        ];

        if let Some(bitrate) = &self.video_bitrate {
            args.push("-b:v".to_string());
            args.push(bitrate.clone());
        }
        if let Some(crf) = self.crf {
            args.push("-crf".to_string());
            args.push(crf.to_string());
        }

        args.push("-c:a".to_string());
        args.push(self.audio_codec.clone());
        if let Some(bitrate) = &self.audio_bitrate {
            args.push("-b:a".to_string());
            args.push(bitrate.clone());
        }

        args
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self::cpu_fallback()
    }
}
