//! FFmpeg progress reporting.

/// A snapshot of FFmpeg's `-progress pipe:2` output.
#[derive(Debug, Clone, Default)]
pub struct FfmpegProgress {
    /// Current frame number
    pub frame: u64,

    /// Current encoding speed in frames per second
    pub fps: f64,

    /// Output timestamp in milliseconds
    pub out_time_ms: i64,

    /// Encoding speed relative to realtime (e.g. 1.5 = 1.5x)
    pub speed: f64,

    /// Whether FFmpeg reported `progress=end`
    pub is_complete: bool,
}

impl FfmpegProgress {
    /// Output position in seconds.
    pub fn out_time_secs(&self) -> f64 {
        self.out_time_ms as f64 / 1000.0
    }
}
