//! Timestamp formatting utilities.
//!
//! Two encodings are used across the pipeline: the ASS subtitle format
//! (`H:MM:SS.cc`, centisecond precision, hours unpadded) and the compact
//! `M:SS` form used in report time ranges.

/// Format seconds as an ASS event timestamp (`H:MM:SS.cc`).
///
/// Components are truncated, not rounded, matching what subtitle renderers
/// expect for centisecond timing. Negative inputs are clamped to zero.
pub fn format_ass_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = (seconds % 60.0) as u64;
    let centis = ((seconds - seconds.floor()) * 100.0) as u64;
    format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
}

/// Format seconds as `M:SS` (minutes unpadded) for report tables.
pub fn format_mm_ss(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0) as u64;
    let secs = (seconds % 60.0) as u64;
    format!("{}:{:02}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ass_timestamp() {
        assert_eq!(format_ass_timestamp(0.0), "0:00:00.00");
        assert_eq!(format_ass_timestamp(0.5), "0:00:00.50");
        assert_eq!(format_ass_timestamp(61.25), "0:01:01.25");
        assert_eq!(format_ass_timestamp(3723.25), "1:02:03.25");
    }

    #[test]
    fn test_ass_timestamp_negative_clamped() {
        assert_eq!(format_ass_timestamp(-1.0), "0:00:00.00");
    }

    #[test]
    fn test_mm_ss() {
        assert_eq!(format_mm_ss(0.0), "0:00");
        assert_eq!(format_mm_ss(75.0), "1:15");
        assert_eq!(format_mm_ss(600.9), "10:00");
    }
}
