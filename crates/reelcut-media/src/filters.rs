//! FFmpeg filter graph for subtitle burning and vertical cropping.
//!
//! The graph is built sync-safe: the input is decoded from 0:00 with
//! subtitles burned first, so caption timings align with the source, and the
//! `trim`/`atrim` cut happens afterwards with `setpts`/`asetpts` resetting
//! the clip timestamps to zero. Seeking before the subtitle filter would
//! desynchronize the captions.

/// Build the burn-crop-trim filter graph for one clip.
///
/// Produces labeled `[v]`/`[a]` outputs for stream mapping. The video chain
/// burns the ASS subtitles, center-crops to 9:16, trims to the clip window,
/// and resets timestamps; the audio chain trims and resets in parallel.
pub fn build_burn_filter(subtitle_path: &str, start: f64, end: f64) -> String {
    let subs = escape_filter_path(subtitle_path);
    format!(
        "[0:v]ass={subs},\
         crop=w=ih*(9/16):h=ih:x=(iw-ow)/2:y=0,\
         trim=start={start}:end={end},\
         setpts=PTS-STARTPTS[v];\
         [0:a]atrim=start={start}:end={end},\
         asetpts=PTS-STARTPTS[a]"
    )
}

/// Escape a path for use inside a filter graph.
///
/// Backslashes become forward slashes and filter metacharacters are escaped.
/// Paths containing single quotes are not supported.
fn escape_filter_path(path: &str) -> String {
    path.replace('\\', "/")
        .replace(':', "\\:")
        .replace(',', "\\,")
        .replace('[', "\\[")
        .replace(']', "\\]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burn_filter_shape() {
        let filter = build_burn_filter("subtitles.ass", 5.2, 40.0);
        assert!(filter.starts_with("[0:v]ass=subtitles.ass,"));
        assert!(filter.contains("crop=w=ih*(9/16):h=ih:x=(iw-ow)/2:y=0"));
        assert!(filter.contains("trim=start=5.2:end=40,"));
        assert!(filter.contains("setpts=PTS-STARTPTS[v]"));
        assert!(filter.contains("[0:a]atrim=start=5.2:end=40,"));
        assert!(filter.ends_with("asetpts=PTS-STARTPTS[a]"));
    }

    #[test]
    fn test_path_escaping() {
        assert_eq!(escape_filter_path("work/subs.ass"), "work/subs.ass");
        assert_eq!(escape_filter_path("C:\\work\\subs.ass"), "C\\:/work/subs.ass");
        assert_eq!(escape_filter_path("a,b.ass"), "a\\,b.ass");
    }
}
