//! Report stage: virality summary and engagement timeline.
//!
//! Pure formatting of already-computed data: a markdown table over the final
//! clips plus a standalone SVG timeline showing where the clips land in the
//! source video.

use std::path::Path;

use tracing::info;

use reelcut_models::{format_mm_ss, video_duration, FinalClip, Segment};

use crate::error::{PipelineError, PipelineResult};

/// Report file name.
pub const REPORT_FILE: &str = "VIRALITY_REPORT.md";

/// Chart file name.
pub const CHART_FILE: &str = "engagement_chart.svg";

/// Clip bar colors, cycled in order.
const CLIP_COLORS: [&str; 3] = ["#FF4B4B", "#FF8F4B", "#FFD44B"];

/// Render the markdown virality report.
pub fn report_markdown(clips: &[FinalClip], video_duration_secs: f64) -> String {
    let mut md = String::from("## AI Virality Report\n\n");
    md.push_str(&format!(
        "**Total Video Duration:** {:.2} minutes\n",
        video_duration_secs / 60.0
    ));
    md.push_str(&format!("**Clips Generated:** {}\n\n", clips.len()));

    md.push_str("## Viral Clips Summary\n");
    md.push_str("| Clip # | Time Range | Duration | Score | Reasoning |\n");
    md.push_str("| :--- | :--- | :--- | :--- | :--- |\n");

    for (i, clip) in clips.iter().enumerate() {
        let reasoning = clip.reasoning.replace('\n', " ");
        md.push_str(&format!(
            "| {} | {} - {} | {}s | **{}/100** | {} |\n",
            i + 1,
            format_mm_ss(clip.start_time),
            format_mm_ss(clip.end_time),
            clip.duration,
            clip.virality_score,
            reasoning
        ));
    }

    md.push_str("\n## Visual Timeline\n");
    md.push_str(&format!("![Engagement Chart](./{})\n", CHART_FILE));
    md
}

/// Render the engagement timeline as a standalone SVG.
///
/// A gray background bar spans the full video; each clip is a colored bar at
/// its position with a `Clip N (score)` label above.
pub fn engagement_chart_svg(clips: &[FinalClip], video_duration_secs: f64) -> String {
    const WIDTH: f64 = 1000.0;
    const HEIGHT: f64 = 220.0;
    const MARGIN: f64 = 40.0;
    const BAR_Y: f64 = 120.0;
    const BAR_HEIGHT: f64 = 40.0;

    let span = video_duration_secs + 10.0;
    let scale = (WIDTH - 2.0 * MARGIN) / span.max(1.0);
    let x = |secs: f64| MARGIN + secs * scale;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">
<text x="{}" y="30" text-anchor="middle" font-family="sans-serif" font-size="18">Viral Segments Timeline</text>
"#,
        WIDTH / 2.0
    );

    // Full-video background bar
    svg.push_str(&format!(
        r#"<rect x="{}" y="{BAR_Y}" width="{:.1}" height="{BAR_HEIGHT}" fill="{}"/>
"#,
        x(0.0),
        video_duration_secs * scale,
        "#e0e0e0"
    ));

    for (i, clip) in clips.iter().enumerate() {
        let color = CLIP_COLORS[i % CLIP_COLORS.len()];
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{BAR_Y}" width="{:.1}" height="{BAR_HEIGHT}" fill="{color}" stroke="black"/>
<text x="{:.1}" y="{}" font-family="sans-serif" font-size="12" transform="rotate(-45 {:.1} {})">Clip {} ({})</text>
"#,
            x(clip.start_time),
            clip.duration * scale,
            x(clip.start_time),
            BAR_Y - 14.0,
            x(clip.start_time),
            BAR_Y - 14.0,
            i + 1,
            clip.virality_score
        ));
    }

    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="14">Time (seconds)</text>
</svg>
"#,
        WIDTH / 2.0,
        HEIGHT - 15.0
    ));
    svg
}

/// Write the report and chart into `out_dir`.
pub async fn report_stage(
    clips: &[FinalClip],
    segments: &[Segment],
    out_dir: &Path,
) -> PipelineResult<()> {
    let duration = video_duration(segments)
        .ok_or_else(|| PipelineError::ReportFailed("empty transcript".to_string()))?;

    tokio::fs::create_dir_all(out_dir).await?;

    let chart = engagement_chart_svg(clips, duration);
    tokio::fs::write(out_dir.join(CHART_FILE), chart).await?;

    let report = report_markdown(clips, duration);
    tokio::fs::write(out_dir.join(REPORT_FILE), report).await?;

    info!("Report saved to {}", out_dir.join(REPORT_FILE).display());
    Ok(())
}
