//! ASS subtitle generation for caption chunks.
//!
//! Emits a 1080x1920 portrait script with a single heavy-outline style so
//! each caption chunk flashes word-by-word near the lower third of the
//! frame.

use std::path::Path;

use reelcut_models::{format_ass_timestamp, CaptionChunk};

use crate::error::MediaResult;

/// Script header: portrait play area and the caption style.
const ASS_HEADER: &str = r#"[Script Info]
ScriptType: v4.00+
PlayResX: 1080
PlayResY: 1920

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial Black,85,&H0000FFFF,&H000000FF,&H00000000,&H00000000,-1,0,0,0,100,100,0,0,1,4,0,2,10,10,550,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
"#;

/// Render caption chunks into a complete ASS document.
pub fn ass_document(chunks: &[CaptionChunk]) -> String {
    let mut doc = String::from(ASS_HEADER);
    for chunk in chunks {
        doc.push_str(&format!(
            "Dialogue: 0,{},{},Default,,0,0,0,,{}\n",
            format_ass_timestamp(chunk.start),
            format_ass_timestamp(chunk.end),
            chunk.text
        ));
    }
    doc
}

/// Write caption chunks to an ASS subtitle file.
pub async fn write_ass(chunks: &[CaptionChunk], path: impl AsRef<Path>) -> MediaResult<()> {
    tokio::fs::write(path.as_ref(), ass_document(chunks)).await?;
    Ok(())
}
