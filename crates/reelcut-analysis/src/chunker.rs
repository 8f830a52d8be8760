//! Word chunking for punchy, word-by-word captions.
//!
//! Long transcript segments are split into short chunks based on word-level
//! timing, so each caption flashes on screen for only a word or two.

use reelcut_models::{CaptionChunk, Segment};

use crate::config::CaptionConfig;

/// A word accepted into the in-progress chunk.
struct TimedWord {
    text: String,
    start: f64,
    end: f64,
}

/// Split segments into caption chunks of at most `max_words_per_line` words
/// and `max_chars_per_line` characters.
///
/// Words missing either timestamp are dropped (alignment failed for them).
/// Chunks never span a segment boundary: the in-progress chunk is flushed at
/// every segment end whether or not a limit was hit. The first word of a
/// chunk is always accepted, so a single word longer than the character
/// budget still forms a (one-word) chunk.
///
/// This is a total function: malformed word entries are filtered, never
/// errored.
pub fn chunk_segments(segments: &[Segment], config: &CaptionConfig) -> Vec<CaptionChunk> {
    let mut chunks = Vec::new();

    for segment in segments {
        let mut current: Vec<TimedWord> = Vec::new();
        let mut char_count = 0usize;

        for word in &segment.words {
            let Some((start, end)) = word.timing() else {
                continue;
            };
            let text = word.word.trim();

            if current.len() >= config.max_words_per_line
                || char_count + text.len() > config.max_chars_per_line
            {
                if !current.is_empty() {
                    chunks.push(flush(&current));
                    current.clear();
                    char_count = 0;
                }
            }

            // Budget counts a trailing separator per word, on the raw
            // (un-uppercased) text.
            char_count += text.len() + 1;
            current.push(TimedWord {
                text: text.to_string(),
                start,
                end,
            });
        }

        if !current.is_empty() {
            chunks.push(flush(&current));
        }
    }

    chunks
}

fn flush(words: &[TimedWord]) -> CaptionChunk {
    let text = words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    CaptionChunk::new(text, words[0].start, words[words.len() - 1].end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcut_models::Word;

    fn segment_with_words(start: f64, end: f64, words: Vec<Word>) -> Segment {
        Segment::new(start, end, "").with_words(words)
    }

    #[test]
    fn test_two_word_chunks_with_tail() {
        // "the quick" flushes when "brown" arrives; "brown" flushes at
        // segment end.
        let segments = vec![segment_with_words(
            0.0,
            0.8,
            vec![
                Word::timed("the", 0.0, 0.2),
                Word::timed("quick", 0.2, 0.5),
                Word::timed("brown", 0.5, 0.8),
            ],
        )];

        let chunks = chunk_segments(&segments, &CaptionConfig::default());
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], CaptionChunk::new("THE QUICK", 0.0, 0.5));
        assert_eq!(chunks[1], CaptionChunk::new("BROWN", 0.5, 0.8));
    }

    #[test]
    fn test_char_budget_forces_break() {
        // "extraordinary" (13) + "circumstances" (13): 13+1+13 > 18, so the
        // second word starts a new chunk even though max_words allows two.
        let segments = vec![segment_with_words(
            0.0,
            2.0,
            vec![
                Word::timed("extraordinary", 0.0, 1.0),
                Word::timed("circumstances", 1.0, 2.0),
            ],
        )];

        let chunks = chunk_segments(&segments, &CaptionConfig::default());
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "EXTRAORDINARY");
        assert_eq!(chunks[1].text, "CIRCUMSTANCES");
    }

    #[test]
    fn test_oversized_single_word_still_emitted() {
        let segments = vec![segment_with_words(
            0.0,
            1.0,
            vec![Word::timed("antidisestablishmentarianism", 0.0, 1.0)],
        )];

        let chunks = chunk_segments(&segments, &CaptionConfig::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "ANTIDISESTABLISHMENTARIANISM");
    }

    #[test]
    fn test_unaligned_words_are_dropped() {
        let segments = vec![segment_with_words(
            0.0,
            1.5,
            vec![
                Word::timed("keep", 0.0, 0.4),
                Word {
                    word: "lost".to_string(),
                    start: Some(0.4),
                    end: None,
                },
                Word {
                    word: "gone".to_string(),
                    start: None,
                    end: None,
                },
                Word::timed("also", 0.9, 1.5),
            ],
        )];

        let chunks = chunk_segments(&segments, &CaptionConfig::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], CaptionChunk::new("KEEP ALSO", 0.0, 1.5));
    }

    #[test]
    fn test_segment_without_words_is_skipped() {
        let segments = vec![
            Segment::new(0.0, 2.0, "no alignment here"),
            segment_with_words(2.0, 2.5, vec![Word::timed("hi", 2.0, 2.5)]),
        ];

        let chunks = chunk_segments(&segments, &CaptionConfig::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "HI");
    }

    #[test]
    fn test_chunks_never_cross_segment_boundary() {
        // One word per segment: the in-progress chunk must flush at each
        // segment end instead of pairing across segments.
        let segments = vec![
            segment_with_words(0.0, 0.5, vec![Word::timed("one", 0.0, 0.5)]),
            segment_with_words(0.6, 1.0, vec![Word::timed("two", 0.6, 1.0)]),
        ];

        let chunks = chunk_segments(&segments, &CaptionConfig::default());
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "ONE");
        assert_eq!(chunks[1].text, "TWO");
    }

    #[test]
    fn test_word_text_is_trimmed() {
        // WhisperX emits tokens with a leading space.
        let segments = vec![segment_with_words(
            0.0,
            1.0,
            vec![Word::timed(" hello", 0.0, 0.5), Word::timed(" there", 0.5, 1.0)],
        )];

        let chunks = chunk_segments(&segments, &CaptionConfig::default());
        assert_eq!(chunks[0].text, "HELLO THERE");
    }

    #[test]
    fn test_coverage_and_limits() {
        // Every aligned word appears exactly once, in order, and every chunk
        // respects the word/char limits or is a single oversized word.
        let config = CaptionConfig::default();
        let words: Vec<Word> = [
            "so", "what", "nobody", "tells", "you", "about", "building", "a", "business", "is",
            "that", "consistency", "beats", "intensity",
        ]
        .iter()
        .enumerate()
        .map(|(i, w)| Word::timed(*w, i as f64 * 0.3, i as f64 * 0.3 + 0.25))
        .collect();
        let word_count = words.len();
        let segments = vec![segment_with_words(0.0, 5.0, words)];

        let chunks = chunk_segments(&segments, &config);

        let mut emitted = Vec::new();
        for chunk in &chunks {
            let chunk_words: Vec<&str> = chunk.text.split(' ').collect();
            assert!(chunk_words.len() <= config.max_words_per_line);
            let char_sum: usize = chunk_words.iter().map(|w| w.len() + 1).sum();
            assert!(char_sum <= config.max_chars_per_line + 1 || chunk_words.len() == 1);
            emitted.extend(chunk_words.iter().map(|w| w.to_lowercase()));
        }
        let expected: Vec<String> = segments[0]
            .words
            .iter()
            .map(|w| w.word.to_lowercase())
            .collect();
        assert_eq!(emitted.len(), word_count);
        assert_eq!(emitted, expected);
    }

    #[test]
    fn test_alternate_limits() {
        let config = CaptionConfig {
            max_words_per_line: 3,
            max_chars_per_line: 100,
        };
        let segments = vec![segment_with_words(
            0.0,
            2.0,
            vec![
                Word::timed("a", 0.0, 0.4),
                Word::timed("b", 0.4, 0.8),
                Word::timed("c", 0.8, 1.2),
                Word::timed("d", 1.2, 2.0),
            ],
        )];

        let chunks = chunk_segments(&segments, &config);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "A B C");
        assert_eq!(chunks[1].text, "D");
    }
}
