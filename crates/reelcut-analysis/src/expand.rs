//! Clip boundary expansion.
//!
//! The language model only estimates rough clip boundaries; the transcript's
//! segment edges are the ground truth for where a thought begins or ends.
//! Expansion anchors a candidate window to segment boundaries, pulls in
//! preceding setup when speech flows without a pause, extends forward until
//! the thought lands, and clamps the result to platform duration limits.

use tracing::debug;

use reelcut_models::{ClipCandidate, FinalClip, Segment};

use crate::config::ExpansionConfig;

/// Index of the first segment whose `end` reaches `time`, or 0 when the
/// candidate lies before the whole transcript.
pub fn anchor_start_index(segments: &[Segment], time: f64) -> usize {
    segments
        .iter()
        .position(|seg| seg.end >= time)
        .unwrap_or(0)
}

/// Index of the last segment whose `start` does not pass `time`, or the last
/// index when the candidate lies before every segment start.
pub fn anchor_end_index(segments: &[Segment], time: f64) -> usize {
    segments
        .iter()
        .rposition(|seg| seg.start <= time)
        .unwrap_or(segments.len() - 1)
}

/// Expand an LLM-proposed candidate window into a final clip.
///
/// Always produces a usable clip, even from a nonsensical candidate (which
/// degenerates to a single segment's span). Degenerate or out-of-range
/// inputs are clamped and normalized rather than rejected, since the
/// upstream proposer is inherently unreliable.
///
/// `max_video_time` is the video duration, i.e. the last segment's `end`.
///
/// # Panics
///
/// Panics if `segments` is empty. Callers must validate the transcript and
/// surface an invalid-input error before expansion.
pub fn expand(
    segments: &[Segment],
    candidate: &ClipCandidate,
    max_video_time: f64,
    config: &ExpansionConfig,
) -> FinalClip {
    assert!(
        !segments.is_empty(),
        "expand requires a non-empty transcript"
    );

    // Step 1: anchor the rough window to segment indices.
    let mut start_index = anchor_start_index(segments, candidate.start_time);
    let mut end_index = anchor_end_index(segments, candidate.end_time);
    if end_index < start_index {
        end_index = start_index;
    }

    // Step 2: look back, bounded to a fixed number of steps. Absorb the
    // preceding segment while the speaker did not pause or the clip is still
    // too thin to stand alone.
    let mut current_start = segments[start_index].start;
    let mut steps_back = 0;
    while start_index > 0 && steps_back < config.back_look_max_steps {
        let prev = &segments[start_index - 1];
        let gap = current_start - prev.end;
        let current_duration = segments[end_index].end - current_start;

        if gap < config.back_gap_threshold || current_duration < config.min_setup_duration {
            debug!(
                start = prev.start,
                end = prev.end,
                gap,
                "absorbing preceding segment for setup context"
            );
            start_index -= 1;
            current_start = prev.start;
            steps_back += 1;
        } else {
            break;
        }
    }

    // Step 3: look forward with no step cap but a duration ceiling. The
    // ceiling is checked before absorbing the next segment, so the last
    // absorbed segment may overshoot it by its own length; the hard trim in
    // step 4 is the actual safety net.
    let mut current_end = segments[end_index].end;
    while end_index < segments.len() - 1 {
        let current_duration = current_end - segments[start_index].start;
        if current_duration > config.soft_duration_ceiling {
            break;
        }

        let next = &segments[end_index + 1];
        let gap = next.start - current_end;
        if gap < config.forward_gap_threshold || current_duration < config.min_clip_duration {
            debug!(
                start = next.start,
                end = next.end,
                gap,
                "absorbing following segment to finish the thought"
            );
            end_index += 1;
            current_end = next.end;
        } else {
            break;
        }
    }

    // Step 4: finalize against the video duration and the hard ceiling.
    let final_start = segments[start_index].start;
    let mut final_end = segments[end_index].end;
    if final_end > max_video_time {
        final_end = max_video_time;
    }
    if final_end - final_start > config.hard_duration_ceiling {
        debug!(
            duration = final_end - final_start,
            ceiling = config.hard_duration_ceiling,
            "trimming clip to the hard duration ceiling"
        );
        final_end = final_start + config.hard_duration_ceiling;
    }

    FinalClip {
        start_time: round2(final_start),
        end_time: round2(final_end),
        duration: round2(final_end - final_start),
        virality_score: candidate.virality_score,
        reasoning: candidate.reasoning.clone(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn candidate(start: f64, end: f64) -> ClipCandidate {
        ClipCandidate {
            start_time: start,
            end_time: end,
            virality_score: 90,
            reasoning: "hook".to_string(),
        }
    }

    fn segments(bounds: &[(f64, f64)]) -> Vec<Segment> {
        bounds
            .iter()
            .map(|&(start, end)| Segment::new(start, end, "…"))
            .collect()
    }

    #[test]
    fn test_anchor_indices() {
        let segs = segments(&[(0.0, 5.0), (5.2, 10.0), (10.1, 15.0)]);
        assert_eq!(anchor_start_index(&segs, 9.0), 1);
        assert_eq!(anchor_start_index(&segs, -3.0), 0);
        // Past the last end: no match, defaults to 0
        assert_eq!(anchor_start_index(&segs, 99.0), 0);

        assert_eq!(anchor_end_index(&segs, 9.0), 1);
        assert_eq!(anchor_end_index(&segs, 99.0), 2);
        // Before every start: no match, defaults to the last index
        assert_eq!(anchor_end_index(&segs, -3.0), 2);
    }

    #[test]
    fn test_tight_gaps_pull_in_context() {
        // Anchors to [5.2,10]..[15.3,40]; the 0.2s gap behind the anchor
        // pulls [0,5] in as setup; everything forward is already absorbed.
        let segs = segments(&[(0.0, 5.0), (5.2, 10.0), (10.1, 15.0), (15.3, 40.0)]);
        let clip = expand(&segs, &candidate(9.0, 16.0), 40.0, &ExpansionConfig::default());

        assert_relative_eq!(clip.start_time, 0.0);
        assert_relative_eq!(clip.end_time, 40.0);
        assert_relative_eq!(clip.duration, 40.0);
        assert_eq!(clip.virality_score, 90);
        assert_eq!(clip.reasoning, "hook");
    }

    #[test]
    fn test_back_look_is_capped_at_two_steps() {
        // Four flowing segments before the anchor, but only two may be
        // absorbed no matter how small the gaps are.
        let segs = segments(&[
            (0.0, 10.0),
            (10.1, 20.0),
            (20.2, 30.0),
            (30.3, 40.0),
            (40.4, 80.0),
        ]);
        let clip = expand(&segs, &candidate(41.0, 79.0), 80.0, &ExpansionConfig::default());

        assert_relative_eq!(clip.start_time, 20.2);
        assert_relative_eq!(clip.end_time, 80.0);
    }

    #[test]
    fn test_short_clip_absorbs_setup_despite_pause() {
        // Gap is well over the threshold, but the anchored clip is under 20s
        // so the preceding segment is pulled in anyway.
        let segs = segments(&[(0.0, 25.0), (100.0, 115.0), (300.0, 340.0)]);
        let clip = expand(&segs, &candidate(105.0, 112.0), 340.0, &ExpansionConfig::default());

        assert_relative_eq!(clip.start_time, 0.0);
        // Forward: 115-0=115 > 30 and the 185s gap stops expansion.
        assert_relative_eq!(clip.end_time, 115.0);
    }

    #[test]
    fn test_degenerate_candidate_maps_to_single_segment() {
        // end_time < start_time anchors to crossing indices; the clip
        // degenerates to the start anchor's segment. Gaps are too wide and
        // the segment long enough for no expansion to trigger.
        let segs = segments(&[(0.0, 35.0), (100.0, 140.0), (300.0, 340.0)]);
        let clip = expand(&segs, &candidate(120.0, 50.0), 340.0, &ExpansionConfig::default());

        assert_relative_eq!(clip.start_time, 100.0);
        assert_relative_eq!(clip.end_time, 140.0);
        assert_relative_eq!(clip.duration, 40.0);
    }

    #[test]
    fn test_forward_expansion_finishes_the_thought() {
        // Under 30s after anchoring: forward expansion keeps absorbing
        // across a large gap until the duration test is satisfied.
        let segs = segments(&[(0.0, 12.0), (14.0, 24.0), (26.0, 45.0), (50.0, 70.0)]);
        let clip = expand(&segs, &candidate(0.0, 10.0), 70.0, &ExpansionConfig::default());

        assert_relative_eq!(clip.start_time, 0.0);
        // [14,24] absorbed (12<30), then [26,45] absorbed (24<30); at 45s
        // duration exceeds 30 and the 5s gap stops expansion.
        assert_relative_eq!(clip.end_time, 45.0);
    }

    #[test]
    fn test_end_clamped_to_video_duration() {
        let segs = segments(&[(0.0, 35.0), (35.5, 90.0)]);
        let clip = expand(&segs, &candidate(0.0, 90.0), 80.0, &ExpansionConfig::default());

        assert_relative_eq!(clip.end_time, 80.0);
        assert_relative_eq!(clip.duration, 80.0);
    }

    #[test]
    fn test_continuous_speech_trims_to_hard_ceiling() {
        // 20 ten-second segments with 0.2s gaps: forward expansion only
        // stops once the duration passes 175s, and the hard trim lands the
        // clip at exactly 179.0s.
        let bounds: Vec<(f64, f64)> = (0..20)
            .map(|i| {
                let start = i as f64 * 10.2;
                (start, start + 10.0)
            })
            .collect();
        let segs = segments(&bounds);
        let max_time = segs.last().unwrap().end;
        let clip = expand(&segs, &candidate(0.0, 5.0), max_time, &ExpansionConfig::default());

        assert_relative_eq!(clip.start_time, 0.0);
        assert_relative_eq!(clip.end_time, 179.0);
        assert_relative_eq!(clip.duration, 179.0);
    }

    #[test]
    fn test_duration_bound_holds_for_hostile_candidates() {
        let bounds: Vec<(f64, f64)> = (0..40)
            .map(|i| {
                let start = i as f64 * 7.3;
                (start, start + 7.0)
            })
            .collect();
        let segs = segments(&bounds);
        let max_time = segs.last().unwrap().end;
        let config = ExpansionConfig::default();

        for cand in [
            candidate(-50.0, -10.0),
            candidate(0.0, 1e9),
            candidate(1e9, 0.0),
            candidate(150.0, 150.0),
        ] {
            let clip = expand(&segs, &cand, max_time, &config);
            assert!(clip.duration <= config.hard_duration_ceiling + 1e-9);
            assert!(clip.end_time <= max_time + 1e-9);
            assert!(clip.start_time >= 0.0);
        }
    }

    #[test]
    fn test_boundaries_are_segment_anchored() {
        // Without the hard trim, both final boundaries must be exact
        // segment start/end values.
        let segs = segments(&[(0.0, 18.0), (20.0, 42.0), (47.0, 61.0), (66.0, 90.0)]);
        let clip = expand(&segs, &candidate(21.0, 40.0), 90.0, &ExpansionConfig::default());

        assert!(segs.iter().any(|s| s.start == clip.start_time));
        assert!(segs.iter().any(|s| s.end == clip.end_time));
    }

    #[test]
    fn test_expansion_is_stable_on_reapplication() {
        // Gaps above both thresholds and a duration above both minimums:
        // re-running expansion on the finalized bounds must not grow the
        // clip.
        let segs = segments(&[(0.0, 35.0), (40.0, 75.0), (80.0, 120.0)]);
        let config = ExpansionConfig::default();
        let first = expand(&segs, &candidate(0.0, 35.0), 120.0, &config);
        let second = expand(
            &segs,
            &candidate(first.start_time, first.end_time),
            120.0,
            &config,
        );

        assert_relative_eq!(first.start_time, second.start_time);
        assert_relative_eq!(first.end_time, second.end_time);
    }

    #[test]
    fn test_rounding_uses_unrounded_difference() {
        // duration is rounded from the raw difference, not recomputed from
        // the rounded endpoints.
        let segs = segments(&[(1.2345, 40.5678), (200.0, 260.0)]);
        let clip = expand(&segs, &candidate(2.0, 30.0), 260.0, &ExpansionConfig::default());

        assert_relative_eq!(clip.start_time, 1.23);
        assert_relative_eq!(clip.end_time, 40.57);
        assert_relative_eq!(clip.duration, 39.33);
    }

    #[test]
    #[should_panic]
    fn test_empty_transcript_panics() {
        expand(&[], &candidate(0.0, 10.0), 0.0, &ExpansionConfig::default());
    }
}
