//! Score formulas for the six mini-games.
//!
//! Every function returns a value already inside [0, [`MAX_SCORE`]]. Rounding
//! is round-half-up (`floor(x + 0.5)`), the same rule used for the session
//! average in [`crate::diagnosis::average_score`].

use crate::constants::*;

/// Clamp an arbitrary integer into the score range.
pub fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, MAX_SCORE as i64) as u8
}

fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Reaction: `clamp(0, 100, round(100 - (ms - 200) / 4))`.
pub fn reaction_score(reaction_ms: u64) -> u8 {
    let raw = MAX_SCORE as f64 - (reaction_ms as f64 - REACTION_BASELINE_MS) / REACTION_MS_PER_POINT;
    clamp_score(round_half_up(raw))
}

/// Pattern: `max(0, hits * 25 - false_positives * 15)`.
pub fn pattern_score(hits: u32, false_positives: u32) -> u8 {
    let raw = hits as i64 * PATTERN_HIT_POINTS as i64
        - false_positives as i64 * PATTERN_FALSE_POSITIVE_PENALTY as i64;
    clamp_score(raw)
}

/// Number recall: 25 points per level cleared. Failing at level L means L - 1
/// levels were cleared; clearing all four is a perfect score.
pub fn number_recall_score(levels_cleared: u32) -> u8 {
    clamp_score(levels_cleared as i64 * NUMBER_POINTS_PER_LEVEL as i64)
}

/// Color interference: `round(correct / rounds * 100)`.
pub fn color_interference_score(correct: u32, rounds: u32) -> u8 {
    if rounds == 0 {
        return 0;
    }
    clamp_score(round_half_up(correct as f64 / rounds as f64 * MAX_SCORE as f64))
}

/// Spatial recall is all or nothing.
pub fn spatial_recall_score(completed_in_order: bool) -> u8 {
    if completed_in_order {
        MAX_SCORE
    } else {
        0
    }
}

/// Target click: `min(100, hits * 10)`.
pub fn target_click_score(hits: u32) -> u8 {
    clamp_score(hits as i64 * TARGET_POINTS_PER_HIT as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-5), 0);
        assert_eq!(clamp_score(0), 0);
        assert_eq!(clamp_score(57), 57);
        assert_eq!(clamp_score(100), 100);
        assert_eq!(clamp_score(250), 100);
    }

    #[test]
    fn test_reaction_score() {
        assert_eq!(reaction_score(200), 100);
        assert_eq!(reaction_score(600), 0);
        assert_eq!(reaction_score(300), 75);
        assert_eq!(reaction_score(120), 100);
        assert_eq!(reaction_score(5_000), 0);
        // 100 - 202/4 = 49.5 rounds up
        assert_eq!(reaction_score(402), 50);
    }

    #[test]
    fn test_pattern_score() {
        assert_eq!(pattern_score(4, 0), 100);
        assert_eq!(pattern_score(3, 1), 60);
        assert_eq!(pattern_score(1, 2), 0);
        assert_eq!(pattern_score(0, 5), 0);
    }

    #[test]
    fn test_number_recall_score() {
        assert_eq!(number_recall_score(0), 0);
        assert_eq!(number_recall_score(2), 50);
        assert_eq!(number_recall_score(NUMBER_MAX_LEVEL), 100);
    }

    #[test]
    fn test_color_interference_score() {
        assert_eq!(color_interference_score(0, 5), 0);
        assert_eq!(color_interference_score(3, 5), 60);
        assert_eq!(color_interference_score(5, 5), 100);
        assert_eq!(color_interference_score(2, 3), 67);
        assert_eq!(color_interference_score(1, 0), 0);
    }

    #[test]
    fn test_target_click_score() {
        assert_eq!(target_click_score(0), 0);
        assert_eq!(target_click_score(7), 70);
        assert_eq!(target_click_score(12), 100);
    }

    #[test]
    fn test_spatial_recall_score() {
        assert_eq!(spatial_recall_score(true), 100);
        assert_eq!(spatial_recall_score(false), 0);
    }
}
