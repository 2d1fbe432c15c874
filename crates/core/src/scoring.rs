//! Scoring module - point deltas, level and fall rate
//!
//! Contract:
//! - every reward is non-decreasing in level
//! - clearing four lines at once is worth more than four single clears
//!
//! Levels start at 1 so a level multiplier never zeroes a reward.

use crate::types::{FIRST_LEVEL, LINE_SCORES, PIECE_LOCK_SCORE};

/// Flat bonus for locking a piece at `level`
pub fn piece_score(level: u32) -> u32 {
    PIECE_LOCK_SCORE.saturating_mul(level)
}

/// Bonus for clearing `lines` rows at once at `level`.
///
/// Anything beyond four lines (only possible on exotic boards) scores as four.
pub fn cleared_line_score(lines: usize, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level)
}

/// Level for a cumulative line count: 1 + number of thresholds reached
pub fn level_for_lines(lines: u32, thresholds: &[u32]) -> u32 {
    FIRST_LEVEL + thresholds.iter().filter(|&&t| lines >= t).count() as u32
}

/// Automatic fall rate (steps/sec) for `level`; levels past the table use the
/// last entry.
pub fn fall_rate_for_level(level: u32, fall_rates: &[f64]) -> f64 {
    let idx = (level.max(FIRST_LEVEL) - FIRST_LEVEL) as usize;
    fall_rates
        .get(idx)
        .or_else(|| fall_rates.last())
        .copied()
        .unwrap_or(1.0)
}

/// Minimum interval between steps for a rate: `ceil(1000 / rate)` ms
pub fn interval_ms(rate: f64) -> u64 {
    (1000.0 / rate).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_FALL_RATES, DEFAULT_LEVEL_THRESHOLDS};

    #[test]
    fn test_classic_line_scores() {
        assert_eq!(cleared_line_score(1, 1), 40);
        assert_eq!(cleared_line_score(2, 1), 100);
        assert_eq!(cleared_line_score(3, 1), 300);
        assert_eq!(cleared_line_score(4, 1), 1200);

        assert_eq!(cleared_line_score(1, 5), 40 * 5);
        assert_eq!(cleared_line_score(4, 5), 1200 * 5);
        assert_eq!(cleared_line_score(6, 2), 1200 * 2);
        assert_eq!(cleared_line_score(0, 3), 0);
    }

    #[test]
    fn test_tetris_beats_four_singles() {
        for level in 1..50 {
            assert!(cleared_line_score(4, level) > 4 * cleared_line_score(1, level));
        }
    }

    #[test]
    fn test_piece_score_scales_with_level() {
        assert_eq!(piece_score(1), 10);
        assert_eq!(piece_score(3), 30);
        assert!(piece_score(u32::MAX) >= piece_score(1000));
    }

    #[test]
    fn test_level_calculation() {
        let t = &DEFAULT_LEVEL_THRESHOLDS;
        assert_eq!(level_for_lines(0, t), FIRST_LEVEL);
        assert_eq!(level_for_lines(9, t), 1);
        assert_eq!(level_for_lines(10, t), 2);
        assert_eq!(level_for_lines(29, t), 3);
        assert_eq!(level_for_lines(500, t), 10);
        assert_eq!(level_for_lines(500, &[]), 1);
    }

    #[test]
    fn test_fall_rates() {
        let r = &DEFAULT_FALL_RATES;
        assert_eq!(fall_rate_for_level(1, r), 1.0);
        assert_eq!(fall_rate_for_level(10, r), 10.0);
        assert_eq!(fall_rate_for_level(99, r), 10.0);
    }

    #[test]
    fn test_interval_rounds_up() {
        assert_eq!(interval_ms(1.0), 1000);
        assert_eq!(interval_ms(3.0), 334);
        assert_eq!(interval_ms(20.0), 50);
    }
}
