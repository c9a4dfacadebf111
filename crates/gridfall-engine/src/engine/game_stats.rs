use std::time::Duration;

/// Points awarded per cleared line.
const POINTS_PER_LINE: usize = 100;

/// Gravity curve: base 500ms, 50ms faster for every 500 points, floored at 100ms.
const BASE_DROP_MILLIS: u64 = 500;
const DROP_MILLIS_FLOOR: u64 = 100;
const SPEEDUP_STEP_POINTS: usize = 500;
const SPEEDUP_STEP_MILLIS: u64 = 50;

/// Per-session statistics: score, piece count, and line-clear distribution.
///
/// The score is monotonic within a session and is the sole input to the
/// gravity speed via [`Self::drop_interval`]. Scoring is flat per line
/// (no multi-line, combo, or back-to-back bonuses).
#[derive(Debug, Clone)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    /// Returns the current score (100 points per cleared line).
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns the total number of lines cleared.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// `[1]` counts singles, `[2]` doubles, `[3]` triples, `[4]` quads;
    /// `[0]` counts drops that cleared nothing.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// The time between gravity drops at the current score.
    ///
    /// Derived from the score alone, so it only changes when a line clear
    /// changes the score.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        let steps = (self.score / SPEEDUP_STEP_POINTS) as u64;
        let millis = BASE_DROP_MILLIS
            .saturating_sub(steps.saturating_mul(SPEEDUP_STEP_MILLIS))
            .max(DROP_MILLIS_FLOOR);
        Duration::from_millis(millis)
    }

    /// Updates statistics after a piece lock.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Number of lines cleared by the drop (0-4)
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.score += cleared_lines * POINTS_PER_LINE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_flat_per_line() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(1);
        assert_eq!(stats.score(), 100);
        stats.complete_piece_drop(4);
        assert_eq!(stats.score(), 500);
        assert_eq!(stats.total_cleared_lines(), 5);
        assert_eq!(stats.completed_pieces(), 2);
        assert_eq!(*stats.line_cleared_counter(), [0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_drop_interval_at_base_score() {
        let mut stats = GameStats::new();
        assert_eq!(stats.drop_interval(), Duration::from_millis(500));

        // 100 points is below the first speedup step.
        stats.complete_piece_drop(1);
        assert_eq!(stats.drop_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_drop_interval_speeds_up_per_step() {
        let mut stats = GameStats::new();
        for _ in 0..5 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.score(), 500);
        assert_eq!(stats.drop_interval(), Duration::from_millis(450));
    }

    #[test]
    fn test_drop_interval_floors_at_100ms() {
        let mut stats = GameStats::new();
        // 100 singles: score 10_000, nominally 500 - 20 * 50 < floor.
        for _ in 0..100 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.drop_interval(), Duration::from_millis(100));
    }
}
