use std::time::Duration;

use serde::Serialize;

use super::progression;

/// Game statistics: score, level and line clear counters.
///
/// - **Score**: line clear points, scaled by the level at the time of the clear
/// - **Level**: derived from the score (one level per 1000 points, starting at 1)
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: count of locks by lines cleared
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4); // four lines at level 1
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.level(), 2);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: u64,
    level: u32,
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
    /// Creates a tracker at level 1 with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Current gravity interval.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        progression::drop_interval(self.level)
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by lines cleared.
    ///
    /// - `[0]`: locks that cleared nothing
    /// - `[1]`..`[4]`: singles, doubles, triples and four-line clears
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece locks.
    ///
    /// Score is awarded at the current level, then the level is recomputed
    /// from the new score.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        if cleared_lines == 0 {
            return;
        }
        self.total_cleared_lines += cleared_lines;
        self.score += progression::line_clear_score(cleared_lines, self.level);
        self.level = progression::level_for_score(self.score);
    }
}
