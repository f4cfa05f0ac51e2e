//! Scoring, leveling and gravity speed.
//!
//! All functions here are pure. [`GameStats`](super::GameStats) applies them
//! after every lock.

use std::time::Duration;

/// Base points per line clear, indexed by the number of lines cleared at once.
const SCORE_TABLE: [u64; 5] = [0, 40, 100, 300, 1200];

/// Points needed per level.
const POINTS_PER_LEVEL: u64 = 1000;

const BASE_DROP_INTERVAL_MS: u64 = 1000;
const DROP_INTERVAL_STEP_MS: u64 = 100;
const MIN_DROP_INTERVAL_MS: u64 = 100;

/// Points awarded for clearing `lines` rows at once while at `level`.
///
/// A single lock clears at most four rows; other counts score nothing.
///
/// ```
/// use blockfall_engine::progression::line_clear_score;
///
/// assert_eq!(line_clear_score(1, 1), 40);
/// assert_eq!(line_clear_score(4, 2), 2400);
/// ```
#[must_use]
pub fn line_clear_score(lines: usize, level: u32) -> u64 {
    SCORE_TABLE.get(lines).copied().unwrap_or(0) * u64::from(level)
}

/// Level reached with `score` points. Levels start at 1.
#[must_use]
pub fn level_for_score(score: u64) -> u32 {
    u32::try_from(score / POINTS_PER_LEVEL)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

/// Gravity interval at `level`: one second at level 1, 100 ms faster per
/// level, never below 100 ms.
#[must_use]
pub fn drop_interval(level: u32) -> Duration {
    let speedup = u64::from(level.saturating_sub(1)) * DROP_INTERVAL_STEP_MS;
    let millis = BASE_DROP_INTERVAL_MS
        .saturating_sub(speedup)
        .max(MIN_DROP_INTERVAL_MS);
    Duration::from_millis(millis)
}
