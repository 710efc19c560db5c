use serde::{Deserialize, Serialize};

use crate::core::PieceKind;

/// Points awarded for every locked piece.
pub const LOCK_BONUS: usize = 10;
/// Points per cleared line, multiplied by the level before the lock.
pub const LINE_CLEAR_BONUS: usize = 100;
/// Points per row descended during a hard drop.
pub const HARD_DROP_BONUS: usize = 2;
/// Cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: usize = 10;

/// Game statistics tracking score, lines cleared, and placements.
///
/// Tracks various metrics during a game session:
///
/// - **Score**: lock bonus + line clears (scaled by level) + hard-drop rows
/// - **Level**: derived from total lines cleared (1 level per 10 lines, from 1)
/// - **Placements**: number of locked pieces per kind
/// - **Line clear distribution**: count of 0/1/2/3/4-line locks
///
/// # Example
///
/// ```
/// use quadris_engine::{GameStats, PieceKind};
///
/// let mut stats = GameStats::new();
/// let points = stats.complete_piece_drop(PieceKind::I, 4, 18);
///
/// assert_eq!(points, 10 + 100 * 4 + 2 * 18);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.placements(PieceKind::I), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    placement_counter: [usize; PieceKind::LEN],
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
            placement_counter: [0; PieceKind::LEN],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level: `total_cleared_lines / 10 + 1`.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.total_cleared_lines / LINES_PER_LEVEL + 1
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
    /// Index `n` counts locks that cleared exactly `n` lines. Locks clearing
    /// more than 4 lines (only possible on custom-sized boards) are not
    /// binned.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Returns how many pieces of `kind` have been locked.
    #[must_use]
    pub const fn placements(&self, kind: PieceKind) -> usize {
        self.placement_counter[kind.index()]
    }

    /// Returns the per-kind placement counters in [`PieceKind::ALL`] order.
    #[must_use]
    pub const fn placement_counter(&self) -> &[usize; PieceKind::LEN] {
        &self.placement_counter
    }

    /// Updates statistics after a piece locks and returns the points awarded.
    ///
    /// The line-clear bonus uses the level before this lock is counted.
    pub fn complete_piece_drop(
        &mut self,
        kind: PieceKind,
        cleared_lines: usize,
        hard_drop_rows: usize,
    ) -> usize {
        let points = LOCK_BONUS
            + LINE_CLEAR_BONUS * self.level() * cleared_lines
            + HARD_DROP_BONUS * hard_drop_rows;

        self.score += points;
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.placement_counter[kind.index()] += 1;
        points
    }

    #[cfg(test)]
    pub(crate) fn with_cleared_lines(total_cleared_lines: usize) -> Self {
        Self {
            total_cleared_lines,
            ..Self::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.placement_counter(), &[0; PieceKind::LEN]);
    }

    #[test]
    fn test_lock_without_lines() {
        let mut stats = GameStats::new();
        assert_eq!(stats.complete_piece_drop(PieceKind::T, 0, 0), 10);
        assert_eq!(stats.score(), 10);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.total_cleared_lines(), 0);
        assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 0, 0]);
        assert_eq!(stats.placements(PieceKind::T), 1);
        assert_eq!(stats.placements(PieceKind::I), 0);
    }

    #[test]
    fn test_double_at_level_three() {
        let mut stats = GameStats::with_cleared_lines(20);
        assert_eq!(stats.level(), 3);
        assert_eq!(stats.complete_piece_drop(PieceKind::O, 2, 0), 610);
        assert_eq!(stats.total_cleared_lines(), 22);
        assert_eq!(stats.level(), 3);
    }

    #[test]
    fn test_bonus_uses_level_before_lock() {
        let mut stats = GameStats::with_cleared_lines(9);
        assert_eq!(stats.complete_piece_drop(PieceKind::I, 4, 0), 410);
        assert_eq!(stats.level(), 2);
    }

    #[test]
    fn test_hard_drop_rows() {
        let mut stats = GameStats::new();
        assert_eq!(stats.complete_piece_drop(PieceKind::L, 0, 17), 44);
    }

    #[test]
    fn test_level_increments_every_ten_lines() {
        let mut stats = GameStats::new();
        for expected_level in 1..=5 {
            assert_eq!(stats.level(), expected_level);
            for _ in 0..10 {
                stats.complete_piece_drop(PieceKind::I, 1, 0);
            }
        }
        assert_eq!(stats.completed_pieces(), 50);
        assert_eq!(stats.line_cleared_counter()[1], 50);
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(PieceKind::S, 1, 3);
        let json = serde_json::to_string(&stats).unwrap();
        let restored: GameStats = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, stats);
    }
}
