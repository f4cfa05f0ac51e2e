use serde::Serialize;

use crate::core::{board::Board, piece::Piece};

use super::GameStats;

/// Read-only copy of everything a renderer or recorder needs from a session.
///
/// Serializes to JSON with the board as `/`-separated digit rows and pieces
/// as `"kind#rotation@x,y"` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub falling_piece: Piece,
    pub next_piece: Piece,
    pub stats: GameStats,
    pub drop_interval_ms: u64,
    pub game_over: bool,
}
