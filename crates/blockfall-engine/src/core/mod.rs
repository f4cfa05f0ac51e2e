//! Board and piece primitives.
//!
//! Everything here is plain data: a [`Board`] of [`Cell`]s, square [`Shape`]
//! matrices and [`Piece`]s that pair a shape with a position. Movement and
//! rotation return candidate pieces; whether a candidate is legal is decided by
//! [`Board::is_colliding`].
//!
//! # Coordinate System
//!
//! - (0, 0) is the top-left cell of the board
//! - X increases rightward (columns `0..BOARD_WIDTH`)
//! - Y increases downward (rows `0..BOARD_HEIGHT`)
//! - Rows above the board (`y < 0`) are treated as empty space

pub use self::{board::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;
