//! Game engine logic and state management.
//!
//! This module builds the game on top of the [`core`](crate::core) data types:
//!
//! - [`GameField`] - board, falling piece and queued next piece
//! - [`GameSession`] - the state machine driven by commands and elapsed time
//! - [`GameStats`] - score, level and line clear counters
//! - [`PieceGenerator`] - uniform random piece source
//! - [`PieceSeed`] - seed for deterministic piece generation
//! - [`progression`] - scoring, leveling and gravity curves
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]
//! 2. Forward player input as commands (move, rotate, soft drop, hard drop)
//! 3. Call [`GameSession::advance_time`] once per frame so gravity applies
//! 4. Render from the query methods or a [`GameSnapshot`]
//! 5. Drain [`GameEvent`]s; on [`GameEvent::GameOver`] show the score and
//!    call [`GameSession::restart`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{GameEvent, GameSession};
//!
//! let mut session = GameSession::new();
//!
//! session.try_move_left().ok();
//! session.try_rotate().ok();
//! session.advance_time(Duration::from_millis(16));
//! session.hard_drop().ok();
//!
//! for event in session.drain_events() {
//!     if let GameEvent::GameOver { score } = event {
//!         println!("Game over! Score: {score}");
//!     }
//! }
//! ```

pub use self::{
    game_field::*, game_session::*, game_stats::*, piece_generator::*, snapshot::*,
};

pub mod progression;

mod game_field;
mod game_session;
mod game_stats;
mod piece_generator;
mod snapshot;
