use std::{collections::VecDeque, time::Duration};

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::{
    ActionError,
    core::{board::Board, piece::Piece},
};

use super::{GameSnapshot, GameStats, game_field::GameField, piece_generator::PieceSeed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Maximum number of undrained events a session keeps.
///
/// When full, the oldest event is dropped. [`GameEvent::GameOver`] is always
/// the last event of a game, so it is never the one dropped.
pub const MAX_PENDING_EVENTS: usize = 64;

/// Notifications queued by a [`GameSession`] for its consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// The falling piece was merged into the board.
    PieceLocked { cleared_lines: usize },
    /// The replacement piece collided at spawn. Emitted once per game.
    GameOver { score: u64 },
}

/// The game state machine.
///
/// A session owns the field, the statistics and the gravity timer. Input
/// handlers call the `try_*` and drop commands; the frame loop calls
/// [`GameSession::advance_time`]. Rejected moves leave the state untouched.
///
/// Once the game is over, every command returns [`ActionError::GameOver`]
/// and nothing changes until [`GameSession::restart`].
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
    drop_timer: Duration,
    events: VecDeque<GameEvent>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_field(GameField::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_field(GameField::with_seed(seed))
    }

    fn with_field(field: GameField) -> Self {
        Self {
            field,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            drop_timer: Duration::ZERO,
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
        }
    }

    /// Starts a new game: empty board, fresh pieces, level 1.
    ///
    /// Pending events are discarded.
    pub fn restart(&mut self) {
        info!(previous_score = self.stats.score(), "restarting game");
        self.field.reset();
        self.stats = GameStats::new();
        self.session_state = SessionState::Playing;
        self.drop_timer = Duration::ZERO;
        self.events.clear();
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        self.field.next_piece()
    }

    #[must_use]
    pub fn simulate_drop_position(&self) -> Piece {
        self.field.simulate_drop_position()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.stats.drop_interval()
    }

    /// Time accumulated towards the next gravity step.
    #[must_use]
    pub fn drop_timer(&self) -> Duration {
        self.drop_timer
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.field.board().clone(),
            falling_piece: *self.field.falling_piece(),
            next_piece: *self.field.next_piece(),
            stats: self.stats.clone(),
            drop_interval_ms: u64::try_from(self.drop_interval().as_millis())
                .unwrap_or(u64::MAX),
            game_over: self.is_game_over(),
        }
    }

    /// Removes and returns the queued events, oldest first.
    ///
    /// Consumers that never drain lose all but the latest
    /// [`MAX_PENDING_EVENTS`] events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn try_move_left(&mut self) -> Result<(), ActionError> {
        self.ensure_playing()?;
        let piece = self.field.falling_piece().left();
        self.field.set_falling_piece(piece)?;
        Ok(())
    }

    pub fn try_move_right(&mut self) -> Result<(), ActionError> {
        self.ensure_playing()?;
        let piece = self.field.falling_piece().right();
        self.field.set_falling_piece(piece)?;
        Ok(())
    }

    /// Rotates the falling piece clockwise.
    ///
    /// There are no wall kicks: if the rotated piece collides, the rotation
    /// is discarded and the piece keeps its previous shape and position.
    pub fn try_rotate(&mut self) -> Result<(), ActionError> {
        self.ensure_playing()?;
        let piece = self.field.falling_piece().rotated_clockwise();
        self.field
            .set_falling_piece(piece)
            .inspect_err(|_| trace!(kind = ?piece.kind(), "rotation blocked"))?;
        Ok(())
    }

    /// Moves the falling piece down one row, locking it if it cannot move.
    ///
    /// Resets the gravity timer.
    pub fn soft_drop(&mut self) -> Result<(), ActionError> {
        self.ensure_playing()?;
        self.apply_gravity();
        Ok(())
    }

    /// Drops the falling piece to its rest position and locks it.
    ///
    /// Resets the gravity timer.
    pub fn hard_drop(&mut self) -> Result<(), ActionError> {
        self.ensure_playing()?;
        self.drop_timer = Duration::ZERO;
        let dropped = self.field.simulate_drop_position();
        self.field.set_falling_piece(dropped)?;
        self.lock_falling_piece();
        Ok(())
    }

    /// Advances the gravity timer by `delta`.
    ///
    /// Once the accumulated time exceeds the current drop interval, the
    /// falling piece moves down one row (or locks) and the timer restarts.
    /// Ignored after game over.
    pub fn advance_time(&mut self, delta: Duration) {
        if self.is_game_over() {
            return;
        }
        self.drop_timer = self.drop_timer.saturating_add(delta);
        if self.drop_timer > self.drop_interval() {
            self.apply_gravity();
        }
    }

    fn ensure_playing(&self) -> Result<(), ActionError> {
        if self.is_game_over() {
            return Err(ActionError::GameOver);
        }
        Ok(())
    }

    fn apply_gravity(&mut self) {
        self.drop_timer = Duration::ZERO;
        let piece = self.field.falling_piece().down();
        if self.field.set_falling_piece(piece).is_err() {
            self.lock_falling_piece();
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn lock_falling_piece(&mut self) {
        let (cleared_lines, result) = self.field.complete_piece_drop();
        self.stats.complete_piece_drop(cleared_lines);
        debug!(
            cleared_lines,
            score = self.stats.score(),
            level = self.stats.level(),
            "piece locked"
        );
        self.push_event(GameEvent::PieceLocked { cleared_lines });

        if result.is_err() {
            let score = self.stats.score();
            info!(score, "game over");
            self.session_state = SessionState::GameOver;
            self.push_event(GameEvent::GameOver { score });
        }
    }
}
