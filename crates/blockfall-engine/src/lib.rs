//! Falling-block puzzle engine.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - board, shapes and pieces (pure data plus collision rules)
//! - [`engine`] - piece generation, the game field, the session state machine,
//!   scoring and leveling
//!
//! Rendering, input mapping and the frame loop live outside this crate. They
//! drive a [`GameSession`] through its commands and read its state back.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding with the board")]
pub struct PieceCollisionError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum ActionError {
    #[display("piece colliding with the board")]
    PieceCollision(PieceCollisionError),
    #[display("game is over")]
    GameOver,
}

impl From<PieceCollisionError> for ActionError {
    fn from(err: PieceCollisionError) -> Self {
        ActionError::PieceCollision(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CompletePieceDropError {
    #[display("new piece colliding at spawn")]
    NewPieceCollision,
}
