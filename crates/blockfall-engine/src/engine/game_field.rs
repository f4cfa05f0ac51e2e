use crate::{
    CompletePieceDropError, PieceCollisionError,
    core::{board::Board, piece::Piece},
};

use super::piece_generator::{PieceGenerator, PieceSeed};

/// Single-turn game state: the board, the falling piece and the queued next
/// piece.
///
/// The field keeps one invariant: the falling piece never collides with the
/// board, except right after a lock whose replacement piece topped out (see
/// [`GameField::complete_piece_drop`]).
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Piece,
    next_piece: Piece,
    generator: PieceGenerator,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    #[must_use]
    pub fn with_generator(mut generator: PieceGenerator) -> Self {
        let falling_piece = generator.spawn();
        let next_piece = generator.spawn();
        Self {
            board: Board::EMPTY,
            falling_piece,
            next_piece,
            generator,
        }
    }

    /// Empties the board and draws fresh falling and next pieces.
    ///
    /// The generator keeps its state, so a seeded field stays reproducible
    /// across resets.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.falling_piece = self.generator.spawn();
        self.next_piece = self.generator.spawn();
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    #[must_use]
    pub fn simulate_drop_position(&self) -> Piece {
        self.falling_piece.simulate_drop_position(&self.board)
    }

    /// Locks the falling piece where it is and brings in the next one.
    ///
    /// Returns the number of cleared lines together with an error if the new
    /// falling piece collides at its spawn position (top-out).
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), CompletePieceDropError>) {
        self.board.fill_piece(&self.falling_piece);
        let cleared_lines = self.board.clear_lines();

        self.falling_piece = self.next_piece;
        self.next_piece = self.generator.spawn();
        if self.board.is_colliding(&self.falling_piece) {
            return (
                cleared_lines,
                Err(CompletePieceDropError::NewPieceCollision),
            );
        }

        (cleared_lines, Ok(()))
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_next_piece(&mut self, piece: Piece) {
        self.next_piece = piece;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, PieceKind};

    fn field() -> GameField {
        GameField::with_seed(PieceSeed::from_u128(0xb10c_fa11))
    }

    #[test]
    fn test_new_field() {
        let field = field();
        assert!(!field.board().is_colliding(field.falling_piece()));
        assert_eq!(field.board(), &Board::EMPTY);
    }

    #[test]
    fn test_set_falling_piece_rejects_collision() {
        let mut field = field();
        let piece = *field.falling_piece();

        let mut far_left = piece;
        for _ in 0..10 {
            far_left = far_left.left();
        }
        assert_eq!(field.set_falling_piece(far_left), Err(PieceCollisionError));
        assert_eq!(field.falling_piece(), &piece);

        assert_eq!(field.set_falling_piece(piece.down()), Ok(()));
        assert_eq!(field.falling_piece(), &piece.down());
    }

    #[test]
    fn test_complete_piece_drop_promotes_next_piece() {
        let mut field = field();
        field.set_falling_piece(Piece::new(PieceKind::O)).unwrap();
        let dropped = field.simulate_drop_position();
        field.set_falling_piece(dropped).unwrap();
        let next = *field.next_piece();

        let (cleared, result) = field.complete_piece_drop();
        assert_eq!(cleared, 0);
        assert_eq!(result, Ok(()));
        assert_eq!(field.falling_piece(), &next);
        assert_eq!(field.board().cell(4, 19), Some(Cell::Piece(PieceKind::O)));
        assert_eq!(field.board().cell(5, 18), Some(Cell::Piece(PieceKind::O)));
    }

    #[test]
    fn test_complete_piece_drop_reports_top_out() {
        let mut field = field();
        for x in 3..7 {
            field.board_mut().fill_cell_at(x, 0, Cell::Piece(PieceKind::Z));
            field.board_mut().fill_cell_at(x, 1, Cell::Piece(PieceKind::Z));
        }
        let parked = Piece::new(PieceKind::O).shifted(-4, 10);
        field.set_falling_piece(parked).unwrap();

        let (cleared, result) = field.complete_piece_drop();
        assert_eq!(cleared, 0);
        assert_eq!(result, Err(CompletePieceDropError::NewPieceCollision));
    }

    #[test]
    fn test_reset() {
        let mut field = field();
        field.board_mut().fill_cell_at(0, 19, Cell::Piece(PieceKind::I));
        field.set_next_piece(Piece::new(PieceKind::T));
        field.reset();
        assert_eq!(field.board(), &Board::EMPTY);
        assert!(!field.board().is_colliding(field.falling_piece()));
    }
}
