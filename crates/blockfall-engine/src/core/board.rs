use serde::{Deserialize, Serialize};

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{Piece, PieceKind},
};

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const WIDTH_I32: i32 = BOARD_WIDTH as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const HEIGHT_I32: i32 = BOARD_HEIGHT as i32;

/// A single cell of the board or of a piece shape.
///
/// The numeric form used by consumers is `0` for an empty cell and the piece
/// id (`1..=7`) for an occupied one, see [`Cell::value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a block of the given piece kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the numeric cell value in `0..=7`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::{Cell, PieceKind};
    ///
    /// assert_eq!(Cell::Empty.value(), 0);
    /// assert_eq!(Cell::Piece(PieceKind::I).value(), 1);
    /// assert_eq!(Cell::Piece(PieceKind::Z).value(), 7);
    /// ```
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Piece(kind) => kind.id(),
        }
    }

    /// Parses a numeric cell value, returning `None` outside `0..=7`.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        if value == 0 {
            return Some(Cell::Empty);
        }
        match PieceKind::from_id(value) {
            Some(kind) => Some(Cell::Piece(kind)),
            None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoardRow {
    cells: [Cell; BOARD_WIDTH],
}

impl BoardRow {
    const EMPTY: Self = Self {
        cells: [Cell::Empty; BOARD_WIDTH],
    };

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }
}

/// The playfield: a fixed 10×20 grid of [`Cell`]s.
///
/// The board only knows about locked blocks. The falling piece lives in the
/// game field and is written into the board with [`Board::fill_piece`] once it
/// locks.
///
/// # Collision Rules
///
/// A piece collides when any of its occupied cells
///
/// - lies left of column 0 or right of the last column,
/// - lies on or below row [`Board::HEIGHT`], or
/// - overlaps a non-empty board cell.
///
/// Cells above the board (`y < 0`) are open space and never collide, so
/// pieces whose shape has blank leading rows can spawn at `y = 0`.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::new();
/// let piece = Piece::new(PieceKind::T).simulate_drop_position(&board);
/// board.fill_piece(&piece);
///
/// assert_eq!(board.clear_lines(), 0);
/// assert!(!board.is_row_filled(Board::HEIGHT - 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; BOARD_HEIGHT],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the cell at `(x, y)`, or `None` when the coordinate is off the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.cells.get(x).copied()
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the board.
    pub fn fill_cell_at(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y].cells[x] = cell;
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.rows.iter().map(|row| &row.cells)
    }

    /// Returns `true` if every cell of row `y` is occupied.
    #[must_use]
    pub fn is_row_filled(&self, y: usize) -> bool {
        self.rows.get(y).is_some_and(BoardRow::is_filled)
    }

    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece.cells().into_iter().any(|(x, y)| self.is_blocked(x, y))
    }

    fn is_blocked(&self, x: i32, y: i32) -> bool {
        if !(0..WIDTH_I32).contains(&x) || y >= HEIGHT_I32 {
            return true;
        }
        // Above the board is open space.
        y >= 0 && self.cell(x, y).is_some_and(|cell| !cell.is_empty())
    }

    /// Writes the piece's blocks into the board.
    ///
    /// Called when a piece locks. The piece must be at a non-colliding
    /// position; cells above the board are discarded.
    pub fn fill_piece(&mut self, piece: &Piece) {
        debug_assert!(!self.is_colliding(piece), "locking a colliding piece");
        let cell = Cell::Piece(piece.kind());
        for (x, y) in piece.cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(target) = self.rows.get_mut(y).and_then(|row| row.cells.get_mut(x)) {
                *target = cell;
            }
        }
    }

    /// Clears filled rows and returns the number of rows cleared.
    ///
    /// Remaining rows keep their relative order and shift down; empty rows
    /// are inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(BoardRow::EMPTY);
        count
    }

    /// Returns the grid as numeric cell values, row-major.
    #[must_use]
    pub fn to_values(&self) -> [[u8; BOARD_WIDTH]; BOARD_HEIGHT] {
        let mut values = [[0; BOARD_WIDTH]; BOARD_HEIGHT];
        for (dst, row) in values.iter_mut().zip(&self.rows) {
            for (value, cell) in dst.iter_mut().zip(row.cells) {
                *value = cell.value();
            }
        }
        values
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "0000000000/0000000000/..." (one digit per cell, top row first)
        let mut s = String::with_capacity(BOARD_HEIGHT * (BOARD_WIDTH + 1));
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                s.push('/');
            }
            for cell in row.cells {
                s.push(char::from(b'0' + cell.value()));
            }
        }
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {BOARD_HEIGHT} '/'-separated rows, got {}",
                parts.len()
            )));
        }

        let mut board = Board::EMPTY;
        for (y, part) in parts.iter().enumerate() {
            if part.chars().count() != BOARD_WIDTH {
                return Err(serde::de::Error::custom(format!(
                    "row {y} must have {BOARD_WIDTH} cells, got '{part}'"
                )));
            }
            for (x, ch) in part.chars().enumerate() {
                let cell = ch
                    .to_digit(10)
                    .and_then(|d| u8::try_from(d).ok())
                    .and_then(Cell::from_value)
                    .ok_or_else(|| {
                        serde::de::Error::custom(format!("invalid cell '{ch}' at ({x}, {y})"))
                    })?;
                board.rows[y].cells[x] = cell;
            }
        }
        Ok(board)
    }
}
