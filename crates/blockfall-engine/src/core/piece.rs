use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{
    BOARD_WIDTH,
    board::{Board, Cell},
    shape::{MAX_SHAPE_SIZE, Shape},
};

/// Number of occupied cells in every piece.
pub const PIECE_CELLS: usize = 4;

/// A falling piece: a shape in some orientation at some board position.
///
/// Pieces are values. Movement and rotation return new candidate pieces and
/// leave `self` untouched, so "try, check, commit or discard" is just a matter
/// of deciding whether to keep the returned value.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind};
///
/// let board = Board::new();
/// let piece = Piece::new(PieceKind::T);
///
/// let candidate = piece.right().rotated_clockwise();
/// if !board.is_colliding(&candidate) {
///     // commit the candidate
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    shape: Shape,
    kind: PieceKind,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@x,y" (e.g., "S#1@4,18")
        let s = format!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.position.x,
            self.position.y
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let (kind_str, rest) = s.split_once('#').ok_or_else(|| {
            serde::de::Error::custom(format!("expected format 'kind#rotation@x,y', got '{s}'"))
        })?;
        let (rotation_str, position_str) = rest.split_once('@').ok_or_else(|| {
            serde::de::Error::custom(format!(
                "missing '@' in format 'kind#rotation@x,y', got '{s}'"
            ))
        })?;
        let (x_str, y_str) = position_str.split_once(',').ok_or_else(|| {
            serde::de::Error::custom(format!(
                "missing ',' in format 'kind#rotation@x,y', got '{s}'"
            ))
        })?;

        let mut chars = kind_str.chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid piece kind: {c}")))?,
            _ => {
                return Err(serde::de::Error::custom(format!(
                    "piece kind must be single character, got '{kind_str}'"
                )));
            }
        };

        let rotation_num = rotation_str.parse::<u8>().map_err(|e| {
            serde::de::Error::custom(format!("invalid rotation: {rotation_str} ({e})"))
        })?;
        if rotation_num > 3 {
            return Err(serde::de::Error::custom(format!(
                "rotation must be 0-3, got {rotation_num}"
            )));
        }

        let x = x_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid x position: {x_str} ({e})")))?;
        let y = y_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid y position: {y_str} ({e})")))?;

        let mut piece = Piece::new(kind);
        for _ in 0..rotation_num {
            piece = piece.rotated_clockwise();
        }
        piece.position = PiecePosition::new(x, y);
        Ok(piece)
    }
}

impl Piece {
    /// Creates a piece of the given kind at its spawn position.
    ///
    /// The shape's bounding box is centered horizontally and top-aligned at
    /// row 0.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let shape = kind.spawn_shape();
        Self {
            position: PiecePosition::spawn(shape.size()),
            rotation: PieceRotation::default(),
            shape,
            kind,
        }
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the absolute board coordinates of the occupied cells.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn cells(&self) -> ArrayVec<(i32, i32), PIECE_CELLS> {
        self.shape
            .occupied_offsets()
            .map(|(dx, dy)| (self.position.x + dx as i32, self.position.y + dy as i32))
            .collect()
    }

    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: PiecePosition::new(self.position.x + dx, self.position.y + dy),
            ..*self
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.shifted(1, 0)
    }

    #[must_use]
    pub fn up(&self) -> Self {
        self.shifted(0, -1)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.shifted(0, 1)
    }

    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            shape: self.shape.rotated_clockwise(),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_counter_clockwise(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_left(),
            shape: self.shape.rotated_counter_clockwise(),
            ..*self
        }
    }

    /// Returns the piece moved straight down as far as it can go.
    ///
    /// This is the hard drop rest position.
    #[must_use]
    pub fn simulate_drop_position(&self, board: &Board) -> Self {
        let mut dropped = *self;
        loop {
            let next = dropped.down();
            if board.is_colliding(&next) {
                return dropped;
            }
            dropped = next;
        }
    }
}

/// Position of a piece's bounding box top-left corner on the board.
///
/// Coordinates are signed: blank columns or rows of a shape may hang past the
/// board edges while every occupied cell is still in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Spawn position for a shape with the given bounding box size.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn spawn(shape_size: usize) -> Self {
        Self::new((BOARD_WIDTH / 2 - shape_size / 2) as i32, 0)
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }
}

/// Rotation state of a piece, in clockwise quarter turns from spawn.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub fn rotated_right(self) -> Self {
        PieceRotation((self.0 + 1) % 4)
    }

    #[must_use]
    pub fn rotated_left(self) -> Self {
        PieceRotation((self.0 + 3) % 4)
    }

    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }
}

/// The seven tetromino kinds.
///
/// The discriminant is the piece id stored in board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// J-piece.
    J = 2,
    /// L-piece.
    L = 3,
    /// O-piece.
    O = 4,
    /// S-piece.
    S = 5,
    /// T-piece.
    T = 6,
    /// Z-piece.
    Z = 7,
}

/// Uniform, independent draw over all seven kinds.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All kinds, in id order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the piece id (`1..=7`).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Returns a fresh copy of the spawn orientation shape.
    #[must_use]
    pub const fn spawn_shape(self) -> Shape {
        SPAWN_SHAPES[self as usize - 1]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

const SPAWN_SHAPES: [Shape; PieceKind::LEN] = {
    use Cell::Empty as E;
    const I: Cell = Cell::Piece(PieceKind::I);
    const J: Cell = Cell::Piece(PieceKind::J);
    const L: Cell = Cell::Piece(PieceKind::L);
    const O: Cell = Cell::Piece(PieceKind::O);
    const S: Cell = Cell::Piece(PieceKind::S);
    const T: Cell = Cell::Piece(PieceKind::T);
    const Z: Cell = Cell::Piece(PieceKind::Z);
    const EEEE: [Cell; MAX_SHAPE_SIZE] = [E; MAX_SHAPE_SIZE];
    [
        Shape::new(4, [EEEE, [I, I, I, I], EEEE, EEEE]),
        Shape::new(3, [[J, E, E, E], [J, J, J, E], EEEE, EEEE]),
        Shape::new(3, [[E, E, L, E], [L, L, L, E], EEEE, EEEE]),
        Shape::new(2, [[O, O, E, E], [O, O, E, E], EEEE, EEEE]),
        Shape::new(3, [[E, S, S, E], [S, S, E, E], EEEE, EEEE]),
        Shape::new(3, [[E, T, E, E], [T, T, T, E], EEEE, EEEE]),
        Shape::new(3, [[Z, Z, E, E], [E, Z, Z, E], EEEE, EEEE]),
    ]
};
