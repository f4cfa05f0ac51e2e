use arrayvec::ArrayVec;

use super::board::Cell;

/// Largest bounding box side of any piece shape.
pub const MAX_SHAPE_SIZE: usize = 4;

/// A square matrix of cells describing one orientation of a piece.
///
/// The matrix is `size × size` (2 for O, 4 for I, 3 for the rest) and is stored
/// in an owned fixed-size buffer, so every piece carries its own copy and
/// rotating one piece never affects another.
///
/// # Rotation
///
/// Clockwise rotation is "transpose, then reverse each row". The inverse,
/// counter-clockwise rotation is "reverse each row, then transpose". Both are
/// pure and return a new shape.
///
/// ```
/// use blockfall_engine::PieceKind;
///
/// let shape = PieceKind::T.spawn_shape();
/// let rotated = shape.rotated_clockwise();
///
/// assert_ne!(rotated, shape);
/// assert_eq!(rotated.rotated_counter_clockwise(), shape);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: usize,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from the top-left `size × size` corner of `cells`.
    ///
    /// Cells outside that corner are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or larger than [`MAX_SHAPE_SIZE`].
    #[must_use]
    pub const fn new(size: usize, cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        assert!(size > 0 && size <= MAX_SHAPE_SIZE);
        let mut masked = [[Cell::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                masked[y][x] = cells[y][x];
                x += 1;
            }
            y += 1;
        }
        Self {
            size,
            cells: masked,
        }
    }

    /// Side length of the bounding box.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `(x, y)` within the bounding box, or `None` outside it.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.size && y < self.size {
            Some(self.cells[y][x])
        } else {
            None
        }
    }

    /// Returns an iterator over the rows of the bounding box, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells[..self.size].iter().map(|row| &row[..self.size])
    }

    /// Returns the `(dx, dy)` offsets of all occupied cells, row by row.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(move |(dx, _)| (dx, dy))
        })
    }

    /// Returns the bounding box as numeric cell values.
    #[must_use]
    pub fn to_values(&self) -> ArrayVec<ArrayVec<u8, MAX_SHAPE_SIZE>, MAX_SHAPE_SIZE> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.value()).collect())
            .collect()
    }

    #[must_use]
    pub const fn transposed(&self) -> Self {
        let mut cells = [[Cell::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < self.size {
            let mut x = 0;
            while x < self.size {
                cells[y][x] = self.cells[x][y];
                x += 1;
            }
            y += 1;
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Reverses every row of the bounding box (horizontal mirror).
    #[must_use]
    pub const fn mirrored(&self) -> Self {
        let mut cells = [[Cell::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < self.size {
            let mut x = 0;
            while x < self.size {
                cells[y][x] = self.cells[y][self.size - 1 - x];
                x += 1;
            }
            y += 1;
        }
        Self {
            size: self.size,
            cells,
        }
    }

    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        self.transposed().mirrored()
    }

    #[must_use]
    pub const fn rotated_counter_clockwise(&self) -> Self {
        self.mirrored().transposed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceKind;

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let shape = kind.spawn_shape();
            let mut rotated = shape;
            for _ in 0..4 {
                rotated = rotated.rotated_clockwise();
            }
            assert_eq!(rotated, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_counter_clockwise_undoes_clockwise() {
        for kind in PieceKind::ALL {
            let mut shape = kind.spawn_shape();
            for _ in 0..4 {
                assert_eq!(shape.rotated_clockwise().rotated_counter_clockwise(), shape);
                assert_eq!(shape.rotated_counter_clockwise().rotated_clockwise(), shape);
                shape = shape.rotated_clockwise();
            }
        }
    }

    #[test]
    fn test_rotation_preserves_cell_count_and_kind() {
        for kind in PieceKind::ALL {
            let mut shape = kind.spawn_shape();
            for _ in 0..4 {
                assert_eq!(shape.occupied_offsets().count(), 4);
                assert!(
                    shape
                        .rows()
                        .flatten()
                        .all(|&cell| cell.is_empty() || cell == Cell::Piece(kind))
                );
                shape = shape.rotated_clockwise();
            }
        }
    }

    #[test]
    fn test_t_rotation_matrix() {
        let rotated = PieceKind::T.spawn_shape().rotated_clockwise();
        let expected: [&[u8]; 3] = [&[0, 6, 0], &[0, 6, 6], &[0, 6, 0]];
        let values = rotated.to_values();
        for (row, expected) in values.iter().zip(expected) {
            assert_eq!(row.as_slice(), expected);
        }
    }

    #[test]
    fn test_i_rotation_matrix() {
        let rotated = PieceKind::I.spawn_shape().rotated_clockwise();
        let offsets: Vec<_> = rotated.occupied_offsets().collect();
        assert_eq!(offsets, [(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let shape = PieceKind::O.spawn_shape();
        assert_eq!(shape.rotated_clockwise(), shape);
    }

    #[test]
    fn test_cells_outside_size_are_masked() {
        let i = Cell::Piece(PieceKind::I);
        let shape = Shape::new(2, [[i; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]);
        assert_eq!(shape.occupied_offsets().count(), 4);
        assert_eq!(shape.cell(2, 0), None);
        assert_eq!(shape.rows().count(), 2);
    }
}
