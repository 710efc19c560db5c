use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{board::Board, coord};

/// Column/row offsets tried, in order, after a rotation.
///
/// The first offset for which the rotated piece is valid wins. `(0, -1)`
/// lifts the piece one row towards the spawn edge.
pub const KICK_OFFSETS: [(i32, i32); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

/// A falling piece (tetromino) with its current rotation and origin.
///
/// Pieces are immutable values: movement and rotation return new `Piece`
/// instances and never touch the original.
///
/// # Coordinate System
///
/// - The origin is the top-left corner of the piece's shape matrix
/// - Columns increase rightward, rows increase downward
/// - Rows above the visible board are negative
///
/// # Example
///
/// ```
/// use quadris_engine::{Board, Piece, PieceKind};
///
/// let board = Board::empty(10, 20);
/// let piece = Piece::spawn(PieceKind::T, board.width());
/// assert!(board.is_valid(&piece));
///
/// let moved = piece.moved(1, 0);
/// assert_eq!(moved.position().col(), piece.position().col() + 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: ShapeMatrix,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece of `kind` in its base rotation, horizontally centered
    /// on a board `board_width` columns wide, at row 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = kind.base_shape();
        let col = coord(board_width / 2) - coord(shape.size() / 2);
        Self {
            kind,
            shape,
            position: PiecePosition::new(col, 0),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    #[must_use]
    pub fn shape(&self) -> ShapeMatrix {
        self.shape
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns the absolute `(row, col)` of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let PiecePosition { col, row } = self.position;
        self.shape
            .filled_cells()
            .map(move |(dy, dx)| (row + coord(dy), col + coord(dx)))
    }

    /// Returns the piece translated by `dx` columns and `dy` rows.
    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.shifted(dx, dy),
            ..*self
        }
    }

    /// Returns the piece rotated 90° clockwise around the same origin.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    /// Rotates clockwise and resolves wall kicks against `board`.
    ///
    /// Tries every entry of [`KICK_OFFSETS`] in order and returns the first
    /// valid placement, or `None` when the rotation has to be rejected.
    #[must_use]
    pub fn kicked_rotation(&self, board: &Board) -> Option<Self> {
        let rotated = self.rotated();
        KICK_OFFSETS
            .iter()
            .map(|&(dx, dy)| rotated.moved(dx, dy))
            .find(|piece| board.is_valid(piece))
    }

    /// Returns the lowest valid position straight below this piece together
    /// with the number of rows descended to reach it.
    #[must_use]
    pub fn drop_position(&self, board: &Board) -> (Self, usize) {
        let mut dropped = *self;
        let mut rows = 0;
        loop {
            let candidate = dropped.moved(0, 1);
            if !board.is_valid(&candidate) {
                break;
            }
            dropped = candidate;
            rows += 1;
        }
        (dropped, rows)
    }
}

/// Origin of a piece's shape matrix on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    col: i32,
    row: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn col(self) -> i32 {
        self.col
    }

    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn shifted(self, dx: i32, dy: i32) -> Self {
        Self::new(self.col + dx, self.row + dy)
    }
}

/// Square boolean grid marking the filled cells of a piece.
///
/// The I-piece uses a 4×4 grid, the O-piece 2×2 and every other piece 3×3.
/// Cells outside `size × size` are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: u8,
    cells: [[bool; 4]; 4],
}

impl ShapeMatrix {
    const fn new(size: u8, cells: [[bool; 4]; 4]) -> Self {
        assert!(size as usize <= 4);
        Self { size, cells }
    }

    /// Side length of the matrix.
    #[must_use]
    pub const fn size(self) -> usize {
        self.size as usize
    }

    #[must_use]
    pub const fn is_filled(self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.cells[row][col]
    }

    /// Rotates the matrix 90° clockwise: transpose, then reverse every row.
    #[must_use]
    pub const fn rotated(self) -> Self {
        let size = self.size();
        let mut cells = [[false; 4]; 4];
        let mut row = 0;
        while row < size {
            let mut col = 0;
            while col < size {
                cells[row][col] = self.cells[size - 1 - col][row];
                col += 1;
            }
            row += 1;
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Returns the `(row, col)` of every filled cell, top-to-bottom.
    pub fn filled_cells(self) -> impl Iterator<Item = (usize, usize)> {
        let size = self.size();
        (0..size).flat_map(move |row| {
            (0..size)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (row, col))
        })
    }
}

/// Color tag carried by locked cells.
///
/// Every piece kind owns exactly one color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    #[display("cyan")]
    Cyan,
    #[display("yellow")]
    Yellow,
    #[display("purple")]
    Purple,
    #[display("green")]
    Green,
    #[display("red")]
    Red,
    #[display("blue")]
    Blue,
    #[display("orange")]
    Orange,
}

impl PieceColor {
    /// Returns the piece kind this color belongs to.
    #[must_use]
    pub const fn kind(self) -> PieceKind {
        match self {
            PieceColor::Cyan => PieceKind::I,
            PieceColor::Yellow => PieceKind::O,
            PieceColor::Purple => PieceKind::T,
            PieceColor::Green => PieceKind::S,
            PieceColor::Red => PieceKind::Z,
            PieceColor::Blue => PieceKind::J,
            PieceColor::Orange => PieceKind::L,
        }
    }
}

/// Enum representing the type of piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

/// Uniform, independent selection: every draw picks each kind with
/// probability 1/7 regardless of history.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// Every kind, in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position of this kind in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Shape matrix in spawn orientation.
    #[must_use]
    pub const fn base_shape(self) -> ShapeMatrix {
        BASE_SHAPES[self.index()]
    }

    #[must_use]
    pub const fn color(self) -> PieceColor {
        match self {
            PieceKind::I => PieceColor::Cyan,
            PieceKind::O => PieceColor::Yellow,
            PieceKind::T => PieceColor::Purple,
            PieceKind::S => PieceColor::Green,
            PieceKind::Z => PieceColor::Red,
            PieceKind::J => PieceColor::Blue,
            PieceKind::L => PieceColor::Orange,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

const BASE_SHAPES: [ShapeMatrix; PieceKind::LEN] = {
    const X: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        ShapeMatrix::new(4, [EEEE, [X, X, X, X], EEEE, EEEE]),
        // O-piece
        ShapeMatrix::new(2, [[X, X, E, E], [X, X, E, E], EEEE, EEEE]),
        // T-piece
        ShapeMatrix::new(3, [[E, X, E, E], [X, X, X, E], EEEE, EEEE]),
        // S-piece
        ShapeMatrix::new(3, [[E, X, X, E], [X, X, E, E], EEEE, EEEE]),
        // Z-piece
        ShapeMatrix::new(3, [[X, X, E, E], [E, X, X, E], EEEE, EEEE]),
        // J-piece
        ShapeMatrix::new(3, [[X, E, E, E], [X, X, X, E], EEEE, EEEE]),
        // L-piece
        ShapeMatrix::new(3, [[E, E, X, E], [X, X, X, E], EEEE, EEEE]),
    ]
};
