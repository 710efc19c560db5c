use std::{fmt, iter, str::FromStr};

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceColor, PieceKind};

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    /// Nothing locked here.
    #[default]
    Empty,
    /// Occupied by a locked piece of the given color.
    Filled(PieceColor),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }

    /// Text form used by [`Board`]'s `Display`/`FromStr` round trip.
    ///
    /// Empty cells are `.`, filled cells use the letter of the piece that
    /// owns the color.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(color) => color.kind().as_char(),
        }
    }
}

/// Fixed-size grid of locked cells.
///
/// Rows are ordered top-to-bottom; row 0 is the spawn edge. The active piece
/// is never stored here: it only enters the grid through [`Board::place`]
/// when it locks.
///
/// Every operation returns a new board, leaving `self` untouched.
///
/// # Example
///
/// ```
/// use quadris_engine::{Board, Piece, PieceKind};
///
/// let board = Board::empty(10, 20);
/// let (landed, _) = Piece::spawn(PieceKind::I, 10).drop_position(&board);
/// let (board, cleared) = board.place(&landed).clear_full_rows();
///
/// assert_eq!(cleared, 0);
/// assert!(board.cell(19, 3).is_some_and(|cell| cell.is_filled()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

/// Unchecked serialized form of [`Board`].
#[derive(Deserialize)]
struct BoardData {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl TryFrom<BoardData> for Board {
    type Error = ParseBoardError;

    fn try_from(data: BoardData) -> Result<Self, Self::Error> {
        Self::from_rows(data.width, data.rows)
    }
}

impl Board {
    /// Creates a `width × height` board of empty cells.
    #[must_use]
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns an iterator over the rows, top-to-bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Returns a copy of the board with a single cell replaced.
    ///
    /// Out-of-range coordinates leave the board unchanged.
    #[must_use]
    pub fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Self {
        let mut board = self.clone();
        if let Some(slot) = board.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
        board
    }

    /// Checks whether `piece` fits on the board.
    ///
    /// A piece is invalid when any filled cell lands outside the column range,
    /// below the last row, or on an occupied cell. Cells above the top edge
    /// (negative rows) are column-checked only.
    #[must_use]
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece.cells().all(|(row, col)| {
            let Ok(col) = usize::try_from(col) else {
                return false;
            };
            if col >= self.width {
                return false;
            }
            let Ok(row) = usize::try_from(row) else {
                return true;
            };
            self.cell(row, col).is_some_and(Cell::is_empty)
        })
    }

    /// Writes `piece`'s filled cells into a copy of the board using the
    /// piece's color.
    ///
    /// Cells above the top edge are skipped.
    #[must_use]
    pub fn place(&self, piece: &Piece) -> Self {
        let mut board = self.clone();
        let cell = Cell::Filled(piece.color());
        for (row, col) in piece.cells() {
            let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
                continue;
            };
            if let Some(slot) = board.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                *slot = cell;
            }
        }
        board
    }

    /// Removes every fully occupied row and pads the top with empty rows.
    ///
    /// Surviving rows keep their relative order, so everything above a
    /// cleared row shifts down by the number of cleared rows below it.
    ///
    /// # Returns
    ///
    /// The new board and the number of rows removed.
    #[must_use]
    pub fn clear_full_rows(&self) -> (Self, usize) {
        let kept: Vec<_> = self
            .rows
            .iter()
            .filter(|row| !row.iter().all(|cell| cell.is_filled()))
            .cloned()
            .collect();
        let cleared = self.height() - kept.len();
        let rows = iter::repeat_n(vec![Cell::Empty; self.width], cleared)
            .chain(kept)
            .collect();
        let board = Self {
            width: self.width,
            rows,
        };
        (board, cleared)
    }
}

impl Board {
    /// Builds a board after checking that every row is `width` cells wide.
    fn from_rows(width: usize, rows: Vec<Vec<Cell>>) -> Result<Self, ParseBoardError> {
        if width == 0 || rows.is_empty() {
            return Err(ParseBoardError::Empty);
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ParseBoardError::RaggedRow {
                row,
                expected: width,
                found: cells.len(),
            });
        }
        Ok(Self { width, rows })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board has no rows")]
    Empty,
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("invalid cell {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },
}

/// Parses the text form produced by `Display`: one line per row, `.` for
/// empty cells and a piece letter (`IOTSZJL`) for filled ones.
///
/// Blank lines and surrounding whitespace are ignored.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for line in s.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let row_index = rows.len();
            let row = line
                .chars()
                .enumerate()
                .map(|(col, ch)| match ch {
                    '.' => Ok(Cell::Empty),
                    _ => PieceKind::from_char(ch)
                        .map(|kind| Cell::Filled(kind.color()))
                        .ok_or(ParseBoardError::InvalidCell {
                            row: row_index,
                            col,
                            ch,
                        }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        let width = rows.first().ok_or(ParseBoardError::Empty)?.len();
        Self::from_rows(width, rows)
    }
}
