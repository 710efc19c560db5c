use super::{
    board::{Board, Cell},
    piece::{Piece, PieceColor},
};

/// A cell as a rendering collaborator should draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderCell {
    #[default]
    Empty,
    /// Landing preview of the falling piece.
    Ghost,
    /// Part of the falling piece.
    Falling(PieceColor),
    /// Part of a locked piece.
    Locked(PieceColor),
}

impl RenderCell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == RenderCell::Empty
    }
}

/// Board snapshot with the falling piece (and optionally its ghost) overlaid.
///
/// The board itself never contains the falling piece; this grid is built on
/// demand for display purposes only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderGrid {
    rows: Vec<Vec<RenderCell>>,
}

impl RenderGrid {
    pub(crate) fn new(board: &Board, falling: Option<&Piece>, ghost: Option<&Piece>) -> Self {
        let rows = board
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match *cell {
                        Cell::Empty => RenderCell::Empty,
                        Cell::Filled(color) => RenderCell::Locked(color),
                    })
                    .collect()
            })
            .collect();
        let mut grid = Self { rows };
        if let Some(ghost) = ghost {
            grid.overlay(ghost, RenderCell::Ghost);
        }
        if let Some(piece) = falling {
            grid.overlay(piece, RenderCell::Falling(piece.color()));
        }
        grid
    }

    fn overlay(&mut self, piece: &Piece, cell: RenderCell) {
        for (row, col) in piece.cells() {
            let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
                continue;
            };
            let slot = self.rows.get_mut(row).and_then(|r| r.get_mut(col));
            if let Some(slot) = slot.filter(|slot| !matches!(slot, RenderCell::Locked(_))) {
                *slot = cell;
            }
        }
    }

    /// Returns an iterator over the rows, top-to-bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[RenderCell]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
