use std::iter;

use quadris_engine::{GameState, RenderCell};

use crate::config::DisplayConfig;

/// Text glyph drawn for one render cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellDisplay {
    symbol: char,
}

impl CellDisplay {
    const fn from_render_cell(cell: RenderCell) -> Self {
        let symbol = match cell {
            RenderCell::Empty => '.',
            RenderCell::Ghost => '+',
            // Falling cells are lowercase so they stand out from the stack.
            RenderCell::Falling(color) => color.kind().as_char().to_ascii_lowercase(),
            RenderCell::Locked(color) => color.kind().as_char(),
        };
        Self { symbol }
    }
}

/// Renders the board with the falling piece (and its ghost when enabled)
/// framed by walls and a floor.
pub fn render_board(state: &GameState, config: &DisplayConfig) -> String {
    let grid = state.render_grid(config.ghost_piece);
    let cell_width = config.cell_size.width();
    let inner_width = state.board().width() * cell_width;

    let mut lines = Vec::new();
    for row in grid.rows() {
        let cells: String = row
            .iter()
            .flat_map(|&cell| {
                let symbol = CellDisplay::from_render_cell(cell).symbol;
                iter::repeat_n(symbol, cell_width)
            })
            .collect();
        let line = format!("|{cells}|");
        lines.extend(iter::repeat_n(line, config.cell_size.height()));
    }
    lines.push(format!("+{}+", "-".repeat(inner_width)));
    lines.join("\n")
}
