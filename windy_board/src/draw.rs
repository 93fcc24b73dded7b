use crate::{Cell, TileGrid, BLANK, GRID_SIDE};

/// Border above the first row of tiles.
const TOP_BORDER: &str = "┌───┬───┬───┐";

/// Border between two rows of tiles.
const ROW_SEPARATOR: &str = "├───┼───┼───┤";

/// Border below the last row of tiles.
const BOTTOM_BORDER: &str = "└───┴───┴───┘";

/// Creates a string visualizing a grid.
///
/// Each tile sits in its own framed cell, the blank cell is left empty. The returned string
/// ends with a newline.
pub fn draw_grid(grid: &TileGrid) -> String {
    let mut drawn = String::new();
    drawn.push_str(TOP_BORDER);
    drawn.push('\n');

    for row in 0..GRID_SIDE as u8 {
        if row > 0 {
            drawn.push_str(ROW_SEPARATOR);
            drawn.push('\n');
        }
        for col in 0..GRID_SIDE as u8 {
            drawn.push_str("│ ");
            match grid.tile(Cell::new(row, col)) {
                BLANK => drawn.push(' '),
                tile => drawn.push_str(&tile.to_string()),
            }
            drawn.push(' ');
        }
        drawn.push_str("│\n");
    }

    drawn.push_str(BOTTOM_BORDER);
    drawn.push('\n');
    drawn
}
