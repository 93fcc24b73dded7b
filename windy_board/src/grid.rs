use itertools::Itertools;
use std::fmt;

use crate::{Direction, GridError, BLANK, EXPANSION_ORDER, GRID_SIDE};

/// The type tile values are encoded as.
///
/// The values `1..=8` identify the numbered tiles, [`BLANK`](crate::BLANK) marks the empty
/// cell. A single byte is plenty for a 3x3 grid and keeps grids cheap to copy and hash.
pub type Tile = u8;

/// A cell of the grid, addressed by row and column.
///
/// Both coordinates start at zero in the north-western corner, rows grow southwards and
/// columns eastwards.
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Creates a new cell.
    ///
    /// The caller has to make sure that the given coordinates are within the bounds of the
    /// grid.
    pub fn new(row: u8, col: u8) -> Self {
        Cell { row, col }
    }

    /// Returns the row the cell is in.
    #[inline(always)]
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Returns the column the cell is in.
    #[inline(always)]
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Creates an iterator over all cells of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..GRID_SIDE as u8)
            .cartesian_product(0..GRID_SIDE as u8)
            .map(|(row, col)| Cell::new(row, col))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl From<(u8, u8)> for Cell {
    fn from((row, col): (u8, u8)) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for (u8, u8) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

/// One arrangement of the tiles on the grid.
///
/// A grid is an immutable value type: sliding a tile yields a fresh grid and leaves the
/// original untouched. Grids compare, hash and order by their cell contents, which makes them
/// usable as map keys and as components of lexicographically ordered search nodes.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TileGrid {
    cells: [[Tile; GRID_SIDE]; GRID_SIDE],
}

impl TileGrid {
    /// Creates a new grid from its rows.
    ///
    /// The contents are taken as-is. Externally supplied grids can be checked against the
    /// state contract with [`validate`](TileGrid::validate).
    pub fn new(cells: [[Tile; GRID_SIDE]; GRID_SIDE]) -> Self {
        TileGrid { cells }
    }

    /// Returns the tile at `cell`.
    #[inline(always)]
    pub fn tile(&self, cell: Cell) -> Tile {
        self.cells[cell.row() as usize][cell.col() as usize]
    }

    /// Checks that the grid holds a permutation of the tile values `0..=8`.
    pub fn validate(&self) -> Result<(), GridError> {
        let mut seen = [false; GRID_SIDE * GRID_SIDE];
        for cell in Cell::all() {
            let tile = self.tile(cell);
            if tile as usize >= seen.len() {
                return Err(GridError::InvalidTile(tile));
            }
            if seen[tile as usize] {
                return Err(GridError::DuplicateTile(tile));
            }
            seen[tile as usize] = true;
        }
        Ok(())
    }

    /// Returns the cell holding the blank.
    ///
    /// Fails if no cell holds [`BLANK`](crate::BLANK), which only happens for grids violating
    /// the state contract.
    pub fn blank_position(&self) -> Result<Cell, GridError> {
        Cell::all()
            .find(|&cell| self.tile(cell) == BLANK)
            .ok_or(GridError::MissingBlank)
    }

    /// Creates an iterator over all grids reachable with a single slide, paired with the
    /// direction the slid tile travels in.
    ///
    /// Successors come in the fixed [`EXPANSION_ORDER`](crate::EXPANSION_ORDER): first the
    /// tile west of the blank travelling east, then the tiles north, east and south of it.
    /// Candidates outside the grid are skipped, so a grid has between two and four successors.
    pub fn successors(&self) -> Result<impl Iterator<Item = (TileGrid, Direction)>, GridError> {
        let grid = *self;
        let blank = self.blank_position()?;

        Ok(EXPANSION_ORDER
            .iter()
            .filter_map(move |&(row_delta, col_delta, travel)| {
                let row = blank.row() as i8 + row_delta;
                let col = blank.col() as i8 + col_delta;
                if !(0..GRID_SIDE as i8).contains(&row) || !(0..GRID_SIDE as i8).contains(&col) {
                    return None;
                }
                let tile_cell = Cell::new(row as u8, col as u8);
                Some((grid.swapped(blank, tile_cell), travel))
            }))
    }

    /// Returns a copy of the grid with the contents of `a` and `b` swapped.
    fn swapped(mut self, a: Cell, b: Cell) -> Self {
        let tile = self.tile(a);
        self.cells[a.row() as usize][a.col() as usize] = self.tile(b);
        self.cells[b.row() as usize][b.col() as usize] = tile;
        self
    }
}

impl fmt::Debug for TileGrid {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(fmt, "/")?;
            }
            for &tile in row {
                match tile {
                    BLANK => write!(fmt, "-")?,
                    tile => write!(fmt, "{}", tile)?,
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(fmt)?;
            }
            let line = row
                .iter()
                .map(|&tile| match tile {
                    BLANK => "-".to_string(),
                    tile => tile.to_string(),
                })
                .join("\t");
            fmt.write_str(&line)?;
        }
        Ok(())
    }
}
