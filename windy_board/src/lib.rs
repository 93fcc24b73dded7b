#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

//! Basic components of the windy 8-puzzle.
//!
//! The windy 8-puzzle is the classic 3x3 sliding-tile puzzle played in a constant wind blowing
//! from the east. Eight numbered tiles and one blank cell fill the grid, and a move slides a
//! tile adjacent to the blank into the blank's cell. The wind makes movement costs asymmetric:
//! sliding a tile west goes with the wind and costs 1, sliding it east goes against the wind
//! and costs 3, and sliding north or south costs 2 either way. The aim is to reach a goal
//! arrangement from a start arrangement as cheaply as possible.
//!
//! The main components are the [`TileGrid`](TileGrid) and the [`Puzzle`](Puzzle). A `TileGrid`
//! is one arrangement of the tiles and knows how to enumerate the arrangements reachable with a
//! single slide, in a fixed order given by [`EXPANSION_ORDER`](EXPANSION_ORDER). A `Puzzle`
//! represents the task of reaching one goal arrangement and owns the
//! [`GoalPositions`](GoalPositions) table stating which cell each tile has to end up in.
//!
//! Solvable instances of controllable difficulty can be generated with the
//! [`generator`](generator) module.

mod draw;
pub mod generator;
mod grid;

use std::{fmt, ops};

pub use crate::draw::draw_grid;
pub use crate::grid::{Cell, Tile, TileGrid};

/// The side length of the grid.
pub const GRID_SIDE: usize = 3;

/// The tile value of the blank cell that tiles slide into.
pub const BLANK: Tile = 0;

/// The order in which slide candidates are considered when expanding a grid.
///
/// Entries have the form `(row_delta, col_delta, travel)`. The deltas point from the blank to
/// the cell of the candidate tile and `travel` is the direction that tile moves in when it
/// slides into the blank. The tile west of the blank is considered first, then the tiles north,
/// east and south of it. This order is a fixed part of the puzzle: search results and traces
/// are only reproducible if expansion sticks to it.
pub const EXPANSION_ORDER: [(i8, i8, Direction); 4] = [
    (0, -1, Direction::East),
    (-1, 0, Direction::South),
    (0, 1, Direction::West),
    (1, 0, Direction::North),
];

/// The directions a sliding tile can travel in.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    West,
    North,
    South,
    East,
}

impl Direction {
    /// Returns the cost of sliding a tile one cell in this direction.
    ///
    /// The wind blows from the east, so travelling west with the wind is cheapest and
    /// travelling east against it is most expensive. Vertical slides cross the wind and cost
    /// the same in both directions.
    pub const fn cost(self) -> u32 {
        match self {
            Direction::West => 1,
            Direction::North => 2,
            Direction::South => 2,
            Direction::East => 3,
        }
    }

    /// Returns the direction opposite to `self`.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::West => Direction::East,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let string = format!("{:?}", &self);
        f.pad(&string)
    }
}

/// Errors caused by grids violating the puzzle's state contract.
///
/// A well-formed grid holds a permutation of the tile values `0..=8` with exactly one blank.
/// Grids are supplied from outside the crate, so the contract is checked at the boundaries and
/// violations are reported instead of ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// No cell of the grid holds the blank value `0`.
    MissingBlank,
    /// A tile value lies outside the valid range `0..=8`.
    InvalidTile(Tile),
    /// A tile value occurs more than once.
    DuplicateTile(Tile),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::MissingBlank => write!(f, "no cell of the grid holds the blank value 0"),
            GridError::InvalidTile(tile) => {
                write!(f, "tile value {} lies outside the valid range 0..=8", tile)
            }
            GridError::DuplicateTile(tile) => {
                write!(f, "tile value {} occurs more than once", tile)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// One solving task: reach a goal arrangement of the tiles.
///
/// Represents the problem of finding a cheap sequence of slides from some start grid to the
/// goal grid. The starting grid is not part of the puzzle, it is handed to a solver separately.
#[derive(Clone, PartialEq, Eq)]
pub struct Puzzle {
    goal: TileGrid,
    goal_positions: GoalPositions,
}

/// Lookup table from tile values to the cells they occupy in the goal.
///
/// Built once per [`Puzzle`](Puzzle) from a well-formed goal grid, so the mapping is bijective:
/// every tile value has exactly one goal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalPositions {
    cells: [Cell; GRID_SIDE * GRID_SIDE],
}

impl Puzzle {
    /// Creates a new puzzle with the given goal arrangement.
    ///
    /// Fails if `goal` is not a permutation of the tile values `0..=8`.
    pub fn new(goal: TileGrid) -> Result<Self, GridError> {
        let goal_positions = GoalPositions::new(&goal)?;
        Ok(Self {
            goal,
            goal_positions,
        })
    }

    /// Returns the goal arrangement.
    pub fn goal(&self) -> TileGrid {
        self.goal
    }

    /// Returns the table mapping each tile value to its goal cell.
    pub fn goal_positions(&self) -> &GoalPositions {
        &self.goal_positions
    }

    /// Checks if `grid` matches the goal arrangement.
    pub fn goal_reached(&self, grid: &TileGrid) -> bool {
        *grid == self.goal
    }
}

impl GoalPositions {
    /// Builds the table from a goal grid.
    ///
    /// Fails if `goal` is not a permutation of `0..=8`, since the table would not be bijective
    /// otherwise.
    fn new(goal: &TileGrid) -> Result<Self, GridError> {
        goal.validate()?;

        let mut cells = [Cell::default(); GRID_SIDE * GRID_SIDE];
        for cell in Cell::all() {
            cells[goal.tile(cell) as usize] = cell;
        }
        Ok(Self { cells })
    }
}

impl ops::Index<Tile> for GoalPositions {
    type Output = Cell;

    fn index(&self, tile: Tile) -> &Self::Output {
        debug_assert_ne!(tile, BLANK, "the blank is not assigned a goal cell");
        &self.cells[tile as usize]
    }
}

impl fmt::Debug for Puzzle {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", draw_grid(&self.goal))
    }
}
