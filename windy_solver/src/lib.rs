mod a_star;
mod uniform_cost;
pub mod util;

use std::fmt;

use getset::Getters;
use windy_board::{Direction, GridError, Puzzle, TileGrid};

pub use a_star::{AStar, SearchLimits};
pub use uniform_cost::UniformCost;

pub trait Solver {
    /// Finds a sequence of slides from `start` to the goal of `puzzle`.
    fn solve(&mut self, puzzle: &Puzzle, start: TileGrid) -> Result<Path, SearchError>;
}

/// A path from a start grid to the goal grid of a puzzle.
///
/// Contains every grid along the way from the start to the goal inclusive, the slides connecting
/// them and the summed cost of those slides. Each slide is given as the direction the moved tile
/// travelled in.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct Path {
    grids: Vec<TileGrid>,
    movements: Vec<Direction>,
    total_cost: u32,
}

impl Path {
    /// Creates a new path from the visited grids and the slides connecting them.
    pub fn new(grids: Vec<TileGrid>, movements: Vec<Direction>, total_cost: u32) -> Self {
        debug_assert!(grids.len() == movements.len() + 1);
        Self {
            grids,
            movements,
            total_cost,
        }
    }

    /// Creates a new path for a start grid which already matches the goal.
    pub fn new_start_on_goal(start: TileGrid) -> Self {
        Self::new(vec![start], Vec::new(), 0)
    }

    /// Returns the grid the path starts from.
    pub fn start(&self) -> TileGrid {
        *self
            .grids
            .first()
            .expect("Failed to get the start of a pathless path")
    }

    /// Returns the grid the path ends on.
    pub fn end(&self) -> TileGrid {
        *self
            .grids
            .last()
            .expect("Failed to get the end of a pathless path")
    }

    /// Returns the number of slides in the path.
    pub fn len(&self) -> usize {
        self.movements.len()
    }

    /// Checks if the path has a length of 0.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One expansion performed by a search: a grid leaving the frontier for good.
///
/// `cost_from_start` is the cheapest cost the grid was reached with, `estimated_remaining` the
/// estimate of the cost still ahead at that point and `index` the position of this expansion in
/// the order they were performed in, counting up from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct Expansion {
    grid: TileGrid,
    cost_from_start: u32,
    estimated_remaining: u32,
    index: usize,
}

/// The ways a search can end without a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The grid handed to the solver is malformed.
    InvalidGrid(GridError),
    /// Every grid reachable from the start was expanded without finding the goal.
    NoSolution,
    /// A configured limit cut the search short.
    LimitReached,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchError::InvalidGrid(error) => write!(f, "invalid grid: {}", error),
            SearchError::NoSolution => write!(f, "the goal is unreachable from the start grid"),
            SearchError::LimitReached => write!(f, "hit a search limit before reaching the goal"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::InvalidGrid(error) => Some(error),
            SearchError::NoSolution | SearchError::LimitReached => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(error: GridError) -> Self {
        SearchError::InvalidGrid(error)
    }
}
