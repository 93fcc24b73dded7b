use fxhash::FxHashSet;
use windy_board::{Puzzle, TileGrid};

use crate::util::{BestCosts, Frontier};
use crate::{Path, SearchError, Solver};

/// A solver expanding grids in order of their cost from the start, blind to the goal until it
/// surfaces.
///
/// This is [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) over the
/// sliding graph. Every slide costs at least 1, so the first time a grid leaves the frontier its
/// recorded cost is the cheapest possible and the returned paths are optimal. The price is that
/// far more grids are expanded than with [`AStar`](crate::AStar), which makes this solver mainly
/// a baseline to judge heuristic solutions against.
#[derive(Debug)]
pub struct UniformCost {
    best_costs: BestCosts,
    explored: FxHashSet<TileGrid>,
}

impl UniformCost {
    /// Creates a new `UniformCost` solver.
    pub fn new() -> Self {
        Self {
            best_costs: BestCosts::with_capacity(65536),
            explored: FxHashSet::with_capacity_and_hasher(65536, Default::default()),
        }
    }
}

impl Solver for UniformCost {
    fn solve(&mut self, puzzle: &Puzzle, start: TileGrid) -> Result<Path, SearchError> {
        start.validate()?;

        self.best_costs.clear();
        self.explored.clear();

        let mut frontier = Frontier::with_capacity(65536);
        self.best_costs.relax(start, 0, None);
        frontier.push(0, 0, start);

        while let Some(node) = frontier.pop() {
            let grid = node.grid();
            let cost = node.cost_from_start();

            if self.best_costs.cost_of(&grid) != Some(cost) {
                continue;
            }
            if !self.explored.insert(grid) {
                continue;
            }

            if puzzle.goal_reached(&grid) {
                return Ok(self.best_costs.path_to(&grid));
            }

            for (child, travel) in grid.successors()? {
                let child_cost = cost + travel.cost();
                if self
                    .best_costs
                    .relax(child, child_cost, Some((grid, travel)))
                    .was_recorded()
                {
                    frontier.push(child_cost, child_cost, child);
                }
            }
        }

        Err(SearchError::NoSolution)
    }
}

impl Default for UniformCost {
    fn default() -> Self {
        UniformCost::new()
    }
}
