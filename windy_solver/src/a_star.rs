use chrono::{DateTime, Local};
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use windy_board::{Puzzle, TileGrid};

use crate::util::{BestCosts, CostEstimator, Frontier};
use crate::{Expansion, Path, SearchError, Solver};

/// A solver using the [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search algorithm to
/// find a cheap sequence of slides to the goal.
///
/// Grids are prioritized by the cost they were reached with plus the
/// [`CostEstimator`](CostEstimator)'s estimate of the cost still ahead. Since the estimate may
/// overestimate, the found path is the cheapest one this search encounters, not necessarily the
/// cheapest one overall. Priority ties fall to the grid queued first, so two runs on the same
/// puzzle expand the same grids in the same order.
///
/// A cheaper path to an already queued grid pushes a fresh frontier entry instead of reordering
/// the queue. The superseded entry is dropped once it surfaces, recognizable by its outdated
/// cost.
#[derive(Debug)]
pub struct AStar {
    best_costs: BestCosts,
    explored: IndexSet<TileGrid, FxBuildHasher>,
    limits: SearchLimits,
}

impl AStar {
    /// Creates a new `AStar` solver searching without limits.
    pub fn new() -> Self {
        Self::with_limits(SearchLimits::none())
    }

    /// Creates a new `AStar` solver giving up when `limits` are exceeded.
    pub fn with_limits(limits: SearchLimits) -> Self {
        Self {
            best_costs: BestCosts::with_capacity(65536),
            explored: IndexSet::with_capacity_and_hasher(65536, Default::default()),
            limits,
        }
    }

    /// Runs the search and reports every expansion it performed, in the order they happened.
    ///
    /// The report replaces the path: the last record always belongs to the goal grid and
    /// carries the cost a [`solve`](Solver::solve) call would report as the total.
    pub fn trace(
        &mut self,
        puzzle: &Puzzle,
        start: TileGrid,
    ) -> Result<Vec<Expansion>, SearchError> {
        let mut expansions = Vec::new();
        self.search(puzzle, start, Some(&mut expansions))?;
        Ok(expansions)
    }

    /// The search loop behind both [`solve`](Solver::solve) and [`trace`](AStar::trace).
    ///
    /// Returns the goal grid once it leaves the frontier. If `expansions` is given, every grid
    /// leaving the frontier for good is recorded in it. After a successful return
    /// `self.best_costs` holds the slides of the found path, ready to be walked by `path_to`.
    fn search(
        &mut self,
        puzzle: &Puzzle,
        start: TileGrid,
        mut expansions: Option<&mut Vec<Expansion>>,
    ) -> Result<TileGrid, SearchError> {
        start.validate()?;

        self.best_costs.clear();
        self.explored.clear();

        let estimator = CostEstimator::new(puzzle);
        let deadline = self.limits.deadline();

        let mut frontier = Frontier::with_capacity(65536);
        self.best_costs.relax(start, 0, None);
        frontier.push(estimator.estimate(&start), 0, start);

        while let Some(node) = frontier.pop() {
            let grid = node.grid();
            let cost = node.cost_from_start();

            // Entries carrying an outdated cost were superseded by a cheaper path.
            if self.best_costs.cost_of(&grid) != Some(cost) {
                continue;
            }
            // Each grid is expanded at most once, repeat visits are dropped.
            let (index, newly_explored) = self.explored.insert_full(grid);
            if !newly_explored {
                continue;
            }

            if let Some(max) = self.limits.max_expansions {
                if index >= max {
                    return Err(SearchError::LimitReached);
                }
            }
            if let Some(deadline) = deadline {
                if Local::now() > deadline {
                    return Err(SearchError::LimitReached);
                }
            }

            if let Some(expansions) = expansions.as_mut() {
                expansions.push(Expansion {
                    grid,
                    cost_from_start: cost,
                    estimated_remaining: estimator.estimate(&grid),
                    index,
                });
            }

            if puzzle.goal_reached(&grid) {
                return Ok(grid);
            }

            for (child, travel) in grid.successors()? {
                let child_cost = cost + travel.cost();
                if self
                    .best_costs
                    .relax(child, child_cost, Some((grid, travel)))
                    .was_recorded()
                {
                    frontier.push(child_cost + estimator.estimate(&child), child_cost, child);
                }
            }
        }

        Err(SearchError::NoSolution)
    }
}

impl Solver for AStar {
    fn solve(&mut self, puzzle: &Puzzle, start: TileGrid) -> Result<Path, SearchError> {
        let goal = self.search(puzzle, start, None)?;
        Ok(self.best_costs.path_to(&goal))
    }
}

impl Default for AStar {
    fn default() -> Self {
        AStar::new()
    }
}

/// Optional budgets capping how much work an [`AStar`](AStar) search may do.
///
/// Budgets are checked between expansions, so they never change which path is found, only
/// whether the search ends early with [`SearchError::LimitReached`](crate::SearchError).
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    max_expansions: Option<usize>,
    time_budget: Option<chrono::Duration>,
}

impl SearchLimits {
    /// Creates limits which never cut a search short.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a cap on the number of expansions a search may perform.
    pub fn expansions(max_expansions: usize) -> Self {
        Self {
            max_expansions: Some(max_expansions),
            time_budget: None,
        }
    }

    /// Creates a cap on the wall-clock time a search may take.
    pub fn time_budget(budget: chrono::Duration) -> Self {
        Self {
            max_expansions: None,
            time_budget: Some(budget),
        }
    }

    /// Turns the time budget into the moment a search starting now has to be done by.
    fn deadline(&self) -> Option<DateTime<Local>> {
        self.time_budget.map(|budget| Local::now() + budget)
    }
}

#[cfg(test)]
mod tests {
    use chrono::prelude::*;
    use itertools::Itertools;
    use rayon::prelude::*;
    use windy_board::generator::Scrambler;
    use windy_board::{Direction, GridError, Puzzle, TileGrid};

    use super::{AStar, SearchLimits};
    use crate::{Path, SearchError, Solver, UniformCost};

    fn create_puzzle() -> (TileGrid, Puzzle) {
        let start = TileGrid::new([[1, 6, 2], [5, 7, 8], [0, 4, 3]]);
        let goal = TileGrid::new([[7, 8, 1], [6, 0, 2], [5, 4, 3]]);
        (start, Puzzle::new(goal).unwrap())
    }

    /// Checks that `path` leads from `start` to `goal` using legal slides adding up to its
    /// total cost.
    fn check_path(path: &Path, start: TileGrid, goal: TileGrid) {
        assert_eq!(start, path.start());
        assert_eq!(goal, path.end());
        assert_eq!(path.grids().len(), path.movements().len() + 1);

        let mut cost = 0;
        for (i, &movement) in path.movements().iter().enumerate() {
            let expected = (path.grids()[i + 1], movement);
            assert!(
                path.grids()[i]
                    .successors()
                    .unwrap()
                    .any(|candidate| candidate == expected),
                "slide {} of the path is not legal",
                i
            );
            cost += movement.cost();
        }
        assert_eq!(cost, *path.total_cost());
    }

    #[test]
    fn puzzle_creation() {
        create_puzzle();
    }

    #[test]
    fn on_goal() {
        let (_, puzzle) = create_puzzle();
        let start = puzzle.goal();

        let expected = Path::new_start_on_goal(start);
        assert_eq!(Ok(expected), AStar::new().solve(&puzzle, start));
    }

    #[test]
    fn solve_single_slide() {
        let (_, puzzle) = create_puzzle();
        // Tile 6 slid east out of its goal cell, sliding it back west costs 1.
        let start = TileGrid::new([[7, 8, 1], [0, 6, 2], [5, 4, 3]]);

        let path = AStar::new().solve(&puzzle, start).unwrap();
        assert_eq!(1, *path.total_cost());
        assert_eq!(vec![Direction::West], *path.movements());
        check_path(&path, start, puzzle.goal());
    }

    #[test]
    fn solve_against_the_wind() {
        let (_, puzzle) = create_puzzle();
        // Tile 2 slid west out of its goal cell, the only way back is east against the wind.
        let start = TileGrid::new([[7, 8, 1], [6, 2, 0], [5, 4, 3]]);

        let path = AStar::new().solve(&puzzle, start).unwrap();
        assert_eq!(3, *path.total_cost());
        assert_eq!(vec![Direction::East], *path.movements());
        check_path(&path, start, puzzle.goal());
    }

    #[test]
    fn solve() {
        let (start, puzzle) = create_puzzle();

        let path = AStar::new().solve(&puzzle, start).unwrap();
        check_path(&path, start, puzzle.goal());
        // The windy distance alone never overestimates, so no path can cost less than 19.
        assert!(*path.total_cost() >= 19);
    }

    #[test]
    fn deterministic_results() {
        let (start, puzzle) = create_puzzle();

        let first = AStar::new().solve(&puzzle, start);
        let second = AStar::new().solve(&puzzle, start);
        assert_eq!(first, second);

        let first_trace = AStar::new().trace(&puzzle, start).unwrap();
        let second_trace = AStar::new().trace(&puzzle, start).unwrap();
        assert_eq!(first_trace, second_trace);
    }

    #[test]
    fn reusing_a_solver_resets_its_bookkeeping() {
        let (start, puzzle) = create_puzzle();
        let mut solver = AStar::new();

        let first = solver.solve(&puzzle, start);
        let second = solver.solve(&puzzle, start);
        assert_eq!(first, second);
    }

    #[test]
    fn trace_of_a_single_slide() {
        let (_, puzzle) = create_puzzle();
        let start = TileGrid::new([[7, 8, 1], [0, 6, 2], [5, 4, 3]]);

        let trace = AStar::new().trace(&puzzle, start).unwrap();
        assert_eq!(2, trace.len());

        assert_eq!(start, *trace[0].grid());
        assert_eq!(0, *trace[0].cost_from_start());
        assert_eq!(2, *trace[0].estimated_remaining());
        assert_eq!(0, *trace[0].index());

        assert_eq!(puzzle.goal(), *trace[1].grid());
        assert_eq!(1, *trace[1].cost_from_start());
        assert_eq!(0, *trace[1].estimated_remaining());
        assert_eq!(1, *trace[1].index());
    }

    #[test]
    fn trace_agrees_with_the_path() {
        let (start, puzzle) = create_puzzle();

        let path = AStar::new().solve(&puzzle, start).unwrap();
        let trace = AStar::new().trace(&puzzle, start).unwrap();

        let last = trace.last().unwrap();
        assert_eq!(puzzle.goal(), *last.grid());
        assert_eq!(path.total_cost(), last.cost_from_start());
        assert_eq!(0, *last.estimated_remaining());

        // Expansion indices count up gaplessly from 0.
        assert!(trace
            .iter()
            .enumerate()
            .all(|(i, expansion)| *expansion.index() == i));

        // No grid is expanded twice.
        let unique: std::collections::HashSet<_> =
            trace.iter().map(|expansion| *expansion.grid()).collect();
        assert_eq!(trace.len(), unique.len());

        // Every grid on the path was expanded with the cost the path reaches it with.
        let mut cost = 0;
        for (i, grid) in path.grids().iter().enumerate() {
            if i > 0 {
                cost += path.movements()[i - 1].cost();
            }
            let expansion = trace
                .iter()
                .find(|expansion| expansion.grid() == grid)
                .unwrap();
            assert_eq!(cost, *expansion.cost_from_start());
        }
    }

    #[test]
    fn unsolvable_when_two_tiles_are_swapped() {
        let (_, puzzle) = create_puzzle();
        // Swapping one pair of tiles flips the permutation parity, which no slide can restore.
        let start = TileGrid::new([[8, 7, 1], [6, 0, 2], [5, 4, 3]]);

        assert_eq!(
            Err(SearchError::NoSolution),
            AStar::new().solve(&puzzle, start)
        );
    }

    #[test]
    fn rejects_malformed_starts() {
        let (_, puzzle) = create_puzzle();
        let start = TileGrid::new([[7, 8, 1], [6, 0, 2], [5, 4, 4]]);

        assert_eq!(
            Err(SearchError::InvalidGrid(GridError::DuplicateTile(4))),
            AStar::new().solve(&puzzle, start)
        );
    }

    #[test]
    fn expansion_limit_cuts_the_search_short() {
        let (start, puzzle) = create_puzzle();

        let mut strict = AStar::with_limits(SearchLimits::expansions(5));
        assert_eq!(Err(SearchError::LimitReached), strict.solve(&puzzle, start));

        // A generous cap changes nothing.
        let mut generous = AStar::with_limits(SearchLimits::expansions(1_000_000));
        assert_eq!(AStar::new().solve(&puzzle, start), generous.solve(&puzzle, start));

        // The goal grid itself fits into a single allowed expansion.
        let mut tight = AStar::with_limits(SearchLimits::expansions(1));
        assert_eq!(
            Ok(Path::new_start_on_goal(puzzle.goal())),
            tight.solve(&puzzle, puzzle.goal())
        );
    }

    #[test]
    fn time_budget_leaves_fast_searches_alone() {
        let (start, puzzle) = create_puzzle();

        let mut limited =
            AStar::with_limits(SearchLimits::time_budget(chrono::Duration::seconds(60)));
        assert_eq!(AStar::new().solve(&puzzle, start), limited.solve(&puzzle, start));
    }

    // Solves a large number of scrambled instances and compares the found costs against the
    // optimal ones found by uniform cost search. This takes a while, so it's not run by default.
    #[test]
    #[ignore]
    fn solve_many() {
        let n_instances = 2000;
        let max_slides = 40;

        let (_, puzzle) = create_puzzle();
        let goal = puzzle.goal();

        println!("Starting operations at {}", Local::now());
        println!("{}> Scrambling {} starting grids", Local::now(), n_instances);

        let mut scrambler = Scrambler::from_seed(20210315);
        let starts = (1..=max_slides)
            .cycle()
            .take(n_instances)
            .map(|slides| scrambler.scramble(&goal, slides).unwrap())
            .collect::<Vec<_>>();

        println!("{}> Solving each with A* and uniform cost", Local::now());

        let costs = starts
            .par_iter()
            .map(|&start| {
                let found = AStar::new().solve(&puzzle, start).unwrap();
                let cheapest = UniformCost::new().solve(&puzzle, start).unwrap();
                check_path(&found, start, goal);
                check_path(&cheapest, start, goal);
                assert!(found.total_cost() >= cheapest.total_cost());
                (*found.total_cost(), *cheapest.total_cost())
            })
            .collect::<Vec<_>>();

        println!("{}> Finished calculations", Local::now());

        let suboptimal = costs
            .iter()
            .filter(|(found, cheapest)| found > cheapest)
            .count();
        let excess_counts = costs
            .iter()
            .map(|(found, cheapest)| found - cheapest)
            .counts();

        println!(
            "{}> {} of {} found paths cost more than the cheapest possible",
            Local::now(),
            suboptimal,
            costs.len()
        );
        println!(
            "{}> Excess cost distribution: {:?}",
            Local::now(),
            excess_counts.iter().sorted().collect::<Vec<_>>()
        );
    }
}
