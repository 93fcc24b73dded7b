use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::BinaryHeap;

use fxhash::FxHashMap;
use windy_board::{Cell, Direction, GoalPositions, Puzzle, TileGrid, BLANK};

use crate::Path;

/// The frontier of a best-first search, a min-queue over [`FrontierNode`]s.
///
/// Entries are never updated in place. When a cheaper path to an already queued grid turns up,
/// a fresh node is pushed and the old one goes stale. Stale nodes are recognized when they
/// surface by comparing their carried cost against the best cost known at that point.
#[derive(Debug, Clone)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierNode>,
    next_sequence: u64,
}

impl Frontier {
    /// Creates a new frontier with the given `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    /// Queues a grid reached with `cost_from_start` and prioritized by `estimated_total`.
    ///
    /// The sequence number breaking priority ties is assigned here, so of two entries with equal
    /// `estimated_total` the one pushed first surfaces first.
    pub fn push(&mut self, estimated_total: u32, cost_from_start: u32, grid: TileGrid) {
        self.heap.push(FrontierNode::new(
            estimated_total,
            self.next_sequence,
            cost_from_start,
            grid,
        ));
        self.next_sequence += 1;
    }

    /// Removes and returns the node ranked lowest by `FrontierNode`'s tuple ordering.
    pub fn pop(&mut self) -> Option<FrontierNode> {
        self.heap.pop()
    }
}

/// An entry of a [`Frontier`](Frontier).
///
/// `FrontierNode`s are ordered from high to low by the estimated total cost of a solution
/// passing through their grid. Of two nodes with the same total, the one with the lower
/// sequence number is considered higher in the ordering. The cost from the start and the grid
/// itself follow, which makes the ordering total.
///
/// ```txt
/// FrontierNode(total, sequence)
///
/// FrontierNode(10, 4) < FrontierNode(10, 2) < FrontierNode(5, 7)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct FrontierNode {
    // Reordering these fields changes the derived `Ord` and `PartialOrd` implementations.
    total: Reverse<u32>,
    sequence: Reverse<u64>,
    cost_from_start: Reverse<u32>,
    grid: Reverse<TileGrid>,
}

impl FrontierNode {
    fn new(total: u32, sequence: u64, cost_from_start: u32, grid: TileGrid) -> Self {
        Self {
            total: Reverse(total),
            sequence: Reverse(sequence),
            cost_from_start: Reverse(cost_from_start),
            grid: Reverse(grid),
        }
    }

    pub fn cost_from_start(&self) -> u32 {
        self.cost_from_start.0
    }

    pub fn grid(&self) -> TileGrid {
        self.grid.0
    }
}

/// The possible outcomes of offering a path to [`BestCosts`](BestCosts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relaxation {
    /// The grid had not been reached before and the path has been recorded.
    New,
    /// The offered path is cheaper than the recorded one, which has been replaced.
    Improved,
    /// The recorded path is at least as cheap and the offered one has been dropped.
    Discarded,
}

impl Relaxation {
    /// Returns `true` if the offered path has been recorded as the cheapest known one.
    pub fn was_recorded(&self) -> bool {
        match self {
            Relaxation::New | Relaxation::Improved => true,
            Relaxation::Discarded => false,
        }
    }
}

/// The cheapest known paths to all grids reached by a search.
///
/// Keeps the lowest cost each grid was reached with and the predecessor it was reached from on
/// that path. Both are replaced together in [`relax`](BestCosts::relax), so the predecessor
/// links always form paths matching the recorded costs and [`path_to`](BestCosts::path_to) can
/// rebuild the cheapest known path to any reached grid.
#[derive(Debug, Clone)]
pub(crate) struct BestCosts {
    records: FxHashMap<TileGrid, CostRecord>,
}

/// The cheapest known path to a grid, as its cost and the last slide of the path.
///
/// The start of a search is the one grid reached from nowhere.
#[derive(Debug, Clone)]
struct CostRecord {
    cost: u32,
    reached_from: Option<(TileGrid, Direction)>,
}

impl BestCosts {
    /// Creates a new `BestCosts` with the given `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Removes all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns the cost of the cheapest known path to `grid`.
    pub fn cost_of(&self, grid: &TileGrid) -> Option<u32> {
        self.records.get(grid).map(|record| record.cost)
    }

    /// Offers a path reaching `grid` with `cost`, whose last slide is `reached_from`.
    ///
    /// The path is recorded if it is the first one to reach `grid` or cheaper than the recorded
    /// one. Offers tied with the record are discarded, so the first path found at the final
    /// cost is the one that sticks.
    pub fn relax(
        &mut self,
        grid: TileGrid,
        cost: u32,
        reached_from: Option<(TileGrid, Direction)>,
    ) -> Relaxation {
        match self.records.entry(grid) {
            Entry::Occupied(occupied) if occupied.get().cost <= cost => Relaxation::Discarded,
            Entry::Occupied(mut occupied) => {
                occupied.insert(CostRecord { cost, reached_from });
                Relaxation::Improved
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CostRecord { cost, reached_from });
                Relaxation::New
            }
        }
    }

    /// Returns the cheapest known path from the start of the search to `grid`.
    ///
    /// # Panics
    /// Panics if `grid` was never recorded.
    pub fn path_to(&self, grid: &TileGrid) -> Path {
        let total_cost = self
            .cost_of(grid)
            .expect("Failed to find a record of a supposedly reached grid");

        let mut grids = Vec::with_capacity(32);
        let mut movements = Vec::with_capacity(32);
        let mut current = *grid;

        // Follow the predecessor links back to the start, the one grid reached from nowhere.
        loop {
            grids.push(current);
            match self
                .records
                .get(&current)
                .expect("Failed to find a record of a supposedly reached grid")
                .reached_from
            {
                Some((previous, travel)) => {
                    movements.push(travel);
                    current = previous;
                }
                None => break,
            }
        }

        grids.reverse();
        movements.reverse();
        Path::new(grids, movements, total_cost)
    }
}

/// Estimates the cost still needed to bring a grid to the goal of a puzzle.
///
/// The estimate is the windy distance plus the number of misplaced tiles. It only depends on
/// the grid and the goal, never on how the grid was reached, and it is 0 exactly on the goal.
/// The estimate is not proven to never overestimate the true remaining cost, so searches guided
/// by it report the cost of the path they found without claiming it is the cheapest possible.
#[derive(Debug, Clone)]
pub struct CostEstimator {
    goal_positions: GoalPositions,
}

impl CostEstimator {
    /// Creates a new estimator towards the goal of `puzzle`.
    pub fn new(puzzle: &Puzzle) -> Self {
        Self {
            goal_positions: *puzzle.goal_positions(),
        }
    }

    /// Returns the windy distance from `grid` to the goal.
    ///
    /// Every non-blank tile contributes its displacement from its goal cell, priced per cell at
    /// the cost of the direction it still has to travel in. A tile two cells west and one cell
    /// north of its goal cell contributes 2 eastward cells and 1 southward cell.
    pub fn windy_distance(&self, grid: &TileGrid) -> u32 {
        let mut distance = 0;

        for cell in Cell::all() {
            let tile = grid.tile(cell);
            if tile == BLANK {
                continue;
            }
            let goal = self.goal_positions[tile];

            distance += if cell.col() > goal.col() {
                u32::from(cell.col() - goal.col()) * Direction::West.cost()
            } else {
                u32::from(goal.col() - cell.col()) * Direction::East.cost()
            };
            distance += if cell.row() > goal.row() {
                u32::from(cell.row() - goal.row()) * Direction::North.cost()
            } else {
                u32::from(goal.row() - cell.row()) * Direction::South.cost()
            };
        }

        distance
    }

    /// Returns the number of non-blank tiles sitting outside their goal cell.
    pub fn misplaced(&self, grid: &TileGrid) -> u32 {
        Cell::all()
            .filter(|&cell| {
                let tile = grid.tile(cell);
                tile != BLANK && self.goal_positions[tile] != cell
            })
            .count() as u32
    }

    /// Returns the full estimate for `grid`, the windy distance plus the misplaced tile count.
    pub fn estimate(&self, grid: &TileGrid) -> u32 {
        self.windy_distance(grid) + self.misplaced(grid)
    }
}
