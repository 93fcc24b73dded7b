//! Tools to generate solvable puzzle instances.

use rand::prelude::SliceRandom;
use rand::SeedableRng;

use crate::{Direction, GridError, TileGrid};

/// A scrambler creating start grids of roughly controllable difficulty.
///
/// Scrambles are random walks backwards from the goal, so every generated grid is guaranteed
/// to be reachable from it. Slides undoing the previous slide are skipped to keep a walk from
/// collapsing in on itself, but walks may still revisit grids, so the number of slides is only
/// an upper bound on how far from the goal a scramble ends up.
#[derive(Debug)]
pub struct Scrambler {
    rng: rand_pcg::Pcg64Mcg,
}

impl Scrambler {
    /// Creates a new scrambler with a random state.
    pub fn new() -> Self {
        Self {
            rng: rand_pcg::Pcg64Mcg::from_entropy(),
        }
    }

    /// Creates a new scrambler initialized with `seed`.
    ///
    /// The same seed always produces the same sequence of scrambles.
    pub fn from_seed(seed: u128) -> Self {
        Self {
            rng: rand_pcg::Pcg64Mcg::new(seed.wrapping_mul(2)),
        }
    }

    /// Creates a start grid by applying `slides` random slides to `goal`.
    ///
    /// Fails if `goal` has no blank to slide tiles into.
    pub fn scramble(&mut self, goal: &TileGrid, slides: usize) -> Result<TileGrid, GridError> {
        let mut grid = *goal;
        let mut last_travel: Option<Direction> = None;

        for _ in 0..slides {
            let candidates = grid
                .successors()?
                .filter(|&(_, travel)| last_travel != Some(travel.opposite()))
                .collect::<Vec<_>>();

            // Each grid has at least two successors, at most one of which undoes the last slide.
            let &(next, travel) = candidates
                .choose(&mut self.rng)
                .expect("Failed to find a slide candidate to scramble with");

            grid = next;
            last_travel = Some(travel);
        }

        Ok(grid)
    }
}

impl Default for Scrambler {
    fn default() -> Self {
        Scrambler::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Scrambler;
    use crate::TileGrid;

    fn goal() -> TileGrid {
        TileGrid::new([[7, 8, 1], [6, 0, 2], [5, 4, 3]])
    }

    #[test]
    fn same_seed_same_walk() {
        let one = Scrambler::from_seed(1234567890)
            .scramble(&goal(), 50)
            .unwrap();
        let two = Scrambler::from_seed(1234567890)
            .scramble(&goal(), 50)
            .unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn seeds_collide_after_widening() {
        let one = Scrambler::from_seed(0).scramble(&goal(), 20).unwrap();
        let two = Scrambler::from_seed(u128::MAX / 2 + 1)
            .scramble(&goal(), 20)
            .unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn scrambles_stay_well_formed() {
        let mut scrambler = Scrambler::from_seed(77);
        for slides in 0..30 {
            let grid = scrambler.scramble(&goal(), slides).unwrap();
            assert_eq!(grid.validate(), Ok(()));
        }
    }

    #[test]
    fn zero_slides_keep_the_goal() {
        assert_eq!(Scrambler::new().scramble(&goal(), 0).unwrap(), goal());
    }
}
