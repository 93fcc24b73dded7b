use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use windy_board::generator::Scrambler;
use windy_board::{Puzzle, TileGrid};
use windy_solver::util::CostEstimator;
use windy_solver::{AStar, Solver, UniformCost};

fn bench_solvers(c: &mut Criterion) {
    let (puzzle, bench_data) = solver_bench_setup();

    let mut group = c.benchmark_group("Windy Solver");
    for (start, slides) in bench_data {
        group.bench_function(BenchmarkId::new("A*", slides), |b| {
            b.iter(|| AStar::new().solve(&puzzle, start))
        });
        group.bench_function(BenchmarkId::new("Uniform Cost", slides), |b| {
            b.iter(|| UniformCost::new().solve(&puzzle, start))
        });
    }
    group.finish();
}

fn bench_util(c: &mut Criterion) {
    let (start, puzzle) = create_puzzle();
    let estimator = CostEstimator::new(&puzzle);

    let mut group = c.benchmark_group("Windy Solver Utils");
    group.bench_function(BenchmarkId::new("CostEstimator", ""), |b| {
        b.iter(|| estimator.estimate(&start))
    });

    group.finish();
}

/// Takes a few minutes, most of it spent in the uniform cost searches.
fn bench_long_scramble(c: &mut Criterion) {
    let (start, puzzle) = create_long_scramble();

    let mut group = c.benchmark_group("Long scramble");
    group.sample_size(10);
    group.bench_function(BenchmarkId::new("A*", 200), |b| {
        b.iter(|| AStar::new().solve(&puzzle, start))
    });
    group.bench_function(BenchmarkId::new("Uniform Cost", 200), |b| {
        b.iter(|| UniformCost::new().solve(&puzzle, start))
    });

    group.finish();
}

criterion_group!(benches, bench_solvers, bench_util, bench_long_scramble);
criterion_main!(benches);

fn solver_bench_setup() -> (Puzzle, Vec<(TileGrid, usize)>) {
    let (_, puzzle) = create_puzzle();
    let goal = puzzle.goal();
    let mut scrambler = Scrambler::from_seed(7);

    let data = vec![2, 4, 8, 12, 16, 24, 32]
        .into_iter()
        .map(|slides| (scrambler.scramble(&goal, slides).unwrap(), slides))
        .collect();

    (puzzle, data)
}

fn create_puzzle() -> (TileGrid, Puzzle) {
    let start = TileGrid::new([[1, 6, 2], [5, 7, 8], [0, 4, 3]]);
    let goal = TileGrid::new([[7, 8, 1], [6, 0, 2], [5, 4, 3]]);
    (start, Puzzle::new(goal).unwrap())
}

fn create_long_scramble() -> (TileGrid, Puzzle) {
    let (_, puzzle) = create_puzzle();
    let mut scrambler = Scrambler::from_seed(99);
    let start = scrambler.scramble(&puzzle.goal(), 200).unwrap();
    (start, puzzle)
}
