use std::env;

use text_io::read;
use windy_board::{draw_grid, Puzzle, TileGrid, BLANK, GRID_SIDE};
use windy_solver::util::CostEstimator;
use windy_solver::{AStar, SearchError, Solver};

fn main() {
    let args: Vec<String> = env::args().collect();
    let trace_mode = args.iter().any(|arg| arg == "--trace");
    let verbose = args.iter().any(|arg| arg == "-v");

    // The start grid comes first on stdin, the goal grid second.
    let start = read_grid();
    let goal = read_grid();

    start
        .validate()
        .expect("the start grid is not a valid tile arrangement");
    let puzzle = Puzzle::new(goal).expect("the goal grid is not a valid tile arrangement");

    if verbose {
        println!("Searching for a path from");
        print!("{}", draw_grid(&start));
        println!("to");
        print!("{}", draw_grid(&puzzle.goal()));
    }

    if trace_mode {
        print_trace(&puzzle, start, verbose);
    } else {
        print_solution(&puzzle, start, verbose);
    }
}

/// Reads one grid as three lines of three whitespace-separated tiles, `-` or `0` for the blank.
fn read_grid() -> TileGrid {
    let mut cells = [[BLANK; GRID_SIDE]; GRID_SIDE];

    for row in cells.iter_mut() {
        let line: String = read!("{}\n");
        let tokens: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(GRID_SIDE, tokens.len(), "expected {} tiles per row", GRID_SIDE);

        for (cell, token) in row.iter_mut().zip(tokens) {
            *cell = match token {
                "-" => BLANK,
                tile => tile.parse().expect("tiles are numbers from 0 to 8 or -"),
            };
        }
    }

    TileGrid::new(cells)
}

fn print_solution(puzzle: &Puzzle, start: TileGrid, verbose: bool) {
    let path = match AStar::new().solve(puzzle, start) {
        Ok(path) => path,
        Err(SearchError::NoSolution) => {
            println!("No solution found.");
            return;
        }
        Err(error) => panic!("{}", error),
    };

    let estimator = CostEstimator::new(puzzle);

    println!("solution path found by A*:");
    println!();

    let mut cost = 0;
    for (index, grid) in path.grids().iter().enumerate() {
        if index > 0 {
            cost += path.movements()[index - 1].cost();
        }
        print_report_block(grid, cost, estimator.estimate(grid), index, verbose);
    }

    println!("TOTAL COST = {}", path.total_cost());
}

fn print_trace(puzzle: &Puzzle, start: TileGrid, verbose: bool) {
    let trace = match AStar::new().trace(puzzle, start) {
        Ok(trace) => trace,
        Err(SearchError::NoSolution) => {
            println!("No solution found.");
            return;
        }
        Err(error) => panic!("{}", error),
    };

    println!("expansions performed by A*:");
    println!();

    for expansion in &trace {
        print_report_block(
            expansion.grid(),
            *expansion.cost_from_start(),
            *expansion.estimated_remaining(),
            *expansion.index(),
            verbose,
        );
    }

    if let Some(goal) = trace.last() {
        println!("TOTAL COST = {}", goal.cost_from_start());
    }
}

/// Prints one grid of a report: the rows, the cost so far next to the estimated rest, and the
/// position of the block within the report.
fn print_report_block(grid: &TileGrid, cost: u32, estimate: u32, index: usize, verbose: bool) {
    if verbose {
        print!("{}", draw_grid(grid));
    } else {
        println!("{}", grid);
    }
    println!("{}\t\t{}", cost, estimate);
    println!("#{}", index);
    println!();
}
