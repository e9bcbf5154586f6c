//! # Sliding Puzzle Solver
//!
//! The (N²−1)-puzzle, e.g., the 8-puzzle or the 15-puzzle, is played on an
//! N×N grid of numbered tiles with one blank cell. Tiles adjacent to the blank
//! slide into it, and the puzzle is solved when the tiles are in numeric order
//! with the blank in the bottom-right corner.
//!
//! This program solves a puzzle given on the command line. The tiles are
//! listed in row-major order, with `0` for the blank. The solution is printed
//! as a list of moves, each named for the direction in which a tile slides,
//! and then replayed one grid at a time.

mod playback;

use std::{
	io::stdout,
	process::ExitCode,
	time::{Duration, Instant}
};

use clap::{Parser, Subcommand};
use log::{debug, info, warn};

use playback::play;
use sliding_puzzle_solver::{
	grid::Grid,
	heuristic::cost,
	solver::{Solution, Solver, SolverError}
};

////////////////////////////////////////////////////////////////////////////////
//                           Command line options.                            //
////////////////////////////////////////////////////////////////////////////////

/// CLI for solving sliding puzzles.
#[derive(Clone, Debug, Parser)]
#[command(version)]
struct Opts
{
	#[command(subcommand)]
	command: Command
}

/// The subcommands of the CLI.
#[derive(Clone, Debug, Subcommand)]
enum Command
{
	/// Solve a puzzle and print the moves, then replay them one grid at a
	/// time.
	Solve {
		/// How long (in ms) to pause between moves during replay.
		#[arg(short = 'd', long, default_value = "100")]
		delay: u64,

		/// Give up after this many seconds of searching.
		#[arg(short = 't', long)]
		timeout: Option<u64>,

		/// Suppress the replay, printing only the moves.
		#[arg(short = 'q', long)]
		quiet: bool,

		/// Search even if the tile parity shows that the puzzle has no
		/// solution. The search then runs until it exhausts every reachable
		/// arrangement, which is impractical beyond 3×3.
		#[arg(long)]
		no_parity_check: bool,

		/// The tiles in row-major order, with 0 for the blank.
		#[arg(required = true, num_args = 4..)]
		tiles: Vec<u16>
	},

	/// Describe a puzzle without solving it.
	Inspect {
		/// The tiles in row-major order, with 0 for the blank.
		#[arg(required = true, num_args = 4..)]
		tiles: Vec<u16>
	}
}

/// How long the solver runs between checks of the timeout.
const QUANTUM: Duration = Duration::from_millis(50);

////////////////////////////////////////////////////////////////////////////////
//                               Main program.                                //
////////////////////////////////////////////////////////////////////////////////

/// Parse the command line options and execute the appropriate subcommand.
fn main() -> ExitCode
{
	env_logger::init();
	let opts = Opts::parse();
	debug!("Command line options: {:?}", opts);

	let tiles = match opts.command
	{
		Command::Solve { ref tiles, .. } => tiles,
		Command::Inspect { ref tiles } => tiles
	};
	let grid = match Grid::from_zero_blank(tiles)
	{
		Ok(grid) => grid,
		Err(e) =>
		{
			eprintln!("Invalid puzzle: {}", e);
			return ExitCode::FAILURE
		}
	};

	match opts.command
	{
		Command::Solve { delay, timeout, quiet, no_parity_check, .. } =>
		{
			if !no_parity_check && !grid.is_solvable()
			{
				info!("Parity shows no solution; skipping the search");
				println!("Unsolvable!");
				return ExitCode::FAILURE
			}
			let timeout = timeout.map(Duration::from_secs);
			let Some(outcome) = run_solver(grid.clone(), timeout)
			else
			{
				let limit = timeout.unwrap_or_default();
				println!("Gave up after {} s.", limit.as_secs());
				return ExitCode::FAILURE
			};
			match outcome
			{
				Ok(solution) =>
				{
					print_solution(&solution);
					if !quiet
					{
						let delay = Duration::from_millis(delay);
						let played = play(&mut stdout(), &grid, &solution, delay);
						if let Err(e) = played
						{
							eprintln!("Failed to replay solution: {}", e);
							return ExitCode::FAILURE
						}
					}
					ExitCode::SUCCESS
				}
				Err(e) =>
				{
					debug!("{}", e);
					println!("Unsolvable!");
					ExitCode::FAILURE
				}
			}
		}
		Command::Inspect { .. } =>
		{
			print_inspection(&grid);
			ExitCode::SUCCESS
		}
	}
}

/// Run the solver in short quanta until it finishes or the timeout expires.
///
/// # Arguments
///
/// * `grid` - The puzzle to solve.
/// * `timeout` - How long to search before giving up, if at all.
///
/// # Returns
///
/// The outcome of the search, or `None` if the timeout expired first.
fn run_solver(
	grid: Grid,
	timeout: Option<Duration>
) -> Option<Result<Solution, SolverError>>
{
	let start_time = Instant::now();
	let mut solver = Solver::new(grid);
	loop
	{
		solver = solver.solve(QUANTUM);
		if let Some(outcome) = solver.solution()
		{
			info!(
				"Search finished in {:?} after {} expansions",
				start_time.elapsed(),
				solver.expanded()
			);
			return Some(outcome)
		}
		if matches!(timeout, Some(limit) if start_time.elapsed() >= limit)
		{
			warn!(
				"Abandoning search after {} expansions, {} pending",
				solver.expanded(),
				solver.frontier_len()
			);
			return None
		}
	}
}

/// Print the solution to standard output.
///
/// # Arguments
///
/// * `solution` - The solution to print.
fn print_solution(solution: &Solution)
{
	println!("Solvable in {} moves:", solution.len());
	println!("{}", solution);
}

/// Print a description of the grid to standard output.
///
/// # Arguments
///
/// * `grid` - The grid to describe.
fn print_inspection(grid: &Grid)
{
	println!("{}", grid);
	println!("Heuristic cost: {}", cost(grid));
	println!("Solved: {}", grid.is_solved());
	println!("Solvable: {}", grid.is_solvable());
	let legal = grid.legal_moves()
		.map(|m| m.to_string())
		.collect::<Vec<_>>();
	println!("Legal moves: {}", legal.join(", "));
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
