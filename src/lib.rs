//! # Sliding Puzzle Solver
//!
//! The (N²−1)-puzzle is played on an N×N grid of numbered tiles with a single
//! blank cell. A move slides one of the tiles adjacent to the blank into it.
//! The puzzle is solved when the tiles read `1, 2, …, N²−1` in row-major order
//! with the blank in the bottom-right corner.
//!
//! This library finds a sequence of moves that solves a given [grid](grid::Grid)
//! by greedy best-first search over immutable [states](state::SearchState),
//! ranked by the Manhattan-distance [heuristic](heuristic::cost). The
//! [solver](solver::Solver) can be run to completion, or time-sliced by a
//! caller that must remain responsive.

pub mod grid;
pub mod heuristic;
pub mod moves;
pub mod solver;
pub mod state;
