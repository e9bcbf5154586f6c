//! # Heuristic
//!
//! The Manhattan-distance estimate of how far a [`Grid`] is from solved.

use crate::grid::Grid;

/// Estimate the number of moves needed to solve the grid: the sum, over every
/// numbered tile, of the row and column distances between its current cell
/// and its goal cell. Tile `v` belongs at row `(v - 1) / N`, column
/// `(v - 1) % N`. The blank contributes nothing.
///
/// The estimate never exceeds the true distance, but the
/// [solver](crate::solver::Solver) ranks states by this estimate alone, so
/// the solutions it finds are not necessarily shortest.
///
/// # Arguments
///
/// * `grid` - The grid to estimate.
///
/// # Returns
///
/// The estimated cost, which is `0` exactly when the grid is solved.
#[must_use]
pub fn cost(grid: &Grid) -> u32
{
	let size = grid.size();
	let blank_id = grid.blank_id();
	grid.cells()
		.filter(|&(_, _, tile)| tile != blank_id)
		.map(|(row, column, tile)| {
			let goal = tile as usize - 1;
			(row.abs_diff(goal / size) + column.abs_diff(goal % size)) as u32
		})
		.sum()
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
