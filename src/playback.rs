//! # Playback
//!
//! Replays a solution against its starting grid, one move at a time, so that
//! the user can watch the puzzle being solved.

use std::{
	io::{self, Write},
	thread,
	time::Duration
};

use log::trace;
use sliding_puzzle_solver::{grid::Grid, solver::Solution};

////////////////////////////////////////////////////////////////////////////////
//                                  Playback.                                 //
////////////////////////////////////////////////////////////////////////////////

/// Replay a solution, writing the grid after every move and pausing between
/// moves.
///
/// # Arguments
///
/// * `out` - Where to write the grids.
/// * `start` - The grid that was solved.
/// * `solution` - The moves to play.
/// * `delay` - How long to pause after each move.
///
/// # Returns
///
/// The grid after the last move.
///
/// # Errors
///
/// * [`io::ErrorKind::InvalidInput`] if some move of the solution is illegal
///   where it is played.
/// * Any error that occurs while writing.
pub fn play<W: Write>(
	out: &mut W,
	start: &Grid,
	solution: &Solution,
	delay: Duration
) -> io::Result<Grid>
{
	let mut grid = start.clone();
	writeln!(out, "{}", grid)?;
	for (index, &m) in solution.moves().iter().enumerate()
	{
		grid = grid.apply(m)
			.map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
		trace!("played move {}: {}", index + 1, m);
		writeln!(out, "{}. {}", index + 1, m)?;
		writeln!(out, "{}", grid)?;
		out.flush()?;
		if !delay.is_zero()
		{
			thread::sleep(delay);
		}
	}
	Ok(grid)
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
