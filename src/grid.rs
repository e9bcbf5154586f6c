//! # Grid
//!
//! Herein is the immutable snapshot of a sliding puzzle. An N×N grid holds the
//! tile identifiers `1..=N²` exactly once each, where `N²` denotes the blank.
//! Choosing the largest identifier for the blank puts its goal position in the
//! last cell, so the goal test and the heuristic need no special case for
//! where the blank belongs.

use std::{
	error::Error,
	fmt::{self, Display, Formatter}
};

use crate::moves::Move;

////////////////////////////////////////////////////////////////////////////////
//                                   Grids.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The largest supported side length. The blank, `N²`, must fit in a tile
/// identifier.
pub const MAX_SIZE: usize = 255;

/// An immutable N×N arrangement of tiles. Every [move](Grid::apply) produces
/// a new grid. Equality and hashing consider only the arrangement, since the
/// blank's position is derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Grid
{
	/// The side length.
	size: usize,

	/// The tile identifiers, linearized in row-major order.
	tiles: Vec<u16>,

	/// The `(row, column)` of the blank.
	blank: (usize, usize)
}

impl Grid
{
	/// Construct the solved grid of the given size.
	///
	/// # Arguments
	///
	/// * `size` - The side length.
	///
	/// # Returns
	///
	/// The goal arrangement: `1, 2, …, N²` in row-major order.
	///
	/// # Errors
	///
	/// [`GridError::UnsupportedSize`] if `size` is less than 2 or greater than
	/// [`MAX_SIZE`].
	pub fn goal(size: usize) -> Result<Self, GridError>
	{
		if !(2..=MAX_SIZE).contains(&size)
		{
			return Err(GridError::UnsupportedSize(size))
		}
		let tiles = (1..=(size * size) as u16).collect();
		Ok(Self { size, tiles, blank: (size - 1, size - 1) })
	}

	/// Construct a grid from its rows. The blank is denoted by `N²`.
	///
	/// # Arguments
	///
	/// * `rows` - The rows of the grid, top to bottom.
	///
	/// # Errors
	///
	/// * [`GridError::Empty`] if there are no rows.
	/// * [`GridError::RaggedRow`] if some row is not exactly N long.
	/// * Anything that [`from_cells`](Self::from_cells) reports.
	pub fn from_rows<R: AsRef<[u16]>>(rows: &[R]) -> Result<Self, GridError>
	{
		if rows.is_empty()
		{
			return Err(GridError::Empty)
		}
		let size = rows.len();
		if let Some(row) = rows.iter().position(|r| r.as_ref().len() != size)
		{
			return Err(GridError::RaggedRow { row })
		}
		let cells = rows.iter()
			.flat_map(|r| r.as_ref().iter().copied())
			.collect::<Vec<_>>();
		Self::from_cells(&cells)
	}

	/// Construct a grid from its cells, linearized in row-major order. The
	/// side length is the square root of the cell count, and the blank is
	/// denoted by `N²`.
	///
	/// # Arguments
	///
	/// * `cells` - The tile identifiers.
	///
	/// # Errors
	///
	/// * [`GridError::Empty`] if there are no cells.
	/// * [`GridError::NotSquare`] if the cell count is not a perfect square.
	/// * [`GridError::UnsupportedSize`] if the side length is out of range.
	/// * [`GridError::InvalidTile`] if a tile lies outside `1..=N²`.
	/// * [`GridError::DuplicateTile`] if a tile appears more than once.
	pub fn from_cells(cells: &[u16]) -> Result<Self, GridError>
	{
		let size = side_length(cells.len())?;
		let blank_id = (size * size) as u16;
		let mut seen = vec![false; cells.len()];
		let mut blank = (0, 0);
		for (index, &tile) in cells.iter().enumerate()
		{
			if !(1..=blank_id).contains(&tile)
			{
				return Err(GridError::InvalidTile(tile))
			}
			let slot = &mut seen[tile as usize - 1];
			if *slot
			{
				return Err(GridError::DuplicateTile(tile))
			}
			*slot = true;
			if tile == blank_id
			{
				blank = (index / size, index % size);
			}
		}
		Ok(Self { size, tiles: cells.to_vec(), blank })
	}

	/// Construct a grid from cells that denote the blank by `0`, which is the
	/// convention of interactive front ends. The blank is translated to `N²`.
	///
	/// # Arguments
	///
	/// * `cells` - The tile identifiers, linearized in row-major order.
	///
	/// # Errors
	///
	/// * [`GridError::InvalidTile`] if some cell is `N²`, which this
	///   convention does not use.
	/// * Otherwise, same as [`from_cells`](Self::from_cells).
	pub fn from_zero_blank(cells: &[u16]) -> Result<Self, GridError>
	{
		let size = side_length(cells.len())?;
		let blank_id = (size * size) as u16;
		if cells.contains(&blank_id)
		{
			return Err(GridError::InvalidTile(blank_id))
		}
		let cells = cells.iter()
			.map(|&tile| if tile == 0 { blank_id } else { tile })
			.collect::<Vec<_>>();
		Self::from_cells(&cells)
	}

	/// The side length.
	#[inline]
	#[must_use]
	pub fn size(&self) -> usize
	{
		self.size
	}

	/// The `(row, column)` of the blank.
	#[inline]
	#[must_use]
	pub fn blank(&self) -> (usize, usize)
	{
		self.blank
	}

	/// The identifier that denotes the blank, i.e., `N²`.
	#[inline]
	#[must_use]
	pub fn blank_id(&self) -> u16
	{
		(self.size * self.size) as u16
	}

	/// Get the tile at the given cell.
	///
	/// # Panics
	///
	/// If the cell lies outside the grid.
	#[inline]
	#[must_use]
	pub fn tile(&self, row: usize, column: usize) -> u16
	{
		assert!(row < self.size && column < self.size);
		self.tiles[row * self.size + column]
	}

	/// Iterate over the rows, top to bottom.
	#[inline]
	pub fn rows(&self) -> impl Iterator<Item = &[u16]> + '_
	{
		self.tiles.chunks_exact(self.size)
	}

	/// Iterate over every cell as `(row, column, tile)`, in row-major order.
	#[inline]
	pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u16)> + '_
	{
		let size = self.size;
		self.tiles.iter()
			.enumerate()
			.map(move |(index, &tile)| (index / size, index % size, tile))
	}

	/// Check whether every tile, including the blank, occupies its goal cell.
	#[must_use]
	pub fn is_solved(&self) -> bool
	{
		self.tiles.iter()
			.enumerate()
			.all(|(index, &tile)| tile as usize == index + 1)
	}

	/// Locate the tile that would slide into the blank under the given move.
	///
	/// # Returns
	///
	/// The `(row, column)` of the sliding tile, or `None` if it would lie
	/// outside the grid.
	#[must_use]
	fn source(&self, direction: Move) -> Option<(usize, usize)>
	{
		let (dr, dc) = direction.delta();
		let row = self.blank.0.checked_add_signed(dr)?;
		let column = self.blank.1.checked_add_signed(dc)?;
		(row < self.size && column < self.size).then_some((row, column))
	}

	/// Check whether the given move keeps the blank within the grid.
	#[inline]
	#[must_use]
	pub fn can_move(&self, direction: Move) -> bool
	{
		self.source(direction).is_some()
	}

	/// Iterate over the legal moves, in [expansion order](Move::ALL).
	#[inline]
	pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_
	{
		Move::ALL.into_iter().filter(|&m| self.can_move(m))
	}

	/// Apply a move, sliding the neighboring tile into the blank.
	///
	/// # Arguments
	///
	/// * `direction` - The move to apply.
	///
	/// # Returns
	///
	/// A new grid with the blank relocated to the cell vacated by the tile.
	///
	/// # Errors
	///
	/// [`GridError::OutOfBounds`] if no tile lies in the given direction.
	pub fn apply(&self, direction: Move) -> Result<Self, GridError>
	{
		let (row, column) = self.source(direction)
			.ok_or(GridError::OutOfBounds { direction, blank: self.blank })?;
		let mut tiles = self.tiles.clone();
		tiles.swap(
			self.blank.0 * self.size + self.blank.1,
			row * self.size + column
		);
		Ok(Self { size: self.size, tiles, blank: (row, column) })
	}

	/// Decide, by permutation parity, whether the goal is reachable from this
	/// arrangement at all. For an odd side length the number of inversions
	/// among the numbered tiles must be even; for an even side length the
	/// number of inversions plus the blank's row must be odd.
	#[must_use]
	pub fn is_solvable(&self) -> bool
	{
		let blank_id = self.blank_id();
		let numbered = self.tiles.iter()
			.copied()
			.filter(|&t| t != blank_id)
			.collect::<Vec<_>>();
		let inversions = numbered.iter()
			.enumerate()
			.map(|(i, &t)| numbered[i + 1..].iter().filter(|&&u| u < t).count())
			.sum::<usize>();
		if self.size % 2 == 1
		{
			inversions % 2 == 0
		}
		else
		{
			(inversions + self.blank.0) % 2 == 1
		}
	}
}

impl Display for Grid
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		let width = (self.blank_id() - 1).to_string().len();
		let blank_id = self.blank_id();
		for row in self.rows()
		{
			for (column, &tile) in row.iter().enumerate()
			{
				if column > 0
				{
					f.write_str(" ")?;
				}
				if tile == blank_id
				{
					write!(f, "{:>width$}", "")?;
				}
				else
				{
					write!(f, "{:>width$}", tile)?;
				}
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

/// Compute the side length of a square grid with the given cell count.
///
/// # Errors
///
/// * [`GridError::Empty`] if there are no cells.
/// * [`GridError::NotSquare`] if the count is not a perfect square.
/// * [`GridError::UnsupportedSize`] if the side length is out of range.
fn side_length(len: usize) -> Result<usize, GridError>
{
	if len == 0
	{
		return Err(GridError::Empty)
	}
	let mut size = 1;
	while (size + 1) * (size + 1) <= len
	{
		size += 1;
	}
	if size * size != len
	{
		return Err(GridError::NotSquare { len })
	}
	if !(2..=MAX_SIZE).contains(&size)
	{
		return Err(GridError::UnsupportedSize(size))
	}
	Ok(size)
}

/// The complete enumeration of [`Grid`] errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError
{
	/// The grid has no cells.
	Empty,

	/// The cell count is not a perfect square.
	NotSquare {
		/// The number of cells supplied.
		len: usize
	},

	/// A row does not have as many cells as there are rows.
	RaggedRow {
		/// The index of the first offending row.
		row: usize
	},

	/// The side length is less than 2 or greater than [`MAX_SIZE`].
	UnsupportedSize(usize),

	/// A tile identifier lies outside `1..=N²`.
	InvalidTile(u16),

	/// A tile identifier appears more than once.
	DuplicateTile(u16),

	/// The move would take the blank outside the grid. Callers are expected to
	/// check [legality](Grid::can_move) first, so this indicates a bug in the
	/// caller.
	OutOfBounds {
		/// The offending move.
		direction: Move,

		/// The `(row, column)` of the blank.
		blank: (usize, usize)
	}
}

impl Display for GridError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Empty => write!(f, "grid is empty"),
			Self::NotSquare { len } =>
				write!(f, "{} cells do not form a square grid", len),
			Self::RaggedRow { row } =>
				write!(f, "row {} has the wrong number of cells", row),
			Self::UnsupportedSize(size) => write!(
				f,
				"side length {} is not between 2 and {}",
				size,
				MAX_SIZE
			),
			Self::InvalidTile(tile) => write!(f, "tile {} is out of range", tile),
			Self::DuplicateTile(tile) =>
				write!(f, "tile {} appears more than once", tile),
			Self::OutOfBounds { direction, blank } => write!(
				f,
				"cannot move {} with the blank at ({}, {})",
				direction,
				blank.0,
				blank.1
			)
		}
	}
}

impl Error for GridError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::collections::HashSet;

	use crate::{grid::{Grid, GridError}, moves::Move};

	/// Construct a grid from literal rows.
	fn rows<const N: usize>(rows: [[u16; N]; N]) -> Grid
	{
		Grid::from_rows(&rows).unwrap()
	}

	/// Ensure that construction validates its input.
	#[test]
	fn test_construction()
	{
		let grid = rows([[1, 2], [3, 4]]);
		assert_eq!(grid, Grid::goal(2).unwrap());
		assert_eq!(grid.blank(), (1, 1));
		assert_eq!(grid.size(), 2);

		let grid = rows([[1, 2], [4, 3]]);
		assert_eq!(grid.blank(), (1, 0));
		assert_eq!(grid.tile(1, 1), 3);

		let empty: &[[u16; 0]] = &[];
		assert_eq!(Grid::from_rows(empty), Err(GridError::Empty));
		assert_eq!(
			Grid::from_rows(&[vec![1u16, 2], vec![3]]),
			Err(GridError::RaggedRow { row: 1 })
		);
		assert_eq!(
			Grid::from_cells(&[1, 2, 3]),
			Err(GridError::NotSquare { len: 3 })
		);
		assert_eq!(Grid::from_cells(&[1]), Err(GridError::UnsupportedSize(1)));
		assert_eq!(
			Grid::from_cells(&[1, 2, 3, 5]),
			Err(GridError::InvalidTile(5))
		);
		assert_eq!(
			Grid::from_cells(&[0, 1, 2, 3]),
			Err(GridError::InvalidTile(0))
		);
		assert_eq!(
			Grid::from_cells(&[1, 2, 2, 4]),
			Err(GridError::DuplicateTile(2))
		);
		assert_eq!(Grid::goal(1), Err(GridError::UnsupportedSize(1)));
	}

	/// Ensure that the front-end convention of `0` for the blank is
	/// translated.
	#[test]
	fn test_from_zero_blank()
	{
		let grid = Grid::from_zero_blank(&[1, 2, 3, 4, 0, 5, 7, 8, 6]).unwrap();
		assert_eq!(grid.blank(), (1, 1));
		assert_eq!(grid.tile(1, 1), 9);
		assert_eq!(
			grid,
			rows([[1, 2, 3], [4, 9, 5], [7, 8, 6]])
		);
		// N² is the internal blank, never a tile the user can type.
		assert_eq!(
			Grid::from_zero_blank(&[1, 2, 3, 4]),
			Err(GridError::InvalidTile(4))
		);
		assert_eq!(
			Grid::from_zero_blank(&[1, 2, 4, 0]),
			Err(GridError::InvalidTile(4))
		);
	}

	/// Ensure that legality follows the bounds of the grid, and that illegal
	/// moves are rejected by `apply`. Exhaustive over every blank position of
	/// a 3×3 grid.
	#[test]
	fn test_legal_moves()
	{
		let goal = Grid::goal(3).unwrap();
		// Walk the blank to every cell, then check every move there.
		let mut grids = vec![goal.clone()];
		let mut seen = HashSet::new();
		while let Some(grid) = grids.pop()
		{
			if !seen.insert(grid.blank())
			{
				continue
			}
			let (r, c) = grid.blank();
			for m in Move::ALL
			{
				let (dr, dc) = m.delta();
				let (nr, nc) = (r as isize + dr, c as isize + dc);
				let inside = (0..3).contains(&nr) && (0..3).contains(&nc);
				assert_eq!(grid.can_move(m), inside, "{} at {:?}", m, (r, c));
				match grid.apply(m)
				{
					Ok(next) =>
					{
						assert!(inside);
						assert_eq!(next.blank(), (nr as usize, nc as usize));
						grids.push(next);
					}
					Err(e) =>
					{
						assert!(!inside);
						assert_eq!(
							e,
							GridError::OutOfBounds { direction: m, blank: (r, c) }
						);
					}
				}
			}
			let legal = grid.legal_moves().collect::<Vec<_>>();
			assert!((2..=4).contains(&legal.len()));
		}
		assert_eq!(seen.len(), 9);
	}

	/// Ensure that the tile, not the blank, moves in the named direction.
	#[test]
	fn test_apply()
	{
		let goal = Grid::goal(2).unwrap();
		// The tile above the blank slides down.
		let grid = goal.apply(Move::Down).unwrap();
		assert_eq!(grid, rows([[1, 4], [3, 2]]));
		assert_eq!(grid.blank(), (0, 1));
		// The tile left of the blank slides right.
		let grid = goal.apply(Move::Right).unwrap();
		assert_eq!(grid, rows([[1, 2], [4, 3]]));
		assert_eq!(grid.blank(), (1, 0));
		// The goal itself is untouched.
		assert!(goal.is_solved());
	}

	/// Ensure that applying a move and then its inverse restores the original
	/// arrangement.
	#[test]
	fn test_inverse_round_trip()
	{
		let grid = rows([[5, 1, 3], [4, 9, 2], [7, 8, 6]]);
		for m in grid.legal_moves()
		{
			let there = grid.apply(m).unwrap();
			assert_ne!(there, grid);
			let back = there.apply(m.inverse()).unwrap();
			assert_eq!(back, grid, "{}", m);
		}
	}

	/// Ensure that the goal predicate accepts only the canonical arrangement.
	#[test]
	fn test_is_solved()
	{
		assert!(rows([[1, 2], [3, 4]]).is_solved());
		assert!(!rows([[4, 3], [2, 1]]).is_solved());
		assert!(!rows([[1, 2], [4, 3]]).is_solved());
		for size in 2..=6
		{
			assert!(Grid::goal(size).unwrap().is_solved());
		}
	}

	/// Ensure that parity detects a single transposition of numbered tiles.
	#[test]
	fn test_is_solvable()
	{
		for size in 2..=5
		{
			let goal = Grid::goal(size).unwrap();
			assert!(goal.is_solvable(), "goal of size {}", size);
			let mut cells = goal.rows().flatten().copied().collect::<Vec<_>>();
			cells.swap(0, 1);
			let swapped = Grid::from_cells(&cells).unwrap();
			assert!(!swapped.is_solvable(), "swapped of size {}", size);
			// Moves never change solvability.
			let moved = goal.legal_moves()
				.map(|m| goal.apply(m).unwrap())
				.collect::<Vec<_>>();
			assert!(moved.iter().all(Grid::is_solvable));
		}
	}

	/// Ensure that the grid renders one row per line with a blank gap.
	#[test]
	fn test_display()
	{
		let grid = rows([[1, 2], [4, 3]]);
		assert_eq!(grid.to_string(), "1 2\n  3\n");
		let grid = Grid::goal(4).unwrap();
		let text = grid.to_string();
		assert_eq!(text.lines().next(), Some(" 1  2  3  4"));
		assert_eq!(text.lines().last(), Some("13 14 15   "));
	}
}
