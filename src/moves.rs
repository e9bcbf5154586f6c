//! # Moves
//!
//! The four moves of a sliding puzzle. A move is named for the direction in
//! which a _tile_ slides into the blank, not the direction in which the blank
//! travels. [`Move::Up`] therefore pulls the tile _below_ the blank upward, and
//! the blank itself descends by one row.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	str::FromStr
};

////////////////////////////////////////////////////////////////////////////////
//                                   Moves.                                   //
////////////////////////////////////////////////////////////////////////////////

/// A single move of the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move
{
	/// The tile below the blank slides up.
	Up,

	/// The tile above the blank slides down.
	Down,

	/// The tile right of the blank slides left.
	Left,

	/// The tile left of the blank slides right.
	Right
}

impl Move
{
	/// Every move, in the order in which the solver expands them.
	pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];

	/// Get the location of the tile that slides into the blank, relative to
	/// the blank.
	///
	/// # Returns
	///
	/// The `(row, column)` delta.
	#[inline]
	#[must_use]
	pub const fn delta(self) -> (isize, isize)
	{
		match self
		{
			Move::Up => (1, 0),
			Move::Down => (-1, 0),
			Move::Left => (0, 1),
			Move::Right => (0, -1)
		}
	}

	/// Get the move that undoes this one.
	#[inline]
	#[must_use]
	pub const fn inverse(self) -> Self
	{
		match self
		{
			Move::Up => Move::Down,
			Move::Down => Move::Up,
			Move::Left => Move::Right,
			Move::Right => Move::Left
		}
	}

	/// Get the symbolic name of the move.
	#[inline]
	#[must_use]
	pub const fn name(self) -> &'static str
	{
		match self
		{
			Move::Up => "UP",
			Move::Down => "DOWN",
			Move::Left => "LEFT",
			Move::Right => "RIGHT"
		}
	}
}

impl Display for Move
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		f.write_str(self.name())
	}
}

impl FromStr for Move
{
	type Err = ParseMoveError;

	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		Move::ALL.iter()
			.copied()
			.find(|m| m.name().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| ParseMoveError(s.to_string()))
	}
}

/// The text did not name a [`Move`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseMoveError(String);

impl Display for ParseMoveError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "not a move: {:?}", self.0)
	}
}

impl Error for ParseMoveError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::moves::{Move, ParseMoveError};

	/// Ensure that every move is undone by its inverse, and that the deltas
	/// cancel out.
	#[test]
	fn test_inverse()
	{
		for m in Move::ALL
		{
			assert_eq!(m.inverse().inverse(), m);
			assert_ne!(m.inverse(), m);
			let (dr, dc) = m.delta();
			let (ir, ic) = m.inverse().delta();
			assert_eq!((dr + ir, dc + ic), (0, 0), "{}", m);
		}
	}

	/// Ensure that the deltas name the tile that slides, not the blank.
	#[test]
	fn test_delta()
	{
		assert_eq!(Move::Up.delta(), (1, 0));
		assert_eq!(Move::Down.delta(), (-1, 0));
		assert_eq!(Move::Left.delta(), (0, 1));
		assert_eq!(Move::Right.delta(), (0, -1));
	}

	/// Ensure that names print and parse back.
	#[test]
	fn test_names()
	{
		assert_eq!(Move::Up.to_string(), "UP");
		assert_eq!("right".parse::<Move>(), Ok(Move::Right));
		assert_eq!(" Down ".parse::<Move>(), Ok(Move::Down));
		assert_eq!(
			"sideways".parse::<Move>(),
			Err(ParseMoveError("sideways".to_string()))
		);
	}
}
