//! # Solver
//!
//! Herein is the best-first search that solves a sliding puzzle. States are
//! drawn from a frontier ranked by heuristic cost alone, so the search is
//! greedy: it finds _a_ solution, but not necessarily a shortest one.

use std::{
	collections::{BinaryHeap, HashSet},
	error::Error,
	fmt::{self, Debug, Display, Formatter},
	rc::Rc,
	time::{Duration, Instant}
};

use log::{debug, trace};

use crate::{
	grid::{Grid, GridError},
	moves::Move,
	state::{Ranked, SearchState}
};

////////////////////////////////////////////////////////////////////////////////
//                                  Solver.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete context of a search. The search is iterative rather than
/// recursive, so it can be time-sliced: a caller that must stay responsive
/// runs it for a short quantum at a time, and abandons it whenever it likes.
#[must_use]
pub struct Solver
{
	/// The states discovered but not yet expanded, best first. A state may
	/// appear here more than once; duplicates are discarded when popped.
	frontier: BinaryHeap<Ranked>,

	/// The states already popped from the frontier, by arrangement.
	visited: HashSet<Rc<SearchState>>,

	/// The next insertion sequence number for the frontier.
	sequence: u64,

	/// The number of states whose successors have been generated.
	expanded: usize,

	/// The goal state, once found.
	goal: Option<Rc<SearchState>>,

	/// Whether the search has terminated, either by finding the goal or by
	/// exhausting the frontier.
	is_finished: bool
}

impl Solver
{
	/// Construct a new solver for the given grid. The grid becomes the root of
	/// the search.
	///
	/// # Arguments
	///
	/// * `grid` - The starting arrangement.
	///
	/// # Returns
	///
	/// A solver that has not yet expanded anything.
	pub fn new(grid: Grid) -> Self
	{
		let mut solver = Self
		{
			frontier: BinaryHeap::new(),
			visited: HashSet::new(),
			sequence: 0,
			expanded: 0,
			goal: None,
			is_finished: false
		};
		solver.push(SearchState::root(grid));
		solver
	}

	/// Check if the solver is finished, i.e., whether it found the goal or
	/// exhausted the frontier.
	#[inline]
	#[must_use]
	pub fn is_finished(&self) -> bool
	{
		self.is_finished
	}

	/// Check if the solver found the goal.
	#[inline]
	#[must_use]
	pub fn is_solved(&self) -> bool
	{
		self.goal.is_some()
	}

	/// The number of states expanded so far.
	#[inline]
	#[must_use]
	pub fn expanded(&self) -> usize
	{
		self.expanded
	}

	/// The number of entries awaiting expansion, duplicates included.
	#[inline]
	#[must_use]
	pub fn frontier_len(&self) -> usize
	{
		self.frontier.len()
	}

	/// The number of distinct arrangements visited so far.
	#[inline]
	#[must_use]
	pub fn visited_len(&self) -> usize
	{
		self.visited.len()
	}

	/// The goal state, if found. Its history leads back to the root.
	#[inline]
	#[must_use]
	pub fn goal(&self) -> Option<&Rc<SearchState>>
	{
		self.goal.as_ref()
	}

	/// Run the solver until it finishes or the specified quantum elapses.
	/// Always process at least one state, even if the quantum is zero, so that
	/// the solver always makes progress.
	///
	/// # Arguments
	///
	/// * `duration` - The maximum amount of time to run the solver before
	///   answering a continuation context.
	///
	/// # Returns
	///
	/// The continuation context. The caller should call
	/// [`is_finished`](Self::is_finished) to determine if there is any
	/// additional work to perform.
	pub fn solve(mut self, duration: Duration) -> Self
	{
		if self.is_finished
		{
			trace!("solver is already finished");
			return self
		}
		let start_time = Instant::now();
		loop
		{
			self.step();
			if self.is_finished
			{
				return self
			}
			let elapsed = Instant::now().duration_since(start_time);
			if elapsed >= duration
			{
				trace!("quantum elapsed: {:?}", elapsed);
				return self
			}
		}
	}

	/// Run the solver until it finishes. There is no limit on time or memory,
	/// so this may run for a very long time on large unsolvable grids.
	pub fn solve_fully(mut self) -> Self
	{
		while !self.is_finished
		{
			self.step();
		}
		self
	}

	/// Get the outcome of the search.
	///
	/// # Returns
	///
	/// `None` if the solver has not finished. Otherwise, the moves that lead
	/// from the root to the goal.
	///
	/// # Errors
	///
	/// [`SolverError::Unsolvable`] if the frontier was exhausted without
	/// reaching the goal.
	#[must_use]
	pub fn solution(&self) -> Option<Result<Solution, SolverError>>
	{
		if !self.is_finished
		{
			return None
		}
		Some(match self.goal
		{
			Some(ref goal) => Ok(Solution(goal.path())),
			None => Err(SolverError::Unsolvable { expanded: self.expanded })
		})
	}

	/// Rank a state and add it to the frontier.
	fn push(&mut self, state: SearchState)
	{
		self.frontier.push(Ranked::new(Rc::new(state), self.sequence));
		self.sequence += 1;
	}

	/// Pop the best state from the frontier and process it: discard it if its
	/// arrangement was visited already, accept it if it is the goal, and
	/// otherwise push all of its successors. Whether the successors were
	/// visited already is not checked here, but when they are popped.
	fn step(&mut self)
	{
		let Some(current) = self.frontier.pop().map(Ranked::into_state)
		else
		{
			debug!(
				"exhausted frontier after {} expansions, {} visited",
				self.expanded,
				self.visited.len()
			);
			self.is_finished = true;
			return
		};
		if !self.visited.insert(Rc::clone(&current))
		{
			return
		}
		if current.is_goal()
		{
			debug!(
				"found goal after {} expansions, {} visited, {} pending",
				self.expanded,
				self.visited.len(),
				self.frontier.len()
			);
			self.goal = Some(current);
			self.is_finished = true;
			return
		}
		trace!("expanding (cost {}):\n{}", current.cost(), current.grid());
		self.expanded += 1;
		for child in SearchState::successors(&current)
		{
			self.push(child);
		}
	}
}

impl Debug for Solver
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		f.debug_struct("Solver")
			.field("frontier_len", &self.frontier.len())
			.field("visited_len", &self.visited.len())
			.field("expanded", &self.expanded)
			.field("goal", &self.goal)
			.field("is_finished", &self.is_finished)
			.finish()
	}
}

/// Solve the given grid, running the search to completion.
///
/// # Arguments
///
/// * `grid` - The starting arrangement.
///
/// # Returns
///
/// The moves that lead from `grid` to the goal.
///
/// # Errors
///
/// [`SolverError::Unsolvable`] if the goal is unreachable from `grid`.
pub fn solve(grid: Grid) -> Result<Solution, SolverError>
{
	let solver = Solver::new(grid).solve_fully();
	match solver.solution()
	{
		Some(solution) => solution,
		None => unreachable!("solver finished without an outcome")
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Solutions.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The moves that solve a puzzle, in the order in which they must be played.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Solution(Vec<Move>);

impl Solution
{
	/// The moves, in the order in which they must be played.
	#[inline]
	#[must_use]
	pub fn moves(&self) -> &[Move]
	{
		&self.0
	}

	/// Unwrap the moves.
	#[inline]
	#[must_use]
	pub fn into_moves(self) -> Vec<Move>
	{
		self.0
	}

	/// The number of moves.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize
	{
		self.0.len()
	}

	/// Check if the start was already solved.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool
	{
		self.0.is_empty()
	}

	/// Play every move against the given grid.
	///
	/// # Arguments
	///
	/// * `start` - The grid to play against.
	///
	/// # Returns
	///
	/// The grid after the last move.
	///
	/// # Errors
	///
	/// [`GridError::OutOfBounds`] if some move is illegal where it is played,
	/// which means that `start` is not the grid that was solved.
	pub fn replay(&self, start: &Grid) -> Result<Grid, GridError>
	{
		self.0.iter().try_fold(start.clone(), |grid, &m| grid.apply(m))
	}
}

impl Display for Solution
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		for (index, m) in self.0.iter().enumerate()
		{
			if index > 0
			{
				f.write_str(", ")?;
			}
			write!(f, "{}", m)?;
		}
		Ok(())
	}
}

/// The complete enumeration of [`Solver`] errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverError
{
	/// The frontier was exhausted without reaching the goal, so the starting
	/// arrangement is an odd permutation of the goal.
	Unsolvable {
		/// The number of states expanded before giving up.
		expanded: usize
	}
}

impl Display for SolverError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Unsolvable { expanded } => write!(
				f,
				"unsolvable: exhausted the search after {} expansions",
				expanded
			)
		}
	}
}

impl Error for SolverError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
