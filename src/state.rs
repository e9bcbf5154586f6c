//! # Search states
//!
//! A search state wraps a [`Grid`] with the [`Move`] that produced it, a link
//! to the state it was produced from, and its heuristic [cost]. The links form
//! a singly linked history that leads back to the root, from which the
//! solution is recovered once the goal is found.

use std::{
	cmp::Ordering,
	collections::VecDeque,
	fmt::{self, Debug, Formatter},
	hash::{Hash, Hasher},
	rc::Rc
};

use crate::{
	grid::{Grid, GridError},
	heuristic::cost,
	moves::Move
};

////////////////////////////////////////////////////////////////////////////////
//                               Search states.                               //
////////////////////////////////////////////////////////////////////////////////

/// A node of the search graph. Two states are equal, and hash alike, exactly
/// when their grids hold the same arrangement; how a state was reached plays
/// no part in its identity.
#[must_use]
pub struct SearchState
{
	/// The arrangement of tiles.
	grid: Grid,

	/// The move that produced this state, or `None` for the root.
	last_move: Option<Move>,

	/// The state that this one was produced from, or `None` for the root.
	previous: Option<Rc<SearchState>>,

	/// The heuristic cost of [`grid`](Self::grid).
	cost: u32
}

impl SearchState
{
	/// Construct the root of a search.
	///
	/// # Arguments
	///
	/// * `grid` - The starting arrangement.
	///
	/// # Returns
	///
	/// A state with neither a move nor a predecessor.
	pub fn root(grid: Grid) -> Self
	{
		let cost = cost(&grid);
		Self { grid, last_move: None, previous: None, cost }
	}

	/// Construct the state reached by applying a move to another state.
	///
	/// # Arguments
	///
	/// * `parent` - The state to move from.
	/// * `direction` - The move to apply.
	///
	/// # Errors
	///
	/// [`GridError::OutOfBounds`] if the move is illegal for the parent.
	pub fn child(
		parent: &Rc<SearchState>,
		direction: Move
	) -> Result<Self, GridError>
	{
		let grid = parent.grid.apply(direction)?;
		let cost = cost(&grid);
		Ok(Self {
			grid,
			last_move: Some(direction),
			previous: Some(Rc::clone(parent)),
			cost
		})
	}

	/// Produce a child for every legal move, in [expansion order](Move::ALL).
	///
	/// # Arguments
	///
	/// * `parent` - The state to expand.
	pub fn successors(
		parent: &Rc<SearchState>
	) -> impl Iterator<Item = SearchState> + '_
	{
		parent.grid.legal_moves()
			.filter_map(move |m| Self::child(parent, m).ok())
	}

	/// The arrangement of tiles.
	#[inline]
	pub fn grid(&self) -> &Grid
	{
		&self.grid
	}

	/// The move that produced this state, or `None` for the root.
	#[inline]
	#[must_use]
	pub fn last_move(&self) -> Option<Move>
	{
		self.last_move
	}

	/// The state that this one was produced from, or `None` for the root.
	#[inline]
	#[must_use]
	pub fn previous(&self) -> Option<&Rc<SearchState>>
	{
		self.previous.as_ref()
	}

	/// The heuristic cost of the grid.
	#[inline]
	#[must_use]
	pub fn cost(&self) -> u32
	{
		self.cost
	}

	/// The number of moves between the root and this state.
	#[must_use]
	pub fn depth(&self) -> usize
	{
		let mut depth = 0;
		let mut current = self;
		while let Some(previous) = current.previous.as_deref()
		{
			depth += 1;
			current = previous;
		}
		depth
	}

	/// Check whether this state satisfies the goal predicate.
	#[inline]
	#[must_use]
	pub fn is_goal(&self) -> bool
	{
		self.grid.is_solved()
	}

	/// Recover the moves that lead from the root to this state, by walking
	/// the predecessor links back to the root.
	///
	/// # Returns
	///
	/// The moves in the order in which they must be played. The root itself
	/// contributes no move, so the path of the root is empty.
	#[must_use]
	pub fn path(&self) -> Vec<Move>
	{
		let mut moves = VecDeque::new();
		let mut current = self;
		while let Some(previous) = current.previous.as_deref()
		{
			if let Some(m) = current.last_move
			{
				moves.push_front(m);
			}
			current = previous;
		}
		moves.into()
	}
}

impl PartialEq for SearchState
{
	fn eq(&self, other: &Self) -> bool
	{
		self.grid == other.grid
	}
}

impl Eq for SearchState {}

impl Hash for SearchState
{
	fn hash<H: Hasher>(&self, state: &mut H)
	{
		self.grid.hash(state);
	}
}

impl Debug for SearchState
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		// Report the history by its length only; following the links would
		// recurse once per predecessor.
		f.debug_struct("SearchState")
			.field("grid", &self.grid)
			.field("last_move", &self.last_move)
			.field("cost", &self.cost)
			.field("depth", &self.depth())
			.finish()
	}
}

impl Drop for SearchState
{
	fn drop(&mut self)
	{
		// Unlink the history iteratively. Long histories would otherwise
		// recurse once per predecessor and exhaust the stack.
		let mut previous = self.previous.take();
		while let Some(state) = previous
		{
			match Rc::try_unwrap(state)
			{
				Ok(mut state) => previous = state.previous.take(),
				Err(_) => break
			}
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                             Frontier ranking.                              //
////////////////////////////////////////////////////////////////////////////////

/// A [`SearchState`] as ranked on the frontier. Lower cost ranks higher. Among
/// equal costs, the earlier insertion ranks higher, so the frontier is first in,
/// first out within a cost. The ordering is reversed relative to the natural
/// order of the key, so that a max-heap such as
/// [`BinaryHeap`](std::collections::BinaryHeap) pops the best state first.
#[derive(Clone, Debug)]
pub struct Ranked
{
	/// The heuristic cost of the state.
	cost: u32,

	/// The insertion sequence number, which breaks ties.
	sequence: u64,

	/// The ranked state.
	state: Rc<SearchState>
}

impl Ranked
{
	/// Rank a state.
	///
	/// # Arguments
	///
	/// * `state` - The state to rank.
	/// * `sequence` - The insertion sequence number, which must increase with
	///   every insertion into the same frontier.
	#[inline]
	pub fn new(state: Rc<SearchState>, sequence: u64) -> Self
	{
		Self { cost: state.cost(), sequence, state }
	}

	/// The ranked state.
	#[inline]
	pub fn state(&self) -> &Rc<SearchState>
	{
		&self.state
	}

	/// Unwrap the ranked state.
	#[inline]
	pub fn into_state(self) -> Rc<SearchState>
	{
		self.state
	}
}

impl PartialEq for Ranked
{
	fn eq(&self, other: &Self) -> bool
	{
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Ranked {}

impl PartialOrd for Ranked
{
	fn partial_cmp(&self, other: &Self) -> Option<Ordering>
	{
		Some(self.cmp(other))
	}
}

impl Ord for Ranked
{
	fn cmp(&self, other: &Self) -> Ordering
	{
		other.cost.cmp(&self.cost)
			.then_with(|| other.sequence.cmp(&self.sequence))
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::{
		collections::{hash_map::DefaultHasher, BinaryHeap, HashSet},
		hash::{Hash, Hasher},
		rc::Rc
	};

	use crate::{
		grid::{Grid, GridError},
		moves::Move,
		state::{Ranked, SearchState}
	};

	/// Compute the hash of a state.
	fn hash_of(state: &SearchState) -> u64
	{
		let mut hasher = DefaultHasher::new();
		state.hash(&mut hasher);
		hasher.finish()
	}

	/// Ensure that the root has no history and carries its cost.
	#[test]
	fn test_root()
	{
		let grid = Grid::from_cells(&[1, 2, 4, 3]).unwrap();
		let root = SearchState::root(grid.clone());
		assert_eq!(root.grid(), &grid);
		assert_eq!(root.last_move(), None);
		assert!(root.previous().is_none());
		assert_eq!(root.cost(), 1);
		assert!(!root.is_goal());
		assert!(root.path().is_empty());
	}

	/// Ensure that children record their move, parent, and cost, and that an
	/// illegal move is refused.
	#[test]
	fn test_child()
	{
		let root = Rc::new(SearchState::root(Grid::from_cells(&[1, 2, 4, 3]).unwrap()));
		let child = SearchState::child(&root, Move::Left).unwrap();
		assert_eq!(child.last_move(), Some(Move::Left));
		assert!(Rc::ptr_eq(child.previous().unwrap(), &root));
		assert_eq!(child.cost(), 0);
		assert!(child.is_goal());
		assert_eq!(child.path(), vec![Move::Left]);
		assert_eq!(
			SearchState::child(&root, Move::Up).unwrap_err(),
			GridError::OutOfBounds { direction: Move::Up, blank: (1, 0) }
		);
		let successors = SearchState::successors(&root)
			.map(|s| s.last_move().unwrap())
			.collect::<Vec<_>>();
		assert_eq!(successors, vec![Move::Left, Move::Down]);
	}

	/// Ensure that identity ignores history: the same arrangement reached by
	/// different paths compares equal and hashes alike.
	#[test]
	fn test_identity()
	{
		let grid = Grid::goal(3).unwrap();
		let root = Rc::new(SearchState::root(grid.clone()));
		// Down then Up returns to the root arrangement.
		let down = Rc::new(SearchState::child(&root, Move::Down).unwrap());
		let back = SearchState::child(&down, Move::Up).unwrap();
		assert_eq!(back.grid(), &grid);
		assert_eq!(back.path(), vec![Move::Down, Move::Up]);
		assert_eq!(*root, back);
		assert_eq!(hash_of(&root), hash_of(&back));
		assert_ne!(*root, *down);

		let mut visited = HashSet::new();
		assert!(visited.insert(Rc::clone(&root)));
		assert!(!visited.insert(Rc::new(back)));
		assert!(visited.insert(down));
		assert_eq!(visited.len(), 2);
	}

	/// Ensure that the frontier pops the cheapest state first, and the earliest
	/// inserted among equals.
	#[test]
	fn test_ranking()
	{
		let states: [[u16; 9]; 4] = [
			[1, 2, 3, 4, 5, 6, 7, 9, 8],
			[1, 2, 3, 4, 9, 6, 7, 5, 8],
			[1, 2, 3, 4, 5, 6, 9, 7, 8],
			[1, 2, 3, 4, 5, 9, 7, 8, 6]
		];
		let mut heap = BinaryHeap::new();
		for (sequence, cells) in states.iter().enumerate()
		{
			let state = SearchState::root(Grid::from_cells(cells).unwrap());
			heap.push(Ranked::new(Rc::new(state), sequence as u64));
		}
		let order = std::iter::from_fn(|| heap.pop())
			.map(|r| (r.state().cost(), r.into_state().grid().blank()))
			.collect::<Vec<_>>();
		assert_eq!(
			order,
			vec![(1, (2, 1)), (1, (1, 2)), (2, (1, 1)), (2, (2, 0))]
		);
	}

	/// Ensure that dropping a long history does not exhaust the stack.
	#[test]
	fn test_long_history()
	{
		let mut state = Rc::new(SearchState::root(Grid::goal(2).unwrap()));
		// Twelve moves around the square rotate the tiles back into place.
		let cycle = [Move::Down, Move::Right, Move::Up, Move::Left];
		for m in cycle.iter().cycle().take(120_000)
		{
			state = Rc::new(SearchState::child(&state, *m).unwrap());
		}
		assert!(state.is_goal());
		assert_eq!(state.path().len(), 120_000);
		drop(state);
	}

	/// Ensure that formatting a long history reports its depth instead of
	/// walking it recursively.
	#[test]
	fn test_debug_long_history()
	{
		let mut state = Rc::new(SearchState::root(Grid::goal(2).unwrap()));
		let cycle = [Move::Down, Move::Right, Move::Up, Move::Left];
		for m in cycle.iter().cycle().take(120_000)
		{
			state = Rc::new(SearchState::child(&state, *m).unwrap());
		}
		assert_eq!(state.depth(), 120_000);
		let text = format!("{:?}", state);
		assert!(text.starts_with("SearchState {"), "{}", text);
		assert!(text.contains("last_move: Some(Left)"), "{}", text);
		assert!(text.contains("depth: 120000"), "{}", text);
		assert_eq!(text.matches("SearchState").count(), 1);
		let ranked = format!("{:?}", Ranked::new(state, 0));
		assert!(ranked.contains("depth: 120000"));
	}
}
