use rand::Rng;

use super::prefix::Prefix;
use super::sampler::reservoir_pick;
use super::token::Token;

/// Index of a [`State`] inside the [`super::state_store::StateStore`] arena.
///
/// Only meaningful for the store that handed it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateId(pub(crate) usize);

impl StateId {
	pub fn index(self) -> usize {
		self.0
	}
}

/// Represents a state of the word-level Markov chain.
///
/// A `State` pairs one [`Prefix`] with every suffix observed right after it
/// in the training text. Duplicate suffixes are kept as separate entries,
/// so a word seen `k` times out of `m` is drawn with probability `k / m`.
///
/// ## Responsibilities:
/// - Accumulate suffix entries during the build phase
/// - Pick the next token by reservoir sampling during generation
///
/// ## Invariants
/// - The prefix never changes after creation
/// - Suffix entries are only appended, never removed or rewritten
/// - Suffixes are traversed newest first
#[derive(Clone, Debug)]
pub struct State {
	/// Lookup key of the state.
	prefix: Prefix,
	/// Observed suffixes, in insertion order.
	suffixes: Vec<Token>,
	/// Next state of the same bucket chain.
	pub(crate) next_in_bucket: Option<StateId>,
}

impl State {
	/// Creates a state with no suffixes, linked in front of `next_in_bucket`.
	pub(crate) fn new(prefix: Prefix, next_in_bucket: Option<StateId>) -> Self {
		Self {
			prefix,
			suffixes: Vec::new(),
			next_in_bucket,
		}
	}

	pub fn prefix(&self) -> &Prefix {
		&self.prefix
	}

	/// Suffix entries in traversal order (most recently added first).
	pub fn suffixes(&self) -> impl ExactSizeIterator<Item = &Token> + DoubleEndedIterator {
		self.suffixes.iter().rev()
	}

	pub fn suffix_count(&self) -> usize {
		self.suffixes.len()
	}

	/// Records one more occurrence of `suffix` after this prefix.
	pub(crate) fn add_suffix(&mut self, suffix: Token) {
		self.suffixes.push(suffix);
	}

	/// Picks the next token uniformly among the suffix entries.
	///
	/// Performs a single pass over the entries with O(1) extra memory.
	/// Returns `None` if the state has no suffixes.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
		reservoir_pick(self.suffixes(), rng)
	}
}
