use std::iter::FusedIterator;

use log::debug;
use rand::Rng;
use serde::Serialize;

use super::prefix::Prefix;
use super::state_store::StateStore;
use super::token::{Token, Word};
use crate::error::MarkovError;

/// Why a generation stopped.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stop {
	/// The sentinel was drawn: the walk reached an end of the training text.
	EndOfText,
	/// The word cap was reached before any sentinel was drawn.
	WordCap,
	/// The walk hit a prefix missing from the store.
	Inconsistent,
}

/// Generation state machine.
///
/// Each call to `next` goes `AwaitingState → sampling → emit`, staying in
/// `AwaitingState`, or moves to `Finished` for good.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	AwaitingState,
	Finished(Stop),
}

/// Lazy walk over a built [`StateStore`].
///
/// # Responsibilities
/// - Start from the all-sentinel prefix
/// - At every step, reservoir-sample a suffix of the current state
/// - Emit real words and slide the prefix; stop on the sentinel
///
/// The sequence is finite and non-restartable: it is capped at
/// `max_words` items and fuses after the sentinel, the cap or an error.
/// The sentinel itself is never emitted.
pub struct Generator<'a, R> {
	store: &'a StateStore,
	prefix: Prefix,
	rng: R,
	max_words: usize,
	emitted: usize,
	phase: Phase,
}

/// Collected output of one generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
	pub words: Vec<Word>,
	pub stop: Stop,
}

impl Generation {
	/// Number of emitted words.
	pub fn count(&self) -> usize {
		self.words.len()
	}
}

impl<'a, R: Rng> Generator<'a, R> {
	/// Prepares a walk over `store`, whose prefixes hold `prefix_length` tokens.
	pub fn new(store: &'a StateStore, prefix_length: usize, max_words: usize, rng: R) -> Self {
		Self {
			store,
			prefix: Prefix::start(prefix_length),
			rng,
			max_words,
			emitted: 0,
			phase: Phase::AwaitingState,
		}
	}

	/// Words emitted so far.
	pub fn emitted(&self) -> usize {
		self.emitted
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	fn finish(&mut self, stop: Stop) {
		debug!("generation stopped after {} words: {stop:?}", self.emitted);
		self.phase = Phase::Finished(stop);
	}

	fn inconsistency(&mut self) -> MarkovError {
		self.finish(Stop::Inconsistent);
		MarkovError::ModelInconsistency { prefix: self.prefix.to_string() }
	}

	/// Drains the walk into a [`Generation`].
	///
	/// # Errors
	/// Returns [`MarkovError::ModelInconsistency`] if the walk reaches a
	/// prefix the store does not know.
	pub fn run(mut self) -> Result<Generation, MarkovError> {
		let mut words = Vec::new();
		for word in self.by_ref() {
			words.push(word?);
		}
		let stop = match self.phase {
			Phase::Finished(stop) => stop,
			Phase::AwaitingState => Stop::EndOfText,
		};
		Ok(Generation { words, stop })
	}
}

impl<R: Rng> Iterator for Generator<'_, R> {
	type Item = Result<Word, MarkovError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.phase != Phase::AwaitingState {
			return None;
		}
		if self.emitted >= self.max_words {
			self.finish(Stop::WordCap);
			return None;
		}

		let store = self.store;
		let Some(id) = store.find(&self.prefix) else {
			// Nothing was ever built: an empty model, not a broken one.
			if store.is_empty() {
				self.finish(Stop::EndOfText);
				return None;
			}
			return Some(Err(self.inconsistency()));
		};

		match store.get(id).predict(&mut self.rng) {
			Some(Token::Word(word)) => {
				let word = word.clone();
				self.prefix.slide(Token::Word(word.clone()));
				self.emitted += 1;
				Some(Ok(word))
			}
			Some(Token::Sentinel) => {
				self.finish(Stop::EndOfText);
				None
			}
			// A state without suffixes is never produced by the builder.
			None => Some(Err(self.inconsistency())),
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		match self.phase {
			Phase::AwaitingState => (0, Some(self.max_words - self.emitted)),
			Phase::Finished(_) => (0, Some(0)),
		}
	}
}

impl<R: Rng> FusedIterator for Generator<'_, R> {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::builder::Builder;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn built(text: &str, prefix_length: usize) -> StateStore {
		let mut store = StateStore::new(4093);
		let mut builder = Builder::new(&mut store, prefix_length, None);
		builder.build(text.split_whitespace());
		builder.finish();
		store
	}

	fn rng() -> StdRng {
		StdRng::seed_from_u64(0xC0FFEE)
	}

	#[test]
	fn linear_text_is_reproduced() {
		let store = built("one two three four", 3);
		let generation = Generator::new(&store, 3, 100, rng()).run().unwrap();
		let words: Vec<&str> = generation.words.iter().map(|w| &**w).collect();
		assert_eq!(words, ["one", "two", "three", "four"]);
		assert_eq!(generation.count(), 4);
		assert_eq!(generation.stop, Stop::EndOfText);
	}

	#[test]
	fn empty_input_generates_nothing() {
		let store = built("", 3);
		let generation = Generator::new(&store, 3, 100, rng()).run().unwrap();
		assert!(generation.words.is_empty());
		assert_eq!(generation.stop, Stop::EndOfText);
	}

	#[test]
	fn never_built_store_generates_nothing() {
		let store = StateStore::new(4093);
		let mut generator = Generator::new(&store, 2, 100, rng());
		assert!(generator.next().is_none());
		assert_eq!(generator.phase(), Phase::Finished(Stop::EndOfText));
	}

	#[test]
	fn cycle_without_sentinel_is_capped() {
		// start -> a, a -> a: the sentinel is unreachable.
		let mut store = StateStore::new(13);
		let start = store.find_or_insert(&Prefix::start(1));
		store.add_suffix(start, "a".into());
		let a = store.find_or_insert(&Prefix::from_tokens(vec!["a".into()]));
		store.add_suffix(a, "a".into());

		let generation = Generator::new(&store, 1, 25, rng()).run().unwrap();
		assert_eq!(generation.count(), 25);
		assert_eq!(generation.stop, Stop::WordCap);
	}

	#[test]
	fn zero_cap_emits_nothing() {
		let store = built("a b c", 1);
		let generation = Generator::new(&store, 1, 0, rng()).run().unwrap();
		assert_eq!(generation.count(), 0);
		assert_eq!(generation.stop, Stop::WordCap);
	}

	#[test]
	fn missing_prefix_is_an_inconsistency() {
		// start -> a, but no state for [a].
		let mut store = StateStore::new(13);
		let start = store.find_or_insert(&Prefix::start(1));
		store.add_suffix(start, "a".into());

		let mut generator = Generator::new(&store, 1, 10, rng());
		assert_eq!(generator.next().unwrap().unwrap().as_ref(), "a");
		match generator.next() {
			Some(Err(MarkovError::ModelInconsistency { prefix })) => assert_eq!(prefix, "a"),
			other => panic!("expected an inconsistency, got {other:?}"),
		}
		assert!(generator.next().is_none());
		assert_eq!(generator.emitted(), 1);

		let err = Generator::new(&store, 1, 10, rng()).run().unwrap_err();
		assert!(matches!(err, MarkovError::ModelInconsistency { .. }));
	}

	#[test]
	fn alternating_model_never_emits_the_sentinel() {
		let store = built("a b a b a b", 1);
		for seed in 0..50 {
			let generation = Generator::new(&store, 1, 10_000, StdRng::seed_from_u64(seed))
				.run()
				.unwrap();
			assert_eq!(generation.stop, Stop::EndOfText);
			assert!(generation.count() >= 2);
			// Odd positions are always "b" because [a] only ever leads to b.
			for (i, word) in generation.words.iter().enumerate() {
				let expected = if i % 2 == 0 { "a" } else { "b" };
				assert_eq!(&**word, expected);
			}
			// The walk can only end after a "b".
			assert_eq!(generation.count() % 2, 0);
		}
	}

	#[test]
	fn same_seed_same_output() {
		let store = built("the cat sat on the mat and the cat ran off the mat", 1);
		let first = Generator::new(&store, 1, 500, StdRng::seed_from_u64(3)).run().unwrap();
		let second = Generator::new(&store, 1, 500, StdRng::seed_from_u64(3)).run().unwrap();
		assert_eq!(first, second);
	}
}
