use std::iter;

use log::trace;
use serde::Serialize;

use super::hash::prefix_hash;
use super::prefix::Prefix;
use super::state::{State, StateId};
use super::token::Token;

/// Bucketed hash table mapping prefixes to their [`State`].
///
/// States live in an arena and are addressed by [`StateId`]. Each bucket
/// holds the id of the most recently inserted state whose prefix hashes
/// there; states of one bucket are chained through `next_in_bucket`.
///
/// # Responsibilities
/// - Place prefixes into buckets with [`prefix_hash`]
/// - Resolve collisions by positional equality of prefixes
/// - Create states lazily, on first encounter during the build phase
///
/// # Invariants
/// - At most one state per distinct prefix
/// - No state is ever removed; the store is dropped as a whole
#[derive(Clone, Debug)]
pub struct StateStore {
	/// Head of each bucket chain.
	buckets: Box<[Option<StateId>]>,
	/// Arena of every state, in creation order.
	states: Vec<State>,
}

/// Occupancy figures of a [`StateStore`], for diagnostics.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
	pub states: usize,
	pub suffixes: usize,
	pub occupied_buckets: usize,
	pub longest_chain: usize,
}

impl StateStore {
	/// Creates an empty store with `bucket_count` buckets.
	///
	/// # Panics
	/// Panics if `bucket_count` is zero.
	pub fn new(bucket_count: usize) -> Self {
		assert!(bucket_count > 0, "state store needs at least one bucket");
		Self {
			buckets: vec![None; bucket_count].into_boxed_slice(),
			states: Vec::new(),
		}
	}

	pub fn bucket_count(&self) -> usize {
		self.buckets.len()
	}

	/// Number of distinct prefixes stored.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	fn bucket_of(&self, prefix: &Prefix) -> usize {
		prefix_hash(prefix.tokens(), self.buckets.len())
	}

	/// Walks the chain of `bucket`, newest state first.
	fn chain(&self, bucket: usize) -> impl Iterator<Item = StateId> + '_ {
		iter::successors(self.buckets[bucket], |id| self.states[id.0].next_in_bucket)
	}

	fn find_in(&self, bucket: usize, prefix: &Prefix) -> Option<StateId> {
		self.chain(bucket).find(|id| self.states[id.0].prefix() == prefix)
	}

	/// Finds the state of `prefix` without ever creating one.
	pub fn find(&self, prefix: &Prefix) -> Option<StateId> {
		self.find_in(self.bucket_of(prefix), prefix)
	}

	/// Finds the state of `prefix`, creating an empty one if absent.
	///
	/// This is the only operation that grows the store.
	pub fn find_or_insert(&mut self, prefix: &Prefix) -> StateId {
		let bucket = self.bucket_of(prefix);
		if let Some(id) = self.find_in(bucket, prefix) {
			return id;
		}

		let id = StateId(self.states.len());
		self.states.push(State::new(prefix.clone(), self.buckets[bucket]));
		self.buckets[bucket] = Some(id);
		trace!("new state #{} in bucket {bucket}: [{prefix}]", id.0);
		id
	}

	/// Looks `prefix` up, creating its state when `create` is set.
	///
	/// Returns `None` only when the prefix is absent and `create` is false.
	pub fn lookup(&mut self, prefix: &Prefix, create: bool) -> Option<StateId> {
		if create {
			Some(self.find_or_insert(prefix))
		} else {
			self.find(prefix)
		}
	}

	/// Returns the state behind `id`.
	///
	/// # Panics
	/// Panics if `id` was not handed out by this store.
	pub fn get(&self, id: StateId) -> &State {
		&self.states[id.0]
	}

	/// Convenience read-only lookup returning the state itself.
	pub fn state(&self, prefix: &Prefix) -> Option<&State> {
		self.find(prefix).map(|id| self.get(id))
	}

	/// Appends a suffix entry to the state behind `id`.
	pub fn add_suffix(&mut self, id: StateId, suffix: Token) {
		self.states[id.0].add_suffix(suffix);
	}

	/// Iterates over every state, in creation order.
	pub fn states(&self) -> impl Iterator<Item = &State> {
		self.states.iter()
	}

	pub fn stats(&self) -> StoreStats {
		let mut stats = StoreStats {
			states: self.states.len(),
			suffixes: self.states.iter().map(State::suffix_count).sum(),
			..StoreStats::default()
		};
		for bucket in 0..self.buckets.len() {
			let chain = self.chain(bucket).count();
			if chain > 0 {
				stats.occupied_buckets += 1;
				stats.longest_chain = stats.longest_chain.max(chain);
			}
		}
		stats
	}
}
