//! Core Markov model and generation logic.
//!
//! Components, leaf first:
//! - Tokens and fixed-length prefixes (`Token`, `Prefix`)
//! - Prefix hashing into buckets (`prefix_hash`)
//! - The bucketed state table (`StateStore`, `State`)
//! - Model construction (`Builder`)
//! - Reservoir sampling and generation (`reservoir_pick`, `Generator`)
//! - A facade owning one model (`MarkovChain`)

/// Words and the start/end sentinel.
pub mod token;

/// Fixed-length sliding window of tokens used as a lookup key.
pub mod prefix;

/// Deterministic, order-sensitive hash of a prefix into a bucket range.
pub mod hash;

/// A single prefix with its observed suffixes.
pub mod state;

/// Hash table of states with structural-equality lookups.
pub mod state_store;

/// Fills a state store from a token stream.
pub mod builder;

/// Single-pass uniform selection over sequences of unknown length.
pub mod sampler;

/// Lazy random walk over a built state store.
pub mod generator;

/// Owns one model and enforces the build-then-generate phasing.
pub mod markov_chain;
