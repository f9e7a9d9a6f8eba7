//! Word-level Markov chain text generation library.
//!
//! This crate provides a prefix/suffix Markov model over whitespace-delimited
//! words, including:
//! - A bucketed, structurally-keyed state store
//! - A builder that slides a fixed-length prefix window over a token stream
//! - A lazy generator using single-pass reservoir sampling
//! - Token reading helpers for any buffered reader
//!
//! The usual entry point is [`MarkovChain`]: train it once, then generate.

/// Core Markov model: tokens, prefixes, the state store, building and generation.
pub mod model;

/// Model configuration and its validation.
pub mod config;

/// Error types shared by the whole crate.
pub mod error;

/// Token reading helpers (whitespace splitting, input opening).
pub mod io;

pub use config::Config;
pub use error::{ConfigError, MarkovError};
pub use model::generator::{Generation, Generator};
pub use model::markov_chain::MarkovChain;
pub use model::token::{Token, Word};
