//! Error types for model configuration, building and generation.

use thiserror::Error;

/// Errors raised while validating a [`crate::Config`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
	/// A prefix must hold at least one word.
	#[error("prefix length must be at least 1")]
	ZeroPrefixLength,

	/// The state table needs at least one bucket.
	#[error("bucket count must be at least 1")]
	ZeroBucketCount,

	/// A token bound of zero would erase every word.
	#[error("maximum token length must be at least 1 (use no bound to disable truncation)")]
	ZeroTokenLength,
}

/// Errors raised by [`crate::MarkovChain`] and its components.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// Generation reached a prefix that was never recorded.
	///
	/// Unreachable for a store seeded by a complete build phase
	/// (sentinel-primed start, sentinel-terminated end).
	#[error("model inconsistency: no state for prefix [{prefix}]")]
	ModelInconsistency { prefix: String },

	/// The configuration was rejected.
	#[error("invalid configuration: {0}")]
	Config(#[from] ConfigError),

	/// Reading the token source failed.
	#[error("failed to read tokens: {0}")]
	Io(#[from] std::io::Error),

	/// The build phase already ran; a chain is trained exactly once.
	#[error("model already trained")]
	AlreadyTrained,
}
