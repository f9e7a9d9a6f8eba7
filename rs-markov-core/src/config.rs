use serde::Serialize;

use crate::error::ConfigError;

/// Default number of words per prefix.
pub const DEFAULT_PREFIX_LENGTH: usize = 3;

/// Default size of the state table. Not close to a power of two.
pub const DEFAULT_BUCKET_COUNT: usize = 4093;

/// Default hard cap on generated words.
pub const DEFAULT_MAX_GENERATED_WORDS: usize = 10_000;

/// Default bound on a single token, in characters.
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 99;

/// Startup parameters of a Markov model.
///
/// Values are fixed once a [`crate::MarkovChain`] is created; there is no
/// reconfiguration mid-run.
///
/// # Invariants (checked by [`Config::validate`])
/// - `prefix_length >= 1`
/// - `bucket_count >= 1`
/// - `max_token_length`, when set, is `>= 1`
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
	/// Number of words in a prefix (the Markov order).
	pub prefix_length: usize,

	/// Number of buckets in the state table.
	pub bucket_count: usize,

	/// Maximum number of words a single generation may emit.
	pub max_generated_words: usize,

	/// Tokens longer than this many characters are truncated.
	/// `None` keeps every token whole.
	pub max_token_length: Option<usize>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			prefix_length: DEFAULT_PREFIX_LENGTH,
			bucket_count: DEFAULT_BUCKET_COUNT,
			max_generated_words: DEFAULT_MAX_GENERATED_WORDS,
			max_token_length: Some(DEFAULT_MAX_TOKEN_LENGTH),
		}
	}
}

impl Config {
	/// Checks the invariants listed on the type.
	///
	/// # Errors
	/// Returns the first violated invariant.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.prefix_length == 0 {
			return Err(ConfigError::ZeroPrefixLength);
		}
		if self.bucket_count == 0 {
			return Err(ConfigError::ZeroBucketCount);
		}
		if self.max_token_length == Some(0) {
			return Err(ConfigError::ZeroTokenLength);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_legacy_constants() {
		let config = Config::default();
		assert_eq!(config.prefix_length, 3);
		assert_eq!(config.bucket_count, 4093);
		assert_eq!(config.max_generated_words, 10_000);
		assert_eq!(config.max_token_length, Some(99));
		assert_eq!(config.validate(), Ok(()));
	}

	#[test]
	fn rejects_degenerate_values() {
		let config = Config { prefix_length: 0, ..Config::default() };
		assert_eq!(config.validate(), Err(ConfigError::ZeroPrefixLength));

		let config = Config { bucket_count: 0, ..Config::default() };
		assert_eq!(config.validate(), Err(ConfigError::ZeroBucketCount));

		let config = Config { max_token_length: Some(0), ..Config::default() };
		assert_eq!(config.validate(), Err(ConfigError::ZeroTokenLength));

		let config = Config { max_token_length: None, max_generated_words: 0, ..Config::default() };
		assert_eq!(config.validate(), Ok(()));
	}
}
