use std::io::BufRead;

use log::debug;
use rand::Rng;

use super::builder::Builder;
use super::generator::{Generation, Generator};
use super::state_store::StateStore;
use crate::config::Config;
use crate::error::MarkovError;
use crate::io::tokens;

/// A word-level Markov chain: one configuration, one state store.
///
/// Each instance is independent, so several models may coexist in one
/// process. Use is strictly phased: train exactly once, then generate as
/// many times as needed. Generation only borrows the store immutably.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rs_markov_core::{Config, MarkovChain};
///
/// let mut chain = MarkovChain::new(Config { prefix_length: 1, ..Config::default() })?;
/// chain.train("a b a b a b".split(' '))?;
/// let generation = chain.generate(StdRng::seed_from_u64(1))?;
/// assert!(generation.words.iter().all(|w| &**w == "a" || &**w == "b"));
/// # Ok::<(), rs_markov_core::MarkovError>(())
/// ```
#[derive(Debug)]
pub struct MarkovChain {
	config: Config,
	store: StateStore,
	trained: bool,
}

impl MarkovChain {
	/// Creates an untrained chain.
	///
	/// # Errors
	/// Returns [`MarkovError::Config`] if `config` is invalid.
	pub fn new(config: Config) -> Result<Self, MarkovError> {
		config.validate()?;
		Ok(Self {
			store: StateStore::new(config.bucket_count),
			config,
			trained: false,
		})
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn store(&self) -> &StateStore {
		&self.store
	}

	pub fn is_trained(&self) -> bool {
		self.trained
	}

	fn builder(&mut self) -> Result<Builder<'_>, MarkovError> {
		if self.trained {
			return Err(MarkovError::AlreadyTrained);
		}
		self.trained = true;
		Ok(Builder::from_config(&mut self.store, &self.config))
	}

	/// Runs the whole build phase over `tokens`, ending with the sentinel
	/// transition. Returns the number of words read.
	///
	/// # Errors
	/// Returns [`MarkovError::AlreadyTrained`] on a second call.
	pub fn train<I, S>(&mut self, tokens: I) -> Result<usize, MarkovError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut builder = self.builder()?;
		builder.build(tokens);
		let words = builder.finish();
		debug!("store after build: {:?}", self.store.stats());
		Ok(words)
	}

	/// Like [`MarkovChain::train`], reading whitespace-delimited tokens from `reader`.
	///
	/// # Errors
	/// Returns [`MarkovError::Io`] on the first read failure, or
	/// [`MarkovError::AlreadyTrained`] on a second call. After a read
	/// failure the chain is left trained on a partial corpus and should
	/// be discarded.
	pub fn train_reader<R: BufRead>(&mut self, reader: R) -> Result<usize, MarkovError> {
		let mut builder = self.builder()?;
		for token in tokens(reader) {
			builder.add_word(&token?);
		}
		let words = builder.finish();
		debug!("store after build: {:?}", self.store.stats());
		Ok(words)
	}

	/// Starts a lazy generation walk capped at `max_generated_words`.
	pub fn generator<R: Rng>(&self, rng: R) -> Generator<'_, R> {
		Generator::new(&self.store, self.config.prefix_length, self.config.max_generated_words, rng)
	}

	/// Generates a full sequence of words.
	///
	/// An untrained chain, like one trained on empty input, yields no words.
	///
	/// # Errors
	/// Returns [`MarkovError::ModelInconsistency`] if the walk reaches an
	/// unknown prefix.
	pub fn generate<R: Rng>(&self, rng: R) -> Result<Generation, MarkovError> {
		self.generator(rng).run()
	}
}
