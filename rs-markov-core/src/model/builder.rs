use log::{debug, trace};

use super::prefix::Prefix;
use super::state_store::StateStore;
use super::token::Token;
use crate::config::Config;

/// Populates a [`StateStore`] from a token stream.
///
/// The builder owns the sliding prefix window. It starts as `N` sentinels,
/// so the very first state represents "start of text", and every
/// [`Builder::add`] records one transition then slides the window.
///
/// The build phase ends with [`Builder::finish`], which records the final
/// transition to the sentinel. Without it, generation cannot detect the end
/// of the corpus.
pub struct Builder<'a> {
	store: &'a mut StateStore,
	prefix: Prefix,
	max_token_length: Option<usize>,
	added: usize,
	truncated: usize,
}

impl<'a> Builder<'a> {
	/// Starts a build phase over `store` with `prefix_length`-word prefixes.
	pub fn new(store: &'a mut StateStore, prefix_length: usize, max_token_length: Option<usize>) -> Self {
		Self {
			store,
			prefix: Prefix::start(prefix_length),
			max_token_length,
			added: 0,
			truncated: 0,
		}
	}

	pub fn from_config(store: &'a mut StateStore, config: &Config) -> Self {
		Self::new(store, config.prefix_length, config.max_token_length)
	}

	/// The current prefix window.
	pub fn prefix(&self) -> &Prefix {
		&self.prefix
	}

	/// Records `next` as a suffix of the current prefix, then slides the
	/// window so that `next` occupies its last slot.
	pub fn add(&mut self, next: Token) {
		let id = self.store.find_or_insert(&self.prefix);
		self.store.add_suffix(id, next.clone());
		self.prefix.slide(next);
		self.added += 1;
	}

	/// Adds a raw word, truncated to the configured maximum length.
	///
	/// Truncation happens on a character boundary and is silent apart from
	/// a trace log; it is a documented limitation, not an error.
	pub fn add_word(&mut self, word: &str) {
		let kept = match self.max_token_length {
			Some(max) => truncate_chars(word, max),
			None => word,
		};
		if kept.len() < word.len() {
			self.truncated += 1;
			trace!("token truncated to {} bytes: {kept}", kept.len());
		}
		self.add(Token::word(kept));
	}

	/// Feeds every token of `tokens` through [`Builder::add_word`].
	pub fn build<I, S>(&mut self, tokens: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for token in tokens {
			self.add_word(token.as_ref());
		}
	}

	/// Ends the build phase with the transition back to the sentinel.
	///
	/// Returns the number of real words that were added.
	pub fn finish(mut self) -> usize {
		let words = self.added;
		self.add(Token::Sentinel);
		debug!(
			"build finished: {words} words, {} truncated, {} states",
			self.truncated,
			self.store.len()
		);
		words
	}
}

/// Returns the longest prefix of `word` holding at most `max` characters.
fn truncate_chars(word: &str, max: usize) -> &str {
	match word.char_indices().nth(max) {
		Some((end, _)) => &word[..end],
		None => word,
	}
}
