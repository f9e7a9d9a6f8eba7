use std::fmt;

use super::token::Token;

/// An ordered, fixed-length window of tokens used as a lookup key.
///
/// Two prefixes are equal iff every position holds an equal token.
/// The length never changes after construction; [`Prefix::slide`] only
/// moves tokens through the window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefix {
	tokens: Box<[Token]>,
}

impl Prefix {
	/// A prefix of `len` sentinels, the "start of text" state.
	pub fn start(len: usize) -> Self {
		Self { tokens: vec![Token::Sentinel; len].into_boxed_slice() }
	}

	/// Builds a prefix from explicit tokens (its length is `tokens.len()`).
	pub fn from_tokens(tokens: Vec<Token>) -> Self {
		Self { tokens: tokens.into_boxed_slice() }
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	/// Drops the oldest token, shifts the rest one slot earlier and
	/// places `next` in the last slot.
	pub fn slide(&mut self, next: Token) {
		if let Some(last) = self.tokens.len().checked_sub(1) {
			self.tokens.rotate_left(1);
			self.tokens[last] = next;
		}
	}
}

impl fmt::Display for Prefix {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, token) in self.tokens.iter().enumerate() {
			if i > 0 {
				f.write_str(" ")?;
			}
			write!(f, "{token}")?;
		}
		Ok(())
	}
}
