use std::fmt;
use std::rc::Rc;

/// An immutable word, shared by every prefix slot and suffix entry that
/// refers to it. Equality and hashing are by content.
pub type Word = Rc<str>;

/// Bytes the sentinel contributes to a prefix hash.
///
/// A newline never survives whitespace tokenization, so no real word
/// hashes the same way by construction.
const SENTINEL_BYTES: &[u8] = b"\n";

/// One slot of a prefix, or one observed suffix.
///
/// `Sentinel` marks both start-of-text and end-of-text. Being its own
/// variant, it can never compare equal to a real word, whatever the input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
	Sentinel,
	Word(Word),
}

impl Token {
	/// Creates a word token, copying `text` into a new shared allocation.
	pub fn word(text: &str) -> Self {
		Token::Word(Rc::from(text))
	}

	pub fn is_sentinel(&self) -> bool {
		matches!(self, Token::Sentinel)
	}

	/// Returns the word, or `None` for the sentinel.
	pub fn as_word(&self) -> Option<&Word> {
		match self {
			Token::Word(word) => Some(word),
			Token::Sentinel => None,
		}
	}

	/// Bytes fed to the prefix hash for this token.
	pub(crate) fn hash_bytes(&self) -> &[u8] {
		match self {
			Token::Word(word) => word.as_bytes(),
			Token::Sentinel => SENTINEL_BYTES,
		}
	}
}

impl From<&str> for Token {
	fn from(text: &str) -> Self {
		Token::word(text)
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Word(word) => f.write_str(word),
			Token::Sentinel => f.write_str("<sentinel>"),
		}
	}
}
