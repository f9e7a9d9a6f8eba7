use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Streams whitespace-delimited tokens from a buffered reader.
///
/// - Reads one line at a time, never the whole input
/// - Splits on any Unicode whitespace; empty tokens are never produced
/// - Invalid UTF-8 is replaced lossily rather than rejected
///
/// The first I/O error is yielded as an `Err` item; callers are expected
/// to stop there.
pub fn tokens<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
	reader.split(b'\n').flat_map(|line| {
		let words: Vec<io::Result<String>> = match line {
			Ok(bytes) => String::from_utf8_lossy(&bytes)
				.split_whitespace()
				.map(|word| Ok(word.to_owned()))
				.collect(),
			Err(e) => vec![Err(e)],
		};
		words
	})
}

/// Opens the token source.
///
/// `None` or `"-"` selects standard input, anything else is opened as a file.
///
/// # Errors
/// Returns an error if the file cannot be opened.
pub fn open_input<P: AsRef<Path>>(path: Option<P>) -> io::Result<Box<dyn BufRead>> {
	match path {
		Some(path) if path.as_ref() != Path::new("-") => {
			Ok(Box::new(BufReader::new(File::open(path)?)))
		}
		_ => Ok(Box::new(BufReader::new(io::stdin()))),
	}
}
