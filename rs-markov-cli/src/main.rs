use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use rs_markov_core::config::{
	DEFAULT_BUCKET_COUNT, DEFAULT_MAX_GENERATED_WORDS, DEFAULT_MAX_TOKEN_LENGTH, DEFAULT_PREFIX_LENGTH,
};
use rs_markov_core::io::open_input;
use rs_markov_core::model::generator::Stop;
use rs_markov_core::model::state_store::StoreStats;
use rs_markov_core::{Config, Generation, MarkovChain};

#[derive(Parser)]
#[command(name = "rs-markov")]
#[command(about = "Generate random text from a word-level Markov chain")]
struct Cli {
	/// Training text (standard input when omitted or "-")
	input: Option<PathBuf>,

	/// Number of words per prefix
	#[arg(short = 'n', long, default_value_t = DEFAULT_PREFIX_LENGTH)]
	prefix_length: usize,

	/// Size of the state hash table
	#[arg(short, long, default_value_t = DEFAULT_BUCKET_COUNT)]
	buckets: usize,

	/// Hard cap on generated words
	#[arg(short, long, default_value_t = DEFAULT_MAX_GENERATED_WORDS)]
	max_words: usize,

	/// Truncate longer tokens to this many characters (0 keeps tokens whole)
	#[arg(short = 't', long, default_value_t = DEFAULT_MAX_TOKEN_LENGTH)]
	max_token_length: usize,

	/// Seed for reproducible output
	#[arg(short, long)]
	seed: Option<u64>,

	/// Output format
	#[arg(short, long, value_enum, default_value_t = Format::Text)]
	format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
	/// Words separated by spaces, then the word count
	Text,
	/// A single JSON object
	Json,
}

/// JSON output of one run.
#[derive(Serialize)]
struct Report<'a> {
	words: Vec<&'a str>,
	count: usize,
	stop: Stop,
	config: &'a Config,
	store: StoreStats,
}

impl Cli {
	fn config(&self) -> Config {
		Config {
			prefix_length: self.prefix_length,
			bucket_count: self.buckets,
			max_generated_words: self.max_words,
			max_token_length: (self.max_token_length > 0).then_some(self.max_token_length),
		}
	}
}

fn write_text<W: Write>(out: &mut W, generation: &Generation) -> io::Result<()> {
	for word in &generation.words {
		write!(out, "{word} ")?;
	}
	writeln!(out, "\nString Length = {}", generation.count())
}

fn write_json<W: Write>(out: &mut W, chain: &MarkovChain, generation: &Generation) -> Result<()> {
	let report = Report {
		words: generation.words.iter().map(|w| &**w).collect(),
		count: generation.count(),
		stop: generation.stop,
		config: chain.config(),
		store: chain.store().stats(),
	};
	serde_json::to_writer_pretty(&mut *out, &report)?;
	writeln!(out)?;
	Ok(())
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	let cli = Cli::parse();

	let mut chain = MarkovChain::new(cli.config())?;
	let input = open_input(cli.input.as_ref())
		.with_context(|| format!("Failed to open {}", cli.input.as_ref().map_or("stdin".into(), |p| p.display().to_string())))?;
	let words = chain.train_reader(input).context("Failed to build the model")?;
	info!("trained on {words} words: {:?}", chain.store().stats());

	let rng = match cli.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_rng(&mut rand::rng()),
	};
	let generation = chain.generate(rng).context("Failed to generate text")?;
	info!("generated {} words ({:?})", generation.count(), generation.stop);

	let stdout = io::stdout();
	let mut out = BufWriter::new(stdout.lock());
	match cli.format {
		Format::Text => write_text(&mut out, &generation)?,
		Format::Json => write_json(&mut out, &chain, &generation)?,
	}
	out.flush()?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn generation(words: &[&str]) -> Generation {
		Generation {
			words: words.iter().map(|w| (*w).into()).collect(),
			stop: Stop::EndOfText,
		}
	}

	#[test]
	fn text_output_ends_with_the_count() {
		let mut out = Vec::new();
		write_text(&mut out, &generation(&["a", "b"])).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "a b \nString Length = 2\n");
	}

	#[test]
	fn json_output_reports_words_and_config() {
		let mut chain = MarkovChain::new(Config::default()).unwrap();
		chain.train(["x", "y"]).unwrap();
		let mut out = Vec::new();
		write_json(&mut out, &chain, &generation(&["x", "y"])).unwrap();

		let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
		assert_eq!(value["words"], serde_json::json!(["x", "y"]));
		assert_eq!(value["count"], 2);
		assert_eq!(value["stop"], "end_of_text");
		assert_eq!(value["config"]["prefix_length"], 3);
		assert_eq!(value["store"]["states"], 3);
	}

	#[test]
	fn zero_token_length_disables_truncation() {
		let cli = Cli::parse_from(["rs-markov", "-t", "0", "-n", "2", "--seed", "9"]);
		let config = cli.config();
		assert_eq!(config.max_token_length, None);
		assert_eq!(config.prefix_length, 2);
		assert_eq!(cli.seed, Some(9));
		assert!(cli.input.is_none());
	}

	#[test]
	fn defaults_match_the_library() {
		let cli = Cli::parse_from(["rs-markov", "corpus.txt", "--format", "json"]);
		assert_eq!(cli.config(), Config::default());
		assert!(matches!(cli.format, Format::Json));
	}
}
