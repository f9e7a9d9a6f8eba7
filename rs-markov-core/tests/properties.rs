//! Property tests over arbitrary small corpora.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::model::builder::Builder;
use rs_markov_core::model::hash::prefix_hash;
use rs_markov_core::model::prefix::Prefix;
use rs_markov_core::model::state_store::StateStore;
use rs_markov_core::{Config, MarkovChain, Token};

fn corpus() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec("[abc]{1,2}", 0..80)
}

proptest! {
	#[test]
	fn store_never_holds_two_equal_prefixes(
		words in corpus(),
		prefix_length in 1usize..4,
		buckets in 1usize..16,
	) {
		let mut store = StateStore::new(buckets);
		let mut builder = Builder::new(&mut store, prefix_length, None);
		builder.build(&words);
		builder.finish();

		let prefixes: Vec<&Prefix> = store.states().map(|s| s.prefix()).collect();
		for (i, a) in prefixes.iter().enumerate() {
			for b in &prefixes[i + 1..] {
				prop_assert_ne!(a, b);
			}
		}
		// Every state is found again through an equal, freshly built prefix.
		for state in store.states() {
			let copy = Prefix::from_tokens(state.prefix().tokens().to_vec());
			let found = store.find(&copy).map(|id| store.get(id).prefix());
			prop_assert_eq!(found, Some(state.prefix()));
		}
		// One suffix entry per word, plus the final sentinel.
		prop_assert_eq!(store.stats().suffixes, words.len() + 1);
	}

	#[test]
	fn generation_stays_within_the_vocabulary_and_cap(
		words in corpus(),
		prefix_length in 1usize..4,
		max_words in 0usize..200,
		seed in any::<u64>(),
	) {
		let config = Config { prefix_length, max_generated_words: max_words, ..Config::default() };
		let mut chain = MarkovChain::new(config).unwrap();
		chain.train(&words).unwrap();

		let generation = chain.generate(StdRng::seed_from_u64(seed)).unwrap();
		prop_assert!(generation.count() <= max_words);
		for word in &generation.words {
			prop_assert!(words.iter().any(|w| w.as_str() == &**word));
		}
	}

	#[test]
	fn hash_is_pure(words in prop::collection::vec("[a-z]{0,6}", 1..5), buckets in 1usize..5000) {
		let tokens: Vec<Token> = words.iter().map(|w| Token::from(w.as_str())).collect();
		let h = prefix_hash(&tokens, buckets);
		prop_assert!(h < buckets);
		prop_assert_eq!(h, prefix_hash(&tokens.clone(), buckets));
	}

	#[test]
	fn reordered_prefixes_get_distinct_states(a in "[a-z]{1,4}", b in "[a-z]{1,4}") {
		prop_assume!(a != b);
		let ab = Prefix::from_tokens(vec![Token::from(a.as_str()), Token::from(b.as_str())]);
		let ba = Prefix::from_tokens(vec![Token::from(b.as_str()), Token::from(a.as_str())]);

		let mut store = StateStore::new(4093);
		let first = store.find_or_insert(&ab);
		let second = store.find_or_insert(&ba);
		prop_assert_ne!(first, second);
		prop_assert_eq!(store.find(&ab), Some(first));
		prop_assert_eq!(store.find(&ba), Some(second));
	}
}
