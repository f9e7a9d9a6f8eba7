use rand::Rng;

/// Picks one element uniformly at random from an iterator of unknown length.
///
/// Size-1 reservoir sampling: the `n`-th element replaces the current pick
/// when an unbiased draw from `0..n` is zero. After the full traversal each
/// element has been kept with probability `1 / len`. Runs in a single
/// forward pass with O(1) extra memory; elements are never buffered.
///
/// Returns `None` for an empty iterator.
pub fn reservoir_pick<I, R>(items: I, rng: &mut R) -> Option<I::Item>
where
	I: IntoIterator,
	R: Rng + ?Sized,
{
	let mut chosen = None;
	let mut seen: u64 = 0;
	for item in items {
		seen += 1;
		if rng.random_range(0..seen) == 0 {
			chosen = Some(item);
		}
	}
	chosen
}
