use super::token::Token;

/// Multiplier of the running hash. Small and odd, spreads short ASCII words well.
pub const MULTIPLIER: u32 = 31;

/// Maps an ordered tuple of tokens to a bucket in `0..bucket_count`.
///
/// For every token in order, for every byte of the token in order,
/// `h = h * 31 + byte` with 32-bit wrapping arithmetic; the result is
/// reduced modulo `bucket_count`. The hash is pure and order sensitive.
/// Collisions are expected; the state store resolves them by equality.
///
/// # Panics
/// Panics if `bucket_count` is zero (rejected earlier by `Config::validate`).
pub fn prefix_hash(tokens: &[Token], bucket_count: usize) -> usize {
	let h = tokens
		.iter()
		.flat_map(|token| token.hash_bytes())
		.fold(0u32, |h, &byte| h.wrapping_mul(MULTIPLIER).wrapping_add(u32::from(byte)));
	h as usize % bucket_count
}
