//! Thin wrapper over `rug::Integer` (GMP) providing the arithmetic
//! contracts the rest of the crate relies on: modular exponentiation,
//! fallible modular inversion, gcd, integer square root, bit length and
//! random sampling. Value-returning helpers are the default API; a
//! handful of in-place variants exist for the rho/lambda inner loops so
//! they don't allocate a fresh `Integer` on every step.

use rug::ops::{Pow, RemRounding, RemRoundingAssign};
use rug::rand::RandState;
use rug::Integer;
use std::time::{SystemTime, UNIX_EPOCH};

/// `base^exp mod modulus`, for `exp >= 0` and `modulus > 0`.
pub fn mod_pow(base: &Integer, exp: &Integer, modulus: &Integer) -> Integer {
	Integer::from(
		base.pow_mod_ref(exp, modulus)
			.expect("mod_pow: exponent must be non-negative and modulus positive"),
	)
}

/// `(a * b) mod m`, writing the result into `a` without allocating a
/// fresh scratch integer on the caller's behalf.
pub fn mod_mul_assign(a: &mut Integer, b: &Integer, m: &Integer) {
	*a *= b;
	a.rem_euc_assign(m);
}

/// `(a + b) mod m`, in place.
pub fn mod_add_assign(a: &mut Integer, b: &Integer, m: &Integer) {
	*a += b;
	a.rem_euc_assign(m);
}

/// Euclidean reduction of `n` modulo `m`: always returns a value in `[0, m)`.
pub fn mod_euc(n: &Integer, m: &Integer) -> Integer {
	n.clone().rem_euc(m)
}

/// Modular inverse of `u` mod `m`, consuming `u`.
///
/// Fails (returning the original `u` back in the `Err`) when
/// `gcd(u, m) != 1`. Callers use this failure to detect algebraic
/// collapse; ECM depends on it explicitly.
pub fn mod_inverse(u: Integer, m: &Integer) -> std::result::Result<Integer, Integer> {
	u.invert(m)
}

/// Modular inverse of `u` mod `m` without consuming `u`.
pub fn mod_inverse_ref(u: &Integer, m: &Integer) -> Option<Integer> {
	u.invert_ref(m).map(Integer::from)
}

/// `gcd(a, b)`.
pub fn gcd(a: &Integer, b: &Integer) -> Integer {
	a.clone().gcd(b)
}

/// Floor of the integer square root of `n`.
pub fn isqrt(n: &Integer) -> Integer {
	n.clone().sqrt()
}

/// Number of bits needed to represent `n` (its bit length).
pub fn bit_length(n: &Integer) -> u32 {
	n.significant_bits()
}

/// `base^exp`, for a small non-negative exponent (used for jump-table
/// and prime-power bookkeeping, never for the full modular group order).
pub fn pow(base: &Integer, exp: u32) -> Integer {
	Integer::from(base.pow(exp))
}

/// Probabilistic primality via Miller-Rabin-style rounds, using the
/// round count from [`crate::config::PRIMALITY_REPS`].
pub fn is_probably_prime(n: &Integer) -> bool {
	!matches!(
		n.is_probably_prime(crate::config::PRIMALITY_REPS),
		rug::integer::IsPrime::No
	)
}

/// Seeds a fresh Mersenne-twister generator from the platform clock,
/// mixed with `salt` so concurrently-started workers don't collide on
/// the same seed. Constructed once per caller scope and reused for its
/// lifetime — never reseeded on every call (see design notes on RNG use
/// under ECM's tight inner loop).
pub fn seeded_rand_state(salt: u64) -> RandState<'static> {
	let mut rand = RandState::new_mersenne_twister();
	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_nanos())
		.unwrap_or(0);
	let seed = Integer::from(nanos) + Integer::from(salt);
	rand.seed(&seed);
	rand
}

/// Uniform sample in `[0, bound)`.
pub fn random_below(bound: &Integer, rand: &mut RandState) -> Integer {
	bound.clone().random_below(rand)
}

/// Uniform sample in `[start, stop)`.
pub fn random_range(start: &Integer, stop: &Integer, rand: &mut RandState) -> Integer {
	let span = Integer::from(stop - start);
	start.clone() + span.random_below(rand)
}

/// Uniform sample over `bits` bits, i.e. in `[0, 2^bits)`.
pub fn random_bits(bits: u32, rand: &mut RandState) -> Integer {
	Integer::from(Integer::random_bits(bits, rand))
}
