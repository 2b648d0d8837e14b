//! Pollard rho discrete logarithm: the sequential Floyd-cycle search
//! (§4.2) and the multi-worker distinguished-point variant (§4.3). Both
//! share the same walk function over the three residue classes of x
//! modulo 3.

use crate::config;
use crate::dps::{DistinguishedPointSet, Keyed};
use crate::error::{DlogError, Result};
use crate::kernel;
use crate::worker;
use log::{debug, trace, warn};
use rug::Integer;

/// Safety valve on the single-walk inner loop of the parallel variant:
/// bounds how long one worker walks before giving up on finding a
/// distinguished point and resampling a fresh (a, b). Not present in
/// the original (which assumes a distinguished point is always found
/// quickly in practice); included so a pathological threshold/group
/// combination cannot spin a worker forever.
const WALK_STEP_CAP: u64 = 1_000_000;

/// One step of the shared rho walk: partitions ℤ/pℤ into three subsets
/// by `x mod 3` and updates `(x, a, b)` accordingly, all reduced modulo
/// `p` (for x) or `q` (for a, b).
fn step(x: &mut Integer, a: &mut Integer, b: &mut Integer, g: &Integer, h: &Integer, p: &Integer, q: &Integer) {
	match x.mod_u(3) {
		0 => {
			kernel::mod_mul_assign(x, g, p);
			let one = Integer::from(1);
			kernel::mod_add_assign(a, &one, q);
		}
		1 => {
			kernel::mod_mul_assign(x, h, p);
			let one = Integer::from(1);
			kernel::mod_add_assign(b, &one, q);
		}
		2 => {
			let x2 = x.clone();
			kernel::mod_mul_assign(x, &x2, p);
			let a2 = a.clone();
			kernel::mod_add_assign(a, &a2, q);
			let b2 = b.clone();
			kernel::mod_add_assign(b, &b2, q);
		}
		_ => unreachable!("x mod 3 is always 0, 1 or 2"),
	}
}

/// Resolves a tortoise/rabbit collision `(a, b)` / `(aa, bb)` into the
/// discrete log scalar, per the Handbook of Applied Cryptography §3.6.3
/// relation `r = b - bb (mod q)`, `x = r^-1 (aa - a) (mod q)`.
fn collision_to_scalar(a: &Integer, b: &Integer, aa: &Integer, bb: &Integer, q: &Integer) -> Option<Integer> {
	let r = kernel::mod_euc(&Integer::from(b - bb), q);
	if r == 0 {
		return None;
	}
	let inv = kernel::mod_inverse_ref(&r, q)?;
	let numerator = Integer::from(aa - a);
	Some(kernel::mod_euc(&Integer::from(inv * numerator), q))
}

/// Sequential Pollard rho: solves `g^x == h (mod p)` for a safe prime
/// `p = 2q + 1`. Deterministic start: `x = g*h`, `a = b = 1`; a second
/// "rabbit" walker advances two steps per outer iteration (Floyd cycle
/// detection) until it matches the tortoise.
pub fn solve_sequential(g: &Integer, h: &Integer, p: &Integer) -> Result<Integer> {
	let q = Integer::from(Integer::from(p - 1) / 2);

	let mut x = Integer::from(g * h);
	let mut a = Integer::from(1);
	let mut b = Integer::from(1);

	let mut xx = x.clone();
	let mut aa = a.clone();
	let mut bb = b.clone();

	let cap = p
		.to_u64()
		.unwrap_or(u64::MAX)
		.min(config::RHO_SEQUENTIAL_MAX_ITERATIONS);

	let mut i: u64 = 1;
	while i < cap {
		step(&mut x, &mut a, &mut b, g, h, p, &q);
		step(&mut xx, &mut aa, &mut bb, g, h, p, &q);
		step(&mut xx, &mut aa, &mut bb, g, h, p, &q);

		if xx == x {
			debug!("sequential rho: tortoise/rabbit collided after {i} outer steps");
			return collision_to_scalar(&a, &b, &aa, &bb, &q).ok_or(DlogError::AlgebraicDeadEnd);
		}
		i += 1;
	}
	warn!("sequential rho: exhausted iteration bound without a collision");
	Err(DlogError::AlgebraicDeadEnd)
}

/// A candidate rho collision point: the walker's position and the
/// exponents of `g` and `h` that produced it. Invariant: `x ≡ g^a h^b
/// (mod p)`.
struct RhoTriple {
	x: Integer,
	a: Integer,
	b: Integer,
}

impl Keyed for RhoTriple {
	fn key(&self) -> &Integer {
		&self.x
	}
}

/// Parallel Pollard rho: each of `config::worker_count()` workers
/// repeatedly samples a fresh random `(a, b)`, walks until its position
/// is distinguished, and checks for a collision through the shared
/// [`DistinguishedPointSet`]. The first worker to find an invertible
/// collision publishes the scalar and every worker exits at its next
/// poll of the termination flag.
pub fn solve_parallel(g: &Integer, h: &Integer, p: &Integer) -> Result<Integer> {
	let q = Integer::from(Integer::from(p - 1) / 2);
	let dps: DistinguishedPointSet<RhoTriple> = DistinguishedPointSet::new();
	let n_workers = config::worker_count();
	let threshold = config::DISTINGUISHED_BIT_THRESHOLD;
	let rand_bits = config::RHO_RANDOM_BITS;

	debug!("parallel rho: spawning {n_workers} workers, distinguished threshold {threshold} bits");

	let result = worker::spawn_workers(n_workers, |idx, term| {
		let mut rand = kernel::seeded_rand_state(idx as u64);

		while !term.is_finished() {
			let mut a = kernel::random_bits(rand_bits, &mut rand);
			let mut b = kernel::random_bits(rand_bits, &mut rand);
			let mut x = kernel::mod_euc(
				&Integer::from(kernel::mod_pow(g, &a, p) * kernel::mod_pow(h, &b, p)),
				p,
			);

			let mut steps = 0u64;
			while kernel::bit_length(&x) >= threshold && steps < WALK_STEP_CAP {
				step(&mut x, &mut a, &mut b, g, h, p, &q);
				steps += 1;
			}
			if steps >= WALK_STEP_CAP {
				trace!("worker {idx}: walk exceeded step cap without a distinguished point, resampling");
				continue;
			}
			if term.is_finished() {
				break;
			}

			let triple = RhoTriple { x, a, b };
			// r = b(new) - B(existing); x = r^-1 * (A(existing) - a(new)) mod q
			let outcome = dps.lookup_or_insert(triple, |existing, new| {
				collision_to_scalar(&new.a, &new.b, &existing.a, &existing.b, &q)
			});

			if let Some(Some(scalar)) = outcome {
				debug!("worker {idx}: distinguished-point collision resolved");
				term.publish(scalar);
			}
		}
	});

	result.ok_or(DlogError::AlgebraicDeadEnd)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sequential_solves_small_safe_prime() {
		// g = 2, h = 5, p = 23 = 2*11 + 1
		let g = Integer::from(2);
		let h = Integer::from(5);
		let p = Integer::from(23);
		let x = solve_sequential(&g, &h, &p).expect("rho should find a witness");
		assert_eq!(kernel::mod_pow(&g, &x, &p), h);
	}

	#[test]
	fn sequential_solves_larger_safe_prime() {
		// p = 1019 = 2*509 + 1, both prime.
		let g = Integer::from(5);
		let h = Integer::from(3);
		let p = Integer::from(1019);
		let x = solve_sequential(&g, &h, &p).expect("rho should find a witness");
		assert_eq!(kernel::mod_pow(&g, &x, &p), h);
	}

	#[test]
	fn parallel_solves_small_safe_prime() {
		let g = Integer::from(2);
		let h = Integer::from(5);
		let p = Integer::from(23);
		let x = solve_parallel(&g, &h, &p).expect("parallel rho should find a witness");
		assert_eq!(kernel::mod_pow(&g, &x, &p), h);
	}
}
