//! Pohlig-Hellman discrete logarithm (§4.5): reduces `g^x == h (mod p)`
//! to one digit-recovery subproblem per prime-power factor of the group
//! order, solved with the lambda core, then recombined with CRT.

use crate::crt;
use crate::error::{DlogError, Result};
use crate::kernel;
use crate::lambda;
use rug::Integer;

/// A prime and its exponent in a factorization of `p - 1`.
pub type Factor = (Integer, u32);

/// Refines the caller-supplied factorization of `p - 1` down to the
/// actual order of `g`: for each factor, keeps dividing the running
/// order by its prime while `g` raised to the reduced order is still 1.
/// Exponents that fully divide out are compacted away. If refinement
/// ever collapses the order to 1 (only reachable with an inconsistent
/// caller-supplied factorization), falls back to the last input
/// factor's prime raised to the first power, so downstream CRT always
/// has at least one congruence to combine.
fn refine_order(g: &Integer, p: &Integer, factors: &[Factor]) -> (Integer, Vec<Factor>) {
	let mut ord = Integer::from(p - 1);
	let mut refined: Vec<Factor> = Vec::with_capacity(factors.len());

	for (f, e) in factors {
		let mut ei = *e;
		while ei > 0 {
			let candidate = Integer::from(&ord / f);
			if kernel::mod_pow(g, &candidate, p) == 1 {
				ord = candidate;
				ei -= 1;
			} else {
				break;
			}
		}
		if ei > 0 {
			refined.push((f.clone(), ei));
		}
	}

	if ord == 1 {
		if let Some((f_last, _)) = factors.last() {
			ord = f_last.clone();
			refined = vec![(f_last.clone(), 1)];
		}
	}

	(ord, refined)
}

/// Digit-by-digit recovery of `x' in [0, f^e)` solving `G^x' == tgt
/// (mod p)` for `G = g^(f^(e-1))`, one lambda call per digit of the
/// base-`f` expansion of `x'`.
fn solve_prime_power(g: &Integer, h: &Integer, p: &Integer, f: &Integer, e: u32) -> Result<Integer> {
	let capital_g = kernel::mod_pow(g, &kernel::pow(f, e - 1), p);
	let mut x = Integer::from(0);

	for i in 1..=e {
		let g_to_x = kernel::mod_pow(g, &x, p);
		let g_inv = kernel::mod_inverse_ref(&g_to_x, p).ok_or(DlogError::AlgebraicDeadEnd)?;
		let base = kernel::mod_euc(&Integer::from(h * &g_inv), p);
		let tgt = kernel::mod_pow(&base, &kernel::pow(f, e - i), p);

		let x_prime_full = lambda::solve_parallel(&capital_g, &tgt, p)?;
		let modulus_i = kernel::pow(f, i);
		let x_prime = kernel::mod_euc(&x_prime_full, &modulus_i);

		let f_pow_i_minus_1 = kernel::pow(f, i - 1);
		x += Integer::from(&x_prime * &f_pow_i_minus_1);
	}

	Ok(x)
}

/// Full Pohlig-Hellman solve: `g^x == h (mod p)` given a factorization
/// `prod(fi^ei) = p - 1`. Solves one subproblem per prime-power factor
/// of the *refined* order of `g`, then recombines with CRT.
///
/// Exponents `(p-1)/fi^ei` in the subgroup projections are taken
/// modulo `p - 1` rather than `ord(g)`, matching the original's literal
/// arithmetic even after `g`/`h` have been projected onto the smaller
/// subgroup; see DESIGN.md for the discrepancy this preserves.
pub fn solve(g: &Integer, h: &Integer, p: &Integer, factors: &[Factor]) -> Result<Integer> {
	if factors.is_empty() {
		return Err(DlogError::Precondition("Pohlig-Hellman requires a nonempty factorization of p - 1".into()));
	}

	let (ord, refined) = refine_order(g, p, factors);
	let p_minus_1 = Integer::from(p - 1);

	let (mut g_proj, mut h_proj) = (g.clone(), h.clone());
	if ord != p_minus_1 {
		let (f_last, e_last) = factors.last().unwrap();
		let q = kernel::pow(f_last, *e_last);
		g_proj = kernel::mod_pow(&g_proj, &q, p);
		h_proj = kernel::mod_pow(&h_proj, &q, p);
	}

	let mut residues = Vec::with_capacity(refined.len());
	let mut moduli = Vec::with_capacity(refined.len());
	for (f, e) in &refined {
		let modulus = kernel::pow(f, *e);
		let exp = Integer::from(&p_minus_1 / &modulus);
		let g_prime = kernel::mod_pow(&g_proj, &exp, p);
		let h_prime = kernel::mod_pow(&h_proj, &exp, p);

		let xi = solve_prime_power(&g_prime, &h_prime, p, f, *e)?;
		residues.push(xi);
		moduli.push(modulus);
	}

	let x = crt::combine(&residues, &moduli)?;
	Ok(kernel::mod_euc(&x, &ord))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn published_scenario_p_251() {
		// p = 251, p-1 = 2 * 5^3, g = 71, h = 210.
		let p = Integer::from(251);
		let g = Integer::from(71);
		let h = Integer::from(210);
		let factors = vec![(Integer::from(2), 1), (Integer::from(5), 3)];
		let x = solve(&g, &h, &p, &factors).expect("pohlig-hellman should solve");
		assert_eq!(kernel::mod_pow(&g, &x, &p), h);
	}

	#[test]
	fn empty_factor_list_rejected() {
		let p = Integer::from(251);
		let g = Integer::from(71);
		let h = Integer::from(210);
		assert!(solve(&g, &h, &p, &[]).is_err());
	}

	#[test]
	fn order_refinement_does_not_panic_on_trivial_generator() {
		// g = 1 refines to order 1 for any factor list, exercising the fallback.
		let p = Integer::from(251);
		let g = Integer::from(1);
		let factors = vec![(Integer::from(2), 1), (Integer::from(5), 3)];
		let (ord, refined) = refine_order(&g, &p, &factors);
		assert_eq!(ord, Integer::from(5));
		assert_eq!(refined, vec![(Integer::from(5), 1)]);
	}
}
