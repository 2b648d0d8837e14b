//! Chinese Remainder Theorem combination (§4.7): reconstructs the unique
//! residue modulo `prod(moduli)` satisfying a list of pairwise-coprime
//! congruences, via Garner's incremental construction.

use crate::error::{DlogError, Result};
use crate::kernel;
use rug::Integer;

/// Combines `x ≡ residues[i] (mod moduli[i])` for every `i` into a single
/// `x (mod prod(moduli))`. `residues` and `moduli` must have equal,
/// nonzero length, and the moduli must be pairwise coprime.
pub fn combine(residues: &[Integer], moduli: &[Integer]) -> Result<Integer> {
	if residues.len() != moduli.len() || residues.is_empty() {
		return Err(DlogError::Precondition(
			"CRT requires equal-length, nonempty residue and modulus lists".into(),
		));
	}

	let mut x = residues[0].clone();
	let mut m = moduli[0].clone();

	for i in 1..residues.len() {
		let (r_i, m_i) = (&residues[i], &moduli[i]);
		let inv = kernel::mod_inverse_ref(&m, m_i).ok_or_else(|| {
			DlogError::Precondition(format!("moduli at index {i} are not coprime with the running product"))
		})?;

		let diff = kernel::mod_euc(&Integer::from(r_i - &x), m_i);
		let t = kernel::mod_euc(&Integer::from(inv * diff), m_i);
		x += Integer::from(&m * &t);
		m *= m_i;
		x = kernel::mod_euc(&x, &m);
	}

	Ok(x)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classic_three_congruence_example() {
		// x == 2 mod 3, x == 3 mod 5, x == 2 mod 7 -> x == 23 mod 105
		let residues = vec![Integer::from(2), Integer::from(3), Integer::from(2)];
		let moduli = vec![Integer::from(3), Integer::from(5), Integer::from(7)];
		let x = combine(&residues, &moduli).unwrap();
		assert_eq!(x, Integer::from(23));
	}

	#[test]
	fn single_congruence_is_identity() {
		let residues = vec![Integer::from(4)];
		let moduli = vec![Integer::from(9)];
		assert_eq!(combine(&residues, &moduli).unwrap(), Integer::from(4));
	}

	#[test]
	fn mismatched_lengths_reject() {
		let residues = vec![Integer::from(1), Integer::from(2)];
		let moduli = vec![Integer::from(3)];
		assert!(combine(&residues, &moduli).is_err());
	}

	#[test]
	fn non_coprime_moduli_reject() {
		let residues = vec![Integer::from(1), Integer::from(1)];
		let moduli = vec![Integer::from(4), Integer::from(6)];
		assert!(combine(&residues, &moduli).is_err());
	}
}
