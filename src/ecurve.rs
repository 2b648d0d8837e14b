//! Elliptic curve group law over ℤ/nℤ for Lenstra's ECM (§4.6). `n` is
//! usually composite, so "the group" is not really a group: a point
//! addition that would need to invert a non-unit surfaces that failure
//! as [`AddOutcome::FactorFound`] instead of panicking or silently
//! producing garbage. This is the entire mechanism by which ECM finds a
//! factor — the REDESIGN FLAG this resolves is in SPEC_FULL.md §7.

use crate::kernel;
use rug::Integer;

/// A point on `E: y^2 = x^3 + ax + b (mod n)`, or the identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
	Affine(Integer, Integer),
	Identity,
}

/// Outcome of a single curve operation: an ordinary affine result, a
/// collapse to the identity, or — the success channel of ECM — a
/// divisor of `n` uncovered by a non-invertible denominator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
	Affine(Integer, Integer),
	Identity,
	FactorFound(Integer),
}

/// `P + Q` on `E` mod `n`, with curve parameter `a` (the `b` term never
/// enters the addition law).
pub fn add(p: &Point, q: &Point, a: &Integer, n: &Integer) -> AddOutcome {
	let (px, py) = match p {
		Point::Identity => {
			return match q {
				Point::Identity => AddOutcome::Identity,
				Point::Affine(x, y) => AddOutcome::Affine(x.clone(), y.clone()),
			};
		}
		Point::Affine(x, y) => (x, y),
	};
	let (qx, qy) = match q {
		Point::Identity => return AddOutcome::Affine(px.clone(), py.clone()),
		Point::Affine(x, y) => (x, y),
	};

	let px_mod = kernel::mod_euc(px, n);
	let qx_mod = kernel::mod_euc(qx, n);

	let (numerator, denominator) = if px_mod == qx_mod {
		let sum = kernel::mod_euc(&Integer::from(py + qy), n);
		if sum == 0 {
			return AddOutcome::Identity;
		}
		let px_sq = kernel::pow(px, 2);
		let num = kernel::mod_euc(&Integer::from(Integer::from(px_sq * 3) + a), n);
		let den = kernel::mod_euc(&Integer::from(py.clone() * 2), n);
		(num, den)
	} else {
		let num = kernel::mod_euc(&Integer::from(qy - py), n);
		let den = kernel::mod_euc(&Integer::from(qx - px), n);
		(num, den)
	};

	let slope = match kernel::mod_inverse_ref(&denominator, n) {
		Some(inv) => kernel::mod_euc(&Integer::from(numerator * inv), n),
		None => return AddOutcome::FactorFound(denominator),
	};

	let slope_sq = Integer::from(&slope * &slope);
	let rx = kernel::mod_euc(&Integer::from(Integer::from(slope_sq - px) - qx), n);

	let px_minus_rx = Integer::from(px - &rx);
	let ry = kernel::mod_euc(&Integer::from(Integer::from(&slope * px_minus_rx) - py), n);

	AddOutcome::Affine(rx, ry)
}

/// Double-and-add scalar multiplication `k * P`, stopping early the
/// instant any underlying `add` surfaces a [`AddOutcome::FactorFound`].
pub fn scalar_mul(base: &Point, k: &Integer, a: &Integer, n: &Integer) -> AddOutcome {
	let mut result = Point::Identity;
	let mut addend = base.clone();
	let mut exp = k.clone();

	while exp > 0 {
		if exp.mod_u(2) == 1 {
			match add(&result, &addend, a, n) {
				AddOutcome::FactorFound(d) => return AddOutcome::FactorFound(d),
				AddOutcome::Identity => result = Point::Identity,
				AddOutcome::Affine(x, y) => result = Point::Affine(x, y),
			}
		}
		exp = Integer::from(&exp / 2);
		if exp > 0 {
			match add(&addend, &addend, a, n) {
				AddOutcome::FactorFound(d) => return AddOutcome::FactorFound(d),
				AddOutcome::Identity => addend = Point::Identity,
				AddOutcome::Affine(x, y) => addend = Point::Affine(x, y),
			}
		}
	}

	match result {
		Point::Identity => AddOutcome::Identity,
		Point::Affine(x, y) => AddOutcome::Affine(x, y),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identity_is_neutral() {
		let p = Point::Affine(Integer::from(3), Integer::from(6));
		let a = Integer::from(2);
		let n = Integer::from(97);
		assert_eq!(add(&p, &Point::Identity, &a, &n), AddOutcome::Affine(Integer::from(3), Integer::from(6)));
		assert_eq!(add(&Point::Identity, &p, &a, &n), AddOutcome::Affine(Integer::from(3), Integer::from(6)));
	}

	#[test]
	fn opposite_points_collapse_to_identity() {
		let p = Point::Affine(Integer::from(3), Integer::from(6));
		let neg_p = Point::Affine(Integer::from(3), Integer::from(97 - 6));
		let a = Integer::from(2);
		let n = Integer::from(97);
		assert_eq!(add(&p, &neg_p, &a, &n), AddOutcome::Identity);
	}

	#[test]
	fn non_invertible_denominator_surfaces_factor() {
		// n = 35 = 5*7; two x-coordinates differing by a multiple of 5
		// make (qx - px) share a factor with n.
		let p = Point::Affine(Integer::from(1), Integer::from(1));
		let q = Point::Affine(Integer::from(6), Integer::from(2));
		let a = Integer::from(1);
		let n = Integer::from(35);
		match add(&p, &q, &a, &n) {
			AddOutcome::FactorFound(d) => assert_eq!(kernel::gcd(&n, &d), Integer::from(5)),
			other => panic!("expected FactorFound, got {other:?}"),
		}
	}

	#[test]
	fn scalar_mul_by_zero_is_identity() {
		let p = Point::Affine(Integer::from(3), Integer::from(6));
		let a = Integer::from(2);
		let n = Integer::from(97);
		assert_eq!(scalar_mul(&p, &Integer::from(0), &a, &n), AddOutcome::Identity);
	}
}
