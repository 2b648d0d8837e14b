use cyclogroup::{ecm, kernel, sieve};
use rug::Integer;

#[test]
fn n_8051_factors_to_83_times_97() {
	let n = Integer::from(8051);
	let primes = sieve::primes_below(200);
	let mut rand = kernel::seeded_rand_state(42);

	let mut factor = None;
	for _ in 0..300 {
		if let Some(d) = ecm::factor(&n, &primes, 200, &mut rand) {
			if d > 1 && d < n {
				factor = Some(d);
				break;
			}
		}
	}

	let d = factor.expect("ECM should factor 8051 within the attempt budget");
	assert!(d == Integer::from(83) || d == Integer::from(97));
	let reconstructed = Integer::from(Integer::from(&n / &d) * &d);
	assert_eq!(reconstructed, n);
}
