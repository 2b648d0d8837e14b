//! `factor_ecm n` — Lenstra ECM integer factorization. Peels factors off
//! `n` one at a time, escalating the smoothness bound after repeated
//! failed curve attempts (mirrors the original's 10/50/100-attempt
//! 5,000 -> 10,000 -> 50,000 -> 100,000 schedule), until the remaining
//! cofactor is probabilistically prime.

use cyclogroup::{config, ecm, kernel, sieve};
use log::{debug, info};
use rug::Integer;
use std::process::ExitCode;

const USAGE: &str = "usage: factor_ecm <n>";
const MAX_SIEVE_BOUND: u64 = 200_000;
const MAX_ATTEMPTS_PER_FACTOR: u32 = 500;

fn find_one_factor(n: &Integer) -> Option<Integer> {
	let primes = sieve::primes_below(MAX_SIEVE_BOUND);
	let mut rand = kernel::seeded_rand_state(0);

	for attempt in 0..MAX_ATTEMPTS_PER_FACTOR {
		let bound = config::ecm_bound_for_attempt(attempt);
		debug!("ecm: attempt {attempt}, bound {bound}");
		if let Some(d) = ecm::factor(n, &primes, bound, &mut rand) {
			if d > 1 && &d < n {
				return Some(d);
			}
		}
	}
	None
}

fn main() -> ExitCode {
	env_logger::init();

	let raw = match std::env::args().nth(1) {
		Some(raw) => raw,
		None => {
			println!("{USAGE}");
			return ExitCode::SUCCESS;
		}
	};

	let n = match raw.parse::<Integer>() {
		Ok(n) => n,
		Err(_) => {
			eprintln!("invalid decimal integer for n: {raw}");
			eprintln!("{USAGE}");
			return ExitCode::FAILURE;
		}
	};

	if kernel::is_probably_prime(&n) {
		println!("{n} is prime");
		return ExitCode::SUCCESS;
	}

	let mut cofactor = n;
	while !kernel::is_probably_prime(&cofactor) && cofactor > 1 {
		match find_one_factor(&cofactor) {
			Some(factor) => {
				println!("{factor}");
				info!("peeled factor {factor}");
				cofactor = Integer::from(&cofactor / &factor);
			}
			None => {
				eprintln!("ECM exhausted its attempt budget without finding a factor");
				return ExitCode::FAILURE;
			}
		}
	}

	if cofactor > 1 {
		println!("{cofactor}");
	}
	ExitCode::SUCCESS
}
