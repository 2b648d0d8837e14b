//! Tunables the original C implementation hardcoded as preprocessor
//! constants. Kept as plain `Copy` structs with `Default` impls rather
//! than a config-file layer: this toolkit persists no state and takes
//! no configuration beyond the handful of numbers below.

use std::env;

/// Bit-length threshold under which a group element is considered
/// "distinguished" (cheap to rendezvous on across workers).
pub const DISTINGUISHED_BIT_THRESHOLD: u32 = 40;

/// Bit width of the random exponents sampled by each parallel rho
/// worker (`POLLARD_RAND_MAX` in the original).
pub const RHO_RANDOM_BITS: u32 = 16;

/// ECM smoothness-bound escalation schedule: (failed_attempts_below, bound).
/// Mirrors the original's `counter < 10/50/100` ladder in `list6/src/main.c`.
pub const ECM_BOUND_SCHEDULE: &[(u32, u32)] =
	&[(10, 5_000), (50, 10_000), (100, 50_000), (u32::MAX, 100_000)];

/// Miller-Rabin-style confidence rounds used for probabilistic primality.
pub const PRIMALITY_REPS: u32 = 25;

/// Sequential rho's outer-loop bound is `i < p` in the original, which
/// is only literally iterable for small p. This caps it so a caller
/// accidentally passing a large p fails fast with a typed error
/// instead of spinning forever.
pub const RHO_SEQUENTIAL_MAX_ITERATIONS: u64 = 10_000_000;

/// Environment variable overriding the parallel worker count, analogous
/// to the thread-count variable recognized by the original's OpenMP runtime.
pub const NUM_THREADS_ENV: &str = "POLLARD_NUM_THREADS";

/// Number of workers to spawn for a parallel region: `POLLARD_NUM_THREADS`
/// if set and valid, otherwise the host's available parallelism.
pub fn worker_count() -> usize {
	env::var(NUM_THREADS_ENV)
		.ok()
		.and_then(|v| v.parse::<usize>().ok())
		.filter(|&n| n > 0)
		.unwrap_or_else(|| num_cpus::get())
}

/// Returns the ECM smoothness bound for the given number of prior failed
/// curve attempts.
pub fn ecm_bound_for_attempt(attempts: u32) -> u32 {
	for &(below, bound) in ECM_BOUND_SCHEDULE {
		if attempts < below {
			return bound;
		}
	}
	ECM_BOUND_SCHEDULE.last().unwrap().1
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bound_schedule_escalates() {
		assert_eq!(ecm_bound_for_attempt(0), 5_000);
		assert_eq!(ecm_bound_for_attempt(9), 5_000);
		assert_eq!(ecm_bound_for_attempt(10), 10_000);
		assert_eq!(ecm_bound_for_attempt(49), 10_000);
		assert_eq!(ecm_bound_for_attempt(50), 50_000);
		assert_eq!(ecm_bound_for_attempt(99), 50_000);
		assert_eq!(ecm_bound_for_attempt(100), 100_000);
		assert_eq!(ecm_bound_for_attempt(10_000), 100_000);
	}

	#[test]
	fn worker_count_is_positive() {
		assert!(worker_count() > 0);
	}
}
