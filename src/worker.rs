//! Shared fork-join scaffolding for the parallel rho and lambda
//! searches: a scoped thread-per-worker region plus the monotonic
//! "finished" signal and single-write result slot described in the
//! concurrency model.
//!
//! `std::thread::scope` guarantees every spawned worker is joined
//! before `spawn_workers` returns, so there is no detached-thread
//! failure mode to guard against — the original's OpenMP parallel
//! region has the same join-at-the-end guarantee.

use rug::Integer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Coordination state shared by all workers in one parallel search:
/// a monotonic termination flag and a write-once result slot.
pub struct Termination {
	finished: AtomicBool,
	result: Mutex<Option<Integer>>,
}

impl Termination {
	pub fn new() -> Self {
		Termination {
			finished: AtomicBool::new(false),
			result: Mutex::new(None),
		}
	}

	/// Polled at the top of each worker's outer loop, without holding
	/// any lock. A race that causes one extra iteration after the flag
	/// flips is acceptable: the next loop head re-reads it.
	pub fn is_finished(&self) -> bool {
		self.finished.load(Ordering::Acquire)
	}

	/// Publishes the solved value and flips the termination flag. Must
	/// be called from inside the same critical section that established
	/// the collision, so no other worker observes a partial write. If
	/// multiple workers race to publish (which the mutex around the
	/// distinguished-point set prevents in practice), only the first
	/// write is kept.
	pub fn publish(&self, value: Integer) {
		let mut guard = self.result.lock().expect("result mutex poisoned");
		if guard.is_none() {
			*guard = Some(value);
		}
		self.finished.store(true, Ordering::Release);
	}

	pub fn into_result(self) -> Option<Integer> {
		self.result.into_inner().expect("result mutex poisoned")
	}
}

impl Default for Termination {
	fn default() -> Self {
		Self::new()
	}
}

/// Spawns `n_workers` scoped threads, each running `worker(index, &term)`,
/// and returns whatever value (if any) a worker published before the
/// region joined.
pub fn spawn_workers<F>(n_workers: usize, worker: F) -> Option<Integer>
where
	F: Fn(usize, &Termination) + Sync,
{
	let term = Termination::new();
	std::thread::scope(|scope| {
		for idx in 0..n_workers {
			let term_ref = &term;
			let worker_ref = &worker;
			scope.spawn(move || worker_ref(idx, term_ref));
		}
	});
	term.into_result()
}
