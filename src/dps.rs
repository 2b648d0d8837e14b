//! The Distinguished-Point Set (DPS): a concurrent collection of
//! collision-search triples keyed by group-element position, guarded by
//! a single mutex. Lookup-then-insert (or lookup-then-derive-result) is
//! always performed inside one critical section — it is never split
//! across two lock acquisitions, matching the original's single
//! `#pragma omp critical` region around the shared sorted array.
//!
//! Ownership of a triple transfers into the set on insert; dropping the
//! set drops every triple it still owns. There is no manual destructor
//! to maintain — Rust's ownership model gives this for free.

use rug::Integer;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// A shared, mutex-guarded set of triples of type `T`, keyed by their
/// position in the group (an `Integer`, via [`Keyed::key`]).
pub struct DistinguishedPointSet<T> {
	inner: Mutex<BTreeMap<Integer, T>>,
}

/// A triple that can be indexed into the set by its group-element position.
pub trait Keyed {
	fn key(&self) -> &Integer;
}

impl<T: Keyed> DistinguishedPointSet<T> {
	pub fn new() -> Self {
		DistinguishedPointSet {
			inner: Mutex::new(BTreeMap::new()),
		}
	}

	/// Looks up `key` under the lock; if present, calls `on_match` with
	/// the stored triple (the caller decides whether this is a genuine
	/// collision and what to do about it). If absent, inserts `triple`
	/// (ownership transfers to the set). Either branch runs inside the
	/// same critical section, matching the original's lookup-then-act
	/// discipline.
	pub fn lookup_or_insert<R>(
		&self,
		triple: T,
		on_match: impl FnOnce(&T, &T) -> R,
	) -> Option<R> {
		let mut guard = self.inner.lock().expect("distinguished-point set mutex poisoned");
		match guard.get(triple.key()) {
			Some(existing) => Some(on_match(existing, &triple)),
			None => {
				guard.insert(triple.key().clone(), triple);
				None
			}
		}
	}

	pub fn len(&self) -> usize {
		self.inner.lock().expect("distinguished-point set mutex poisoned").len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<T: Keyed> Default for DistinguishedPointSet<T> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Clone)]
	struct T {
		pos: Integer,
		tag: i32,
	}
	impl Keyed for T {
		fn key(&self) -> &Integer {
			&self.pos
		}
	}

	#[test]
	fn insert_then_lookup_collides() {
		let set: DistinguishedPointSet<T> = DistinguishedPointSet::new();
		assert!(set
			.lookup_or_insert(T { pos: Integer::from(5), tag: 1 }, |_, _| unreachable!())
			.is_none());
		assert_eq!(set.len(), 1);

		let hit = set.lookup_or_insert(T { pos: Integer::from(5), tag: 2 }, |existing, new| {
			(existing.tag, new.tag)
		});
		assert_eq!(hit, Some((1, 2)));
		// the losing side of a collision is never inserted
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn distinct_positions_both_land() {
		let set: DistinguishedPointSet<T> = DistinguishedPointSet::new();
		set.lookup_or_insert(T { pos: Integer::from(1), tag: 1 }, |_, _| unreachable!());
		set.lookup_or_insert(T { pos: Integer::from(2), tag: 2 }, |_, _| unreachable!());
		assert_eq!(set.len(), 2);
	}
}
