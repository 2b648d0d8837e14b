use thiserror::Error;

/// Error type shared by every solver in the crate.
///
/// Inner algorithmic routines return `Result<_, DlogError>` (or, where a
/// failed attempt is expected control flow rather than an exceptional
/// condition, `Option<Integer>`). Callers are responsible for surfacing
/// `Err` results to the operator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DlogError {
	/// r ≡ 0 (mod q) in sequential rho, or a required modular inverse
	/// does not exist in the Chinese Remainder Theorem combine step.
	#[error("algebraic dead end: no invertible relation was found")]
	AlgebraicDeadEnd,

	/// Caller-supplied preconditions were violated: empty arrays,
	/// mismatched lengths, or a factor product that does not match p - 1.
	#[error("precondition violation: {0}")]
	Precondition(String),

	/// Solving succeeded but the produced scalar failed the g^x == h
	/// verification. Library routines never return this themselves;
	/// it is reserved for CLI-side verification.
	#[error("verification failed: solved value does not satisfy the relation")]
	Verification,

	/// Any other internal inconsistency that does not fit the above.
	#[error("inconsistent state: {0}")]
	Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, DlogError>;
