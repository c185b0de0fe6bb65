//! Optional observability helpers for authority operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run each operation inside a `token_authority.op` span carrying the `op`,
//!   `stage`, and `outcome` fields, plus a debug event when the operation fails.
//! - Enable `metrics` to increment the `token_authority_op_total` counter once per finished
//!   operation, labeled by `op` + `outcome`.
//!
//! The outcome is `ok` on success and the [`Error::kind`] label otherwise, so token strings and
//! secrets never reach a span or metric. With both features disabled nothing is recorded.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome label recorded for successful operations.
pub const OUTCOME_OK: &str = "ok";

/// Operation kinds observed by the authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Verification pipeline run.
	Validate,
	/// Token issuance.
	Issue,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::Validate => "validate",
			OpKind::Issue => "issue",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Maps a finished operation to its outcome label.
pub fn outcome_of<T>(result: &Result<T>) -> &'static str {
	match result {
		Ok(_) => OUTCOME_OK,
		Err(e) => e.kind(),
	}
}

/// Runs `op` inside an [`OpSpan`] and records its outcome.
pub fn observe<T, F>(kind: OpKind, stage: &'static str, op: F) -> Result<T>
where
	F: FnOnce() -> Result<T>,
{
	let span = OpSpan::new(kind, stage);
	let result = span.in_scope(op);
	let outcome = outcome_of(&result);

	span.finish(outcome);
	record_op(kind, outcome);

	result
}
