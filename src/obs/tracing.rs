// self
use crate::{_prelude::*, obs::OpKind};

/// Span wrapping one authority operation.
///
/// The `outcome` field starts empty and is filled by [`finish`](Self::finish).
#[derive(Clone, Debug)]
pub struct OpSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
	kind: OpKind,
}
impl OpSpan {
	/// Opens a span tagged with the operation kind and call site.
	pub fn new(kind: OpKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"token_authority.op",
				op = kind.as_str(),
				stage,
				outcome = tracing::field::Empty
			);

			Self { span, kind }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self { kind }
		}
	}

	/// Runs `f` with the span entered.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Records `outcome` on the span and emits a debug event for failures.
	pub fn finish(&self, outcome: &'static str) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("outcome", outcome);

			if outcome != crate::obs::OUTCOME_OK {
				self.span.in_scope(|| {
					tracing::debug!(
						op = self.kind.as_str(),
						error = outcome,
						"token authority operation failed"
					);
				});
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (self.kind, outcome);
		}
	}
}
