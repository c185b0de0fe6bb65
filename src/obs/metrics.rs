// self
use crate::obs::OpKind;

/// Counts a finished operation under its outcome label (when metrics are enabled).
pub fn record_op(kind: OpKind, outcome: &'static str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("token_authority_op_total", "op" => kind.as_str(), "outcome" => outcome)
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_op_accepts_error_labels() {
		record_op(OpKind::Validate, crate::Error::InvalidSignature.kind());
		record_op(OpKind::Issue, crate::obs::OUTCOME_OK);
	}
}
