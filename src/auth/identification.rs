//! Caller-supplied token plus the secret it was signed with.

// self
use crate::{_prelude::*, auth::Secret};

/// Token string and secret presented for verification.
#[derive(Clone, PartialEq, Eq)]
pub struct Identification {
	/// Dot-joined `header.body.signature` triplet.
	pub token: String,
	/// Secret the token is expected to be signed with.
	pub secret: Option<Secret>,
}
impl Identification {
	/// Pairs a token with its secret.
	pub fn new(token: impl Into<String>, secret: Secret) -> Self {
		Self { token: token.into(), secret: Some(secret) }
	}

	/// Creates an identification that carries no secret.
	pub fn without_secret(token: impl Into<String>) -> Self {
		Self { token: token.into(), secret: None }
	}
}
impl Debug for Identification {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Identification")
			.field("token", &"<redacted>")
			.field("secret", &self.secret)
			.finish()
	}
}
