// self
use crate::{_prelude::*, auth::TokenCategory};

/// Default lifetime of session (`Jwt`) tokens.
pub const DEFAULT_SESSION_LIFETIME: Duration = Duration::hours(2);
/// Default lifetime of email-verification (`Jet`) tokens.
pub const DEFAULT_VERIFICATION_LIFETIME: Duration = Duration::days(14);
/// Default lifetime of generated secrets.
pub const DEFAULT_SECRET_LIFETIME: Duration = Duration::days(7);
/// Default number of random bytes in a generated secret key.
pub const DEFAULT_SECRET_BYTE_SIZE: usize = 32;

/// Errors raised while constructing or validating issuance policies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum IssuancePolicyError {
	/// Lifetimes must be strictly positive.
	#[error("The {field} lifetime must be positive.")]
	NonPositiveLifetime {
		/// Which lifetime failed validation.
		field: String,
	},
	/// Adding the lifetime to the issuance instant leaves the supported date range.
	#[error("The {field} lifetime pushes the expiration out of range.")]
	LifetimeOutOfRange {
		/// Which lifetime overflowed.
		field: String,
	},
	/// Generated keys need at least one byte.
	#[error("Secret key size must be at least one byte.")]
	EmptySecretKeySize,
}

/// Lifetimes and key sizes applied when minting tokens and secrets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuancePolicy {
	/// Lifetime stamped onto `Jwt` tokens.
	pub session_lifetime: Duration,
	/// Lifetime stamped onto `Jet` tokens.
	pub verification_lifetime: Duration,
	/// Lifetime of generated secrets.
	pub secret_lifetime: Duration,
	/// Random bytes per generated secret key.
	pub secret_byte_size: usize,
}
impl IssuancePolicy {
	/// Returns a builder seeded with the defaults.
	pub fn builder() -> IssuancePolicyBuilder {
		IssuancePolicyBuilder::default()
	}

	/// Lifetime for tokens of `category`; `None` for categories that cannot be issued.
	pub fn lifetime_for(&self, category: TokenCategory) -> Option<Duration> {
		match category {
			TokenCategory::Jwt => Some(self.session_lifetime),
			TokenCategory::Jet => Some(self.verification_lifetime),
			TokenCategory::NoType => None,
		}
	}

	/// Expiration of a `category` token issued at `now`.
	///
	/// Returns `Ok(None)` for categories that cannot be issued.
	pub fn token_expiration_at(
		&self,
		category: TokenCategory,
		now: OffsetDateTime,
	) -> Result<Option<OffsetDateTime>, IssuancePolicyError> {
		let field = match category {
			TokenCategory::Jwt => "session",
			TokenCategory::Jet => "verification",
			TokenCategory::NoType => return Ok(None),
		};

		self.lifetime_for(category).map(|lifetime| expiration_after(field, now, lifetime)).transpose()
	}

	/// Expiration of a secret generated at `now`.
	pub fn secret_expiration_at(
		&self,
		now: OffsetDateTime,
	) -> Result<OffsetDateTime, IssuancePolicyError> {
		expiration_after("secret", now, self.secret_lifetime)
	}

	/// Checks every lifetime and the key size.
	pub fn validate(&self) -> Result<(), IssuancePolicyError> {
		for (field, lifetime) in [
			("session", self.session_lifetime),
			("verification", self.verification_lifetime),
			("secret", self.secret_lifetime),
		] {
			if !lifetime.is_positive() {
				return Err(IssuancePolicyError::NonPositiveLifetime { field: field.into() });
			}
		}
		if self.secret_byte_size == 0 {
			return Err(IssuancePolicyError::EmptySecretKeySize);
		}

		Ok(())
	}
}
impl Default for IssuancePolicy {
	fn default() -> Self {
		Self {
			session_lifetime: DEFAULT_SESSION_LIFETIME,
			verification_lifetime: DEFAULT_VERIFICATION_LIFETIME,
			secret_lifetime: DEFAULT_SECRET_LIFETIME,
			secret_byte_size: DEFAULT_SECRET_BYTE_SIZE,
		}
	}
}

fn expiration_after(
	field: &str,
	now: OffsetDateTime,
	lifetime: Duration,
) -> Result<OffsetDateTime, IssuancePolicyError> {
	now.checked_add(lifetime)
		.ok_or_else(|| IssuancePolicyError::LifetimeOutOfRange { field: field.into() })
}

/// Builder for [`IssuancePolicy`] values.
#[derive(Clone, Debug, Default)]
pub struct IssuancePolicyBuilder {
	policy: IssuancePolicy,
}
impl IssuancePolicyBuilder {
	/// Sets the `Jwt` token lifetime.
	pub fn session_lifetime(mut self, lifetime: Duration) -> Self {
		self.policy.session_lifetime = lifetime;

		self
	}

	/// Sets the `Jet` token lifetime.
	pub fn verification_lifetime(mut self, lifetime: Duration) -> Self {
		self.policy.verification_lifetime = lifetime;

		self
	}

	/// Sets the generated secret lifetime.
	pub fn secret_lifetime(mut self, lifetime: Duration) -> Self {
		self.policy.secret_lifetime = lifetime;

		self
	}

	/// Sets the generated secret key size in bytes.
	pub fn secret_byte_size(mut self, size: usize) -> Self {
		self.policy.secret_byte_size = size;

		self
	}

	/// Validates and returns the policy.
	pub fn build(self) -> Result<IssuancePolicy, IssuancePolicyError> {
		self.policy.validate()?;

		Ok(self.policy)
	}
}
