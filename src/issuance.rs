//! Token and secret issuance.
//!
//! [`new_token`] validates the header, body, and secret, stamps the body with a
//! category-specific expiration, and signs the triplet. [`IssuancePolicy`] carries the
//! lifetimes and key size used when minting tokens and secrets.

mod policy;

pub use policy::*;

// self
use crate::{
	_prelude::*,
	auth::{Body, Header, RawBody, Secret, SubjectId},
	authority::pipeline::{self, Segments},
	codec,
	obs::{self, OpKind},
	signer,
};

/// Issues a token using the default [`IssuancePolicy`].
///
/// # Errors
///
/// See [`IssuancePolicy::issue_at`].
pub fn new_token(header: &Header, body: Body, secret: &Secret) -> Result<String> {
	IssuancePolicy::default().issue(header, body, secret)
}

/// Best-effort peek at the subject of a token **without** verifying its signature.
///
/// The result must never be treated as trust-establishing; use
/// [`TokenAuthority`](crate::TokenAuthority) for that.
pub fn extract_subject_id(token: &str) -> Option<SubjectId> {
	let segments = Segments::split(token).ok()?;
	let raw = codec::decode_json::<RawBody>(segments.body, "body").ok()?;

	SubjectId::new(raw.uuid).ok()
}

impl IssuancePolicy {
	/// Issues a token against the current clock.
	///
	/// # Errors
	///
	/// See [`issue_at`](Self::issue_at).
	pub fn issue(&self, header: &Header, body: Body, secret: &Secret) -> Result<String> {
		self.issue_at(header, body, secret, OffsetDateTime::now_utc())
	}

	/// Issues a token as of `now`.
	///
	/// Checks run in order: the header category must be issuable with an in-range expiration,
	/// the secret must be valid, and admin bodies must be paired with HS512. The body expiration
	/// is then overwritten with `now + lifetime(category)` before signing, so an unset algorithm
	/// surfaces as [`Error::UnsupportedAlgorithm`] from the signer.
	///
	/// # Errors
	///
	/// Returns the first failing check.
	pub fn issue_at(
		&self,
		header: &Header,
		body: Body,
		secret: &Secret,
		now: OffsetDateTime,
	) -> Result<String> {
		obs::observe(OpKind::Issue, "issue", || {
			self.validate()?;

			let expiration = self
				.token_expiration_at(header.token_typ, now)?
				.ok_or(Error::UnsupportedCategory { category: header.token_typ.as_str() })?;

			secret.validate_at(now.unix_timestamp())?;
			pipeline::check_algorithm_binding(header.alg, body.permission)?;

			let body = body.with_expiration(expiration.unix_timestamp());

			signer::sign_token(header, &body, &secret.key)
		})
	}

	/// Generates a secret valid from the current clock for [`secret_lifetime`](Self::secret_lifetime).
	///
	/// # Errors
	///
	/// Returns [`Error::IssuancePolicy`] when the policy is invalid.
	pub fn generate_secret(&self) -> Result<Secret> {
		self.generate_secret_at(OffsetDateTime::now_utc())
	}

	/// Generates a secret valid from `now` for [`secret_lifetime`](Self::secret_lifetime).
	///
	/// # Errors
	///
	/// Returns [`Error::IssuancePolicy`] when the policy is invalid or the secret lifetime pushes
	/// the expiration out of range.
	pub fn generate_secret_at(&self, now: OffsetDateTime) -> Result<Secret> {
		self.validate()?;

		let expires = self.secret_expiration_at(now)?;

		Ok(Secret::generate_between(self.secret_byte_size, now, expires))
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::auth::{Algorithm, Permission, TokenCategory};

	const NOW: OffsetDateTime = macros::datetime!(2025-01-01 00:00 UTC);

	fn subject() -> SubjectId {
		SubjectId::new("01d3x3wm2nnrdfzp0tka2vw9dx").expect("Subject fixture should be valid.")
	}

	fn secret() -> Secret {
		Secret::between("issuance-key", NOW - Duration::minutes(1), NOW + Duration::days(1))
	}

	#[test]
	fn issue_stamps_category_lifetime() {
		let policy = IssuancePolicy::default();
		let header = Header::new(Algorithm::Hs256, TokenCategory::Jet);
		let token = policy
			.issue_at(&header, Body::new(subject(), Permission::UserRegistration), &secret(), NOW)
			.expect("Verification token should issue.");
		let segments = Segments::split(&token).expect("Issued token should have three segments.");
		let raw: RawBody =
			codec::decode_json(segments.body, "body").expect("Issued body should decode.");

		assert_eq!(raw.expiration_timestamp, (NOW + Duration::days(14)).unix_timestamp());
	}

	#[test]
	fn issue_checks_run_in_order() {
		let policy = IssuancePolicy::default();
		let admin = Body::new(subject(), Permission::Admin);
		let no_type = Header::new(Algorithm::Hs512, TokenCategory::NoType);

		assert!(matches!(
			policy.issue_at(&no_type, admin.clone(), &Secret::new("", 0, 0), NOW),
			Err(Error::UnsupportedCategory { category: "NO_TYPE" })
		));

		let weak = Header::new(Algorithm::Hs256, TokenCategory::Jwt);

		assert!(matches!(
			policy.issue_at(&weak, admin.clone(), &Secret::new("", 0, 0), NOW),
			Err(Error::EmptySecretKey)
		));
		assert!(matches!(
			policy.issue_at(&weak, admin.clone(), &secret(), NOW),
			Err(Error::InsufficientPermission)
		));

		let unset = Header::new(Algorithm::NoAlg, TokenCategory::Jwt);

		assert!(matches!(
			policy.issue_at(&unset, Body::new(subject(), Permission::User), &secret(), NOW),
			Err(Error::UnsupportedAlgorithm { .. })
		));
	}

	#[test]
	fn extract_subject_id_peeks_without_verifying() {
		let header = Header::new(Algorithm::Hs256, TokenCategory::Jwt);
		let token = IssuancePolicy::default()
			.issue_at(&header, Body::new(subject(), Permission::User), &secret(), NOW)
			.expect("Session token should issue.");

		assert_eq!(extract_subject_id(&token), Some(subject()));

		let (signed, _) = token.rsplit_once('.').expect("Issued token should contain separators.");
		let forged = format!("{signed}.forged");

		assert_eq!(extract_subject_id(&forged), Some(subject()), "The signature is not checked.");
		assert_eq!(extract_subject_id("garbage"), None);
		assert_eq!(extract_subject_id("a.b.c"), None);
	}

	#[test]
	fn generated_secret_follows_policy() {
		let policy = IssuancePolicy::builder()
			.secret_byte_size(64)
			.secret_lifetime(Duration::hours(1))
			.build()
			.expect("Custom policy should build.");
		let secret = policy.generate_secret_at(NOW).expect("Secret should generate.");

		assert_eq!(secret.expiration_timestamp, (NOW + Duration::hours(1)).unix_timestamp());
		assert_eq!(secret.key.expose().len(), 88);

		let broken = IssuancePolicy { secret_byte_size: 0, ..IssuancePolicy::default() };

		assert!(matches!(broken.generate_secret_at(NOW), Err(Error::IssuancePolicy(_))));
	}

	#[test]
	fn oversized_lifetimes_are_reported_not_panicked() {
		let policy = IssuancePolicy::builder()
			.session_lifetime(Duration::days(10_000_000))
			.secret_lifetime(Duration::days(10_000_000))
			.build()
			.expect("Positive lifetimes pass validation.");
		let header = Header::new(Algorithm::Hs256, TokenCategory::Jwt);

		assert!(matches!(
			policy.issue_at(&header, Body::new(subject(), Permission::User), &secret(), NOW),
			Err(Error::IssuancePolicy(IssuancePolicyError::LifetimeOutOfRange { .. }))
		));
		assert!(matches!(
			policy.generate_secret_at(NOW),
			Err(Error::IssuancePolicy(IssuancePolicyError::LifetimeOutOfRange { .. }))
		));

		let verification = Header::new(Algorithm::Hs256, TokenCategory::Jet);

		policy
			.issue_at(&verification, Body::new(subject(), Permission::User), &secret(), NOW)
			.expect("Only the oversized session lifetime should fail.");
	}
}
