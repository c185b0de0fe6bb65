//! Shared signing secrets and the redacting key wrapper.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use rand::Rng;
// self
use crate::_prelude::*;

/// Redacted secret key wrapper keeping key material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey(String);
impl SecretKey {
	/// Wraps a new key string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Generates a key from `byte_size` CSPRNG bytes, base64url-encoded with padding.
	pub fn generate(byte_size: usize) -> Self {
		let mut bytes = vec![0_u8; byte_size];

		rand::rng().fill(bytes.as_mut_slice());

		Self(URL_SAFE.encode(bytes))
	}

	/// Returns the inner key value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` if the key is empty or whitespace.
	pub fn is_blank(&self) -> bool {
		self.0.trim().is_empty()
	}
}
impl AsRef<str> for SecretKey {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SecretKey").field(&"<redacted>").finish()
	}
}
impl Display for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Shared secret supplied by the identity issuer for a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
	/// Key material used for HMAC signing.
	pub key: SecretKey,
	/// Creation instant as Unix epoch seconds; zero means unset.
	pub created_timestamp: i64,
	/// Expiration instant as Unix epoch seconds; zero means unset.
	pub expiration_timestamp: i64,
}
impl Secret {
	/// Creates a secret from raw epoch-second timestamps.
	pub fn new(key: impl Into<String>, created_timestamp: i64, expiration_timestamp: i64) -> Self {
		Self { key: SecretKey::new(key), created_timestamp, expiration_timestamp }
	}

	/// Creates a secret valid between two instants.
	pub fn between(key: impl Into<String>, created: OffsetDateTime, expires: OffsetDateTime) -> Self {
		Self::new(key, created.unix_timestamp(), expires.unix_timestamp())
	}

	/// Generates a random key of `byte_size` bytes valid between two instants.
	pub fn generate_between(
		byte_size: usize,
		created: OffsetDateTime,
		expires: OffsetDateTime,
	) -> Self {
		Self {
			key: SecretKey::generate(byte_size),
			created_timestamp: created.unix_timestamp(),
			expiration_timestamp: expires.unix_timestamp(),
		}
	}

	/// Checks the secret against the clock at `now` (epoch seconds).
	///
	/// Checks run in order: blank key, creation time unset or in the future, expiration unset or
	/// passed.
	pub fn validate_at(&self, now: i64) -> Result<()> {
		if self.key.is_blank() {
			return Err(Error::EmptySecretKey);
		}
		if self.created_timestamp <= 0 || self.created_timestamp > now {
			return Err(Error::InvalidSecretCreationTime);
		}
		if self.expiration_timestamp <= 0 || now >= self.expiration_timestamp {
			return Err(Error::ExpiredSecret);
		}

		Ok(())
	}

	/// Checks the secret against the current clock.
	pub fn validate(&self) -> Result<()> {
		self.validate_at(OffsetDateTime::now_utc().unix_timestamp())
	}
}

/// Validates an optional secret, reporting absence as [`Error::NilSecret`].
pub fn validate_secret_at(secret: Option<&Secret>, now: i64) -> Result<&Secret> {
	let secret = secret.ok_or(Error::NilSecret)?;

	secret.validate_at(now)?;

	Ok(secret)
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	const NOW: i64 = 1_700_000_000;

	#[test]
	fn key_formatters_redact() {
		let key = SecretKey::new("super-secret");

		assert_eq!(format!("{key:?}"), "SecretKey(\"<redacted>\")");
		assert_eq!(format!("{key}"), "<redacted>");

		let secret = Secret::new("super-secret", 1, 2);

		assert!(!format!("{secret:?}").contains("super-secret"));
	}

	#[test]
	fn validation_reports_first_failing_condition() {
		assert!(matches!(validate_secret_at(None, NOW), Err(Error::NilSecret)));
		assert!(matches!(
			Secret::new("  ", 0, 0).validate_at(NOW),
			Err(Error::EmptySecretKey)
		));
		assert!(matches!(
			Secret::new("key", 0, NOW + 10).validate_at(NOW),
			Err(Error::InvalidSecretCreationTime)
		));
		assert!(matches!(
			Secret::new("key", NOW + 1, NOW + 10).validate_at(NOW),
			Err(Error::InvalidSecretCreationTime)
		));
		assert!(matches!(Secret::new("key", NOW - 10, 0).validate_at(NOW), Err(Error::ExpiredSecret)));
		assert!(matches!(Secret::new("key", NOW - 10, NOW).validate_at(NOW), Err(Error::ExpiredSecret)));

		Secret::new("key", NOW, NOW + 1).validate_at(NOW).expect("Secret created now should be valid.");
	}

	#[test]
	fn generated_secrets_match_key_shape() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let secret = Secret::generate_between(32, now, now + Duration::days(7));

		assert_eq!(secret.key.expose().len(), 44, "32 bytes should encode to 44 padded characters.");
		assert!(secret.key.expose().ends_with('='));
		assert_eq!(secret.created_timestamp, now.unix_timestamp());
		assert_eq!(secret.expiration_timestamp - secret.created_timestamp, 7 * 86_400);
		assert_ne!(SecretKey::generate(32), SecretKey::generate(32));

		secret
			.validate_at(now.unix_timestamp())
			.expect("Freshly generated secret should be valid at its creation instant.");
	}
}
