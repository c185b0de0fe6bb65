//! Subject identifiers in the lowercase ULID format carried by token bodies.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use rand::Rng;
// self
use crate::_prelude::*;

/// Number of characters in an encoded ULID.
pub const IDENTIFIER_LEN: usize = 26;

// Crockford base32 without I, L, O, U.
const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";
const TIMESTAMP_BITS: u32 = 48;
const RANDOM_BITS: u32 = 80;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Subject identifier cannot be empty.")]
	Empty,
	/// The identifier does not have exactly [`IDENTIFIER_LEN`] characters.
	#[error("Subject identifier must be {expected} characters, got {actual}.")]
	BadLength {
		/// Required character count.
		expected: usize,
		/// Observed character count.
		actual: usize,
	},
	/// The identifier contains a character outside the lowercase Crockford alphabet.
	#[error("Subject identifier contains invalid character {found:?}.")]
	InvalidCharacter {
		/// Offending character.
		found: char,
	},
	/// The leading character encodes more than 128 bits.
	#[error("Subject identifier overflows 128 bits.")]
	Overflow,
}

/// Returns `true` when `view` is a 26-character lowercase ULID.
pub fn is_valid_identifier(view: &str) -> bool {
	validate_view(view).is_ok()
}

/// Unique, timestamp-sortable identifier for a token subject.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);
impl SubjectId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Generates a fresh identifier stamped with the current clock.
	pub fn generate() -> Self {
		Self::generate_at(OffsetDateTime::now_utc())
	}

	/// Generates a fresh identifier stamped with the provided instant.
	///
	/// The first 48 bits carry the Unix timestamp in milliseconds and the remaining 80 bits are
	/// drawn from the thread-local CSPRNG.
	pub fn generate_at(instant: OffsetDateTime) -> Self {
		let millis = (instant.unix_timestamp_nanos() / 1_000_000).max(0) as u128;
		let timestamp = millis & ((1 << TIMESTAMP_BITS) - 1);
		let entropy = rand::rng().random::<u128>() & ((1 << RANDOM_BITS) - 1);

		Self(encode((timestamp << RANDOM_BITS) | entropy))
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for SubjectId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for SubjectId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<SubjectId> for String {
	fn from(value: SubjectId) -> Self {
		value.0
	}
}
impl TryFrom<String> for SubjectId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for SubjectId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for SubjectId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Subject({})", self.0)
	}
}
impl Display for SubjectId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for SubjectId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}

	let actual = view.chars().count();

	if actual != IDENTIFIER_LEN {
		return Err(IdentifierError::BadLength { expected: IDENTIFIER_LEN, actual });
	}
	if let Some(found) = view.chars().find(|c| !c.is_ascii() || !ALPHABET.contains(&(*c as u8))) {
		return Err(IdentifierError::InvalidCharacter { found });
	}
	// 26 symbols carry 130 bits; the top one may only use its low 3.
	if view.as_bytes()[0] > b'7' {
		return Err(IdentifierError::Overflow);
	}

	Ok(())
}

fn encode(value: u128) -> String {
	(0..IDENTIFIER_LEN)
		.map(|i| {
			let shift = 5 * (IDENTIFIER_LEN - 1 - i);

			ALPHABET[((value >> shift) & 0x1f) as usize] as char
		})
		.collect()
}
