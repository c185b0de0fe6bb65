//! Token header: signing algorithm plus token category.

// self
use crate::{_prelude::*, auth::Permission};

/// Hashing algorithm used to sign a token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i64")]
pub enum Algorithm {
	/// Unset zero value; never valid for signing.
	#[default]
	NoAlg = 0,
	/// HMAC-SHA256.
	Hs256 = 1,
	/// HMAC-SHA512, mandatory for admin tokens.
	Hs512 = 2,
}
impl Algorithm {
	/// Returns a stable label suitable for span fields and error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			Algorithm::NoAlg => "NO_ALG",
			Algorithm::Hs256 => "HS256",
			Algorithm::Hs512 => "HS512",
		}
	}
}
impl From<Algorithm> for i32 {
	fn from(value: Algorithm) -> Self {
		value as i32
	}
}
impl TryFrom<i64> for Algorithm {
	type Error = Error;

	fn try_from(value: i64) -> Result<Self> {
		match value {
			0 => Ok(Algorithm::NoAlg),
			1 => Ok(Algorithm::Hs256),
			2 => Ok(Algorithm::Hs512),
			_ => Err(Error::UnknownAlgorithm { value }),
		}
	}
}
impl Display for Algorithm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Purpose of a token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i64")]
pub enum TokenCategory {
	/// Unset zero value.
	#[default]
	NoType = 0,
	/// Session token.
	Jwt = 1,
	/// Email/verification token.
	Jet = 2,
}
impl TokenCategory {
	/// Returns a stable label suitable for span fields and error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenCategory::NoType => "NO_TYPE",
			TokenCategory::Jwt => "JWT",
			TokenCategory::Jet => "JET",
		}
	}

	/// Returns `true` for categories that may be issued.
	pub const fn is_issuable(self) -> bool {
		matches!(self, TokenCategory::Jwt | TokenCategory::Jet)
	}
}
impl From<TokenCategory> for i32 {
	fn from(value: TokenCategory) -> Self {
		value as i32
	}
}
impl TryFrom<i64> for TokenCategory {
	type Error = Error;

	fn try_from(value: i64) -> Result<Self> {
		match value {
			0 => Ok(TokenCategory::NoType),
			1 => Ok(TokenCategory::Jwt),
			2 => Ok(TokenCategory::Jet),
			_ => Err(Error::UnknownTokenCategory { value }),
		}
	}
}
impl Display for TokenCategory {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Decoded token header.
///
/// Serializes to `{"Alg":<int>,"TokenTyp":<int>}`; the field names are part of the signed
/// payload and must not change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawHeader")]
pub struct Header {
	/// Signing algorithm.
	#[serde(rename = "Alg")]
	pub alg: Algorithm,
	/// Token category.
	#[serde(rename = "TokenTyp")]
	pub token_typ: TokenCategory,
}
impl Header {
	/// Creates a header from its parts.
	pub const fn new(alg: Algorithm, token_typ: TokenCategory) -> Self {
		Self { alg, token_typ }
	}

	/// Creates a header using the default algorithm for `permission`.
	pub const fn for_permission(permission: Permission, token_typ: TokenCategory) -> Self {
		Self::new(permission.default_algorithm(), token_typ)
	}
}
impl TryFrom<RawHeader> for Header {
	type Error = Error;

	fn try_from(raw: RawHeader) -> Result<Self> {
		Ok(Self { alg: raw.alg.try_into()?, token_typ: raw.token_typ.try_into()? })
	}
}

/// Wire shape of [`Header`] before enum range validation.
///
/// Missing fields decode as zero.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawHeader {
	/// Raw algorithm value.
	#[serde(rename = "Alg")]
	pub alg: i64,
	/// Raw token category value.
	#[serde(rename = "TokenTyp")]
	pub token_typ: i64,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn header_serializes_with_wire_field_names() {
		let header = Header::new(Algorithm::Hs256, TokenCategory::Jwt);
		let payload = serde_json::to_string(&header).expect("Header should serialize to JSON.");

		assert_eq!(payload, r#"{"Alg":1,"TokenTyp":1}"#);
	}

	#[test]
	fn out_of_range_values_are_rejected() {
		let raw: RawHeader = serde_json::from_str(r#"{"Alg":7,"TokenTyp":1}"#)
			.expect("Raw header should accept any integer.");

		assert!(matches!(Header::try_from(raw), Err(Error::UnknownAlgorithm { value: 7 })));

		let raw: RawHeader = serde_json::from_str(r#"{"Alg":2,"TokenTyp":-1}"#)
			.expect("Raw header should accept any integer.");

		assert!(matches!(Header::try_from(raw), Err(Error::UnknownTokenCategory { value: -1 })));
		assert!(serde_json::from_str::<Header>(r#"{"Alg":9,"TokenTyp":1}"#).is_err());
	}

	#[test]
	fn missing_fields_decode_as_zero_values() {
		let header: Header =
			serde_json::from_str("{}").expect("Empty header should decode to zero values.");

		assert_eq!(header, Header::new(Algorithm::NoAlg, TokenCategory::NoType));
	}

	#[test]
	fn header_for_permission_picks_bound_algorithm() {
		assert_eq!(Header::for_permission(Permission::Admin, TokenCategory::Jwt).alg, Algorithm::Hs512);
		assert_eq!(Header::for_permission(Permission::User, TokenCategory::Jet).alg, Algorithm::Hs256);
		assert!(TokenCategory::Jet.is_issuable());
		assert!(!TokenCategory::NoType.is_issuable());
	}
}
