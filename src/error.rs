//! Authority-level error types shared by the codec, signer, pipeline, and issuance helpers.

// self
use crate::{_prelude::*, auth::IdentifierError, issuance::IssuancePolicyError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
///
/// Every pipeline step returns the first specific error it detects; nothing is aggregated and
/// nothing is retried internally.
#[derive(Debug, ThisError)]
pub enum Error {
	/// No identification is held by the authority.
	#[error("Identification is missing.")]
	NilIdentification,
	/// Token string is empty or whitespace.
	#[error("Token string is empty.")]
	EmptyToken,
	/// Token string does not split into header, body, and signature.
	#[error("Token should contain a header, body, and signature.")]
	IncompleteToken,
	/// A segment handed to the decoder was blank.
	#[error("Cannot decode an empty segment.")]
	EmptyInput,
	/// A segment is not valid base64url.
	#[error("Segment is not valid base64url.")]
	Decode(#[from] base64::DecodeError),
	/// A decoded segment is not the expected JSON document.
	#[error("The {segment} segment contains malformed JSON.")]
	MalformedJson {
		/// Which token segment failed to parse.
		segment: &'static str,
		/// Structured parsing failure, including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},

	/// Identification carries no secret.
	#[error("Secret is missing.")]
	NilSecret,
	/// Secret key is empty or whitespace.
	#[error("Secret key is empty.")]
	EmptySecretKey,
	/// Secret creation timestamp is unset or lies in the future.
	#[error("Secret creation timestamp is invalid.")]
	InvalidSecretCreationTime,
	/// Secret expiration timestamp is unset or already passed.
	#[error("Secret has expired.")]
	ExpiredSecret,
	/// Body expiration timestamp is unset or already passed.
	#[error("Token body has expired.")]
	ExpiredBody,

	/// Caller lacks the required permission, or an admin token is not signed with HS512.
	#[error("Token lacks the required permission.")]
	InsufficientPermission,
	/// Token category differs from the one the authority requires.
	#[error("Token category does not match the required category.")]
	InvalidTokenCategory,
	/// Header names an algorithm outside the known range.
	#[error("Unknown algorithm value {value}.")]
	UnknownAlgorithm {
		/// Rejected wire value.
		value: i64,
	},
	/// Header names a token category outside the known range.
	#[error("Unknown token category value {value}.")]
	UnknownTokenCategory {
		/// Rejected wire value.
		value: i64,
	},
	/// Body names a permission outside the known range.
	#[error("Unknown permission value {value}.")]
	UnknownPermission {
		/// Rejected wire value.
		value: i64,
	},
	/// Body subject identifier failed the format check.
	#[error("Subject identifier is invalid.")]
	InvalidIdentifier(#[from] IdentifierError),

	/// Recomputed token does not match the presented token.
	#[error("Token signature is invalid.")]
	InvalidSignature,
	/// Algorithm cannot be used for signing.
	#[error("Algorithm {algorithm} is not supported for signing.")]
	UnsupportedAlgorithm {
		/// Label of the rejected algorithm.
		algorithm: &'static str,
	},
	/// HMAC rejected the key material.
	#[error("Secret key cannot initialize the MAC.")]
	SigningKey(#[from] hmac::digest::InvalidLength),

	/// Token category cannot be issued.
	#[error("Token category {category} is not supported for issuance.")]
	UnsupportedCategory {
		/// Label of the rejected category.
		category: &'static str,
	},
	/// Value handed to the encoder is absent.
	#[error("Cannot encode an absent value.")]
	NilInput,
	/// Value handed to the encoder could not be serialized.
	#[error("Value could not be serialized.")]
	Encode(#[source] serde_json::Error),
	/// Issuance policy failed validation.
	#[error(transparent)]
	IssuancePolicy(#[from] IssuancePolicyError),
}
impl Error {
	/// Returns a stable label for the error kind, suitable for span or metric fields.
	pub const fn kind(&self) -> &'static str {
		match self {
			Error::NilIdentification => "nil_identification",
			Error::EmptyToken => "empty_token",
			Error::IncompleteToken => "incomplete_token",
			Error::EmptyInput => "empty_input",
			Error::Decode(_) => "decode",
			Error::MalformedJson { .. } => "malformed_json",
			Error::NilSecret => "nil_secret",
			Error::EmptySecretKey => "empty_secret_key",
			Error::InvalidSecretCreationTime => "invalid_secret_creation_time",
			Error::ExpiredSecret => "expired_secret",
			Error::ExpiredBody => "expired_body",
			Error::InsufficientPermission => "insufficient_permission",
			Error::InvalidTokenCategory => "invalid_token_category",
			Error::UnknownAlgorithm { .. } => "unknown_algorithm",
			Error::UnknownTokenCategory { .. } => "unknown_token_category",
			Error::UnknownPermission { .. } => "unknown_permission",
			Error::InvalidIdentifier(_) => "invalid_identifier",
			Error::InvalidSignature => "invalid_signature",
			Error::UnsupportedAlgorithm { .. } => "unsupported_algorithm",
			Error::SigningKey(_) => "signing_key",
			Error::UnsupportedCategory { .. } => "unsupported_category",
			Error::NilInput => "nil_input",
			Error::Encode(_) => "encode",
			Error::IssuancePolicy(_) => "issuance_policy",
		}
	}
}
