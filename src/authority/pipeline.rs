//! Ordered verification steps applied by [`TokenAuthority::validate`](super::TokenAuthority).
//!
//! Each step returns the first specific error it detects; later steps never run after a failure.

// self
use crate::{
	_prelude::*,
	auth::{
		Algorithm, Body, Header, Identification, Permission, RawBody, RawHeader, Secret,
		TokenCategory, validate_secret_at,
	},
	codec, signer,
};

/// Policy a token must satisfy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requirement {
	/// Category the token must carry.
	pub category: TokenCategory,
	/// Minimum permission the token must grant.
	pub permission: Permission,
}

/// The three raw segments of a token string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segments<'a> {
	/// Encoded header.
	pub header: &'a str,
	/// Encoded body.
	pub body: &'a str,
	/// Encoded signature.
	pub signature: &'a str,
}
impl<'a> Segments<'a> {
	/// Splits `token` on `.` into exactly three segments.
	pub fn split(token: &'a str) -> Result<Self> {
		let mut parts = token.split('.');

		match (parts.next(), parts.next(), parts.next(), parts.next()) {
			(Some(header), Some(body), Some(signature), None) => Ok(Self { header, body, signature }),
			_ => Err(Error::IncompleteToken),
		}
	}

	/// Returns the `header.body` signing input.
	pub fn signing_input(&self) -> String {
		format!("{}.{}", self.header, self.body)
	}
}

/// Steps 1–2: identification presence and secret validity.
///
/// Returns the token string and the validated secret.
pub fn check_identification(
	identification: Option<&Identification>,
	now: i64,
) -> Result<(&str, &Secret)> {
	let identification = identification.ok_or(Error::NilIdentification)?;

	if identification.token.trim().is_empty() {
		return Err(Error::EmptyToken);
	}

	let secret = validate_secret_at(identification.secret.as_ref(), now)?;

	Ok((&identification.token, secret))
}

/// Step 4: decode the header and range-check its enums.
pub fn decode_header(segment: &str) -> Result<Header> {
	codec::decode_json::<RawHeader>(segment, "header")?.try_into()
}

/// Step 5: decode the body, check its identifier and permission, and reject expired bodies.
pub fn decode_body(segment: &str, now: i64) -> Result<Body> {
	let body: Body = codec::decode_json::<RawBody>(segment, "body")?.try_into()?;

	body.ensure_live_at(now)?;

	Ok(body)
}

/// Steps 6–8: permission rank, admin/HS512 binding, and category match.
pub fn check_policy(header: &Header, body: &Body, requirement: &Requirement) -> Result<()> {
	if !body.permission.satisfies(requirement.permission) {
		return Err(Error::InsufficientPermission);
	}

	check_algorithm_binding(header.alg, body.permission)?;

	if header.token_typ != requirement.category {
		return Err(Error::InvalidTokenCategory);
	}

	Ok(())
}

/// Admin tokens must be signed with HS512; a violation is reported as insufficient permission.
pub fn check_algorithm_binding(alg: Algorithm, permission: Permission) -> Result<()> {
	if permission.permits_algorithm(alg) { Ok(()) } else { Err(Error::InsufficientPermission) }
}

/// Step 9: rebuild the full triplet and compare it with the presented token.
pub fn check_signature(
	token: &str,
	segments: &Segments,
	alg: Algorithm,
	secret: &Secret,
) -> Result<()> {
	let signing_input = segments.signing_input();
	let signature = signer::sign(alg, &signing_input, &secret.key)?;
	let rebuilt = format!("{signing_input}.{signature}");

	if signer::constant_time_eq(&rebuilt, token) { Ok(()) } else { Err(Error::InvalidSignature) }
}
