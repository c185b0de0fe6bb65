//! HMAC signing and constant-time verification of encoded token payloads.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;
// self
use crate::{
	_prelude::*,
	auth::{Algorithm, Body, Header, SecretKey},
	codec,
};

/// Computes the unpadded base64url HMAC of `payload` under `key`.
///
/// Signing is deterministic: the same inputs always produce the same digest.
///
/// # Errors
///
/// Returns [`Error::UnsupportedAlgorithm`] for anything but HS256/HS512.
pub fn sign(alg: Algorithm, payload: &str, key: &SecretKey) -> Result<String> {
	let key = key.expose().as_bytes();
	let digest = match alg {
		Algorithm::Hs256 => mac::<Hmac<Sha256>>(key, payload.as_bytes())?,
		Algorithm::Hs512 => mac::<Hmac<Sha512>>(key, payload.as_bytes())?,
		Algorithm::NoAlg => return Err(Error::UnsupportedAlgorithm { algorithm: alg.as_str() }),
	};

	Ok(URL_SAFE_NO_PAD.encode(digest))
}

/// Recomputes the digest of `payload` and compares it to `expected` in constant time.
///
/// A payload that cannot be signed never verifies.
pub fn verify(alg: Algorithm, payload: &str, key: &SecretKey, expected: &str) -> bool {
	match sign(alg, payload, key) {
		Ok(actual) => constant_time_eq(&actual, expected),
		Err(_) => false,
	}
}

/// Assembles a signed `header.body.signature` triplet without any policy checks.
///
/// # Errors
///
/// Propagates [`codec::encode`] and [`sign`] failures.
pub fn sign_token(header: &Header, body: &Body, key: &SecretKey) -> Result<String> {
	let signing_input = format!("{}.{}", codec::encode(header)?, codec::encode(body)?);
	let signature = sign(header.alg, &signing_input, key)?;

	Ok(format!("{signing_input}.{signature}"))
}

/// Compares two strings without short-circuiting on the first differing byte.
pub fn constant_time_eq(lhs: &str, rhs: &str) -> bool {
	lhs.as_bytes().ct_eq(rhs.as_bytes()).into()
}

fn mac<M>(key: &[u8], payload: &[u8]) -> Result<Vec<u8>>
where
	M: Mac + KeyInit,
{
	let mut mac = <M as KeyInit>::new_from_slice(key)?;

	mac.update(payload);

	Ok(mac.finalize().into_bytes().to_vec())
}
