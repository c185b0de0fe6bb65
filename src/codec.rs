//! Base64url segment codec and JSON (de)serialization for token parts.

// crates.io
use base64::{
	Engine as _,
	engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

const JSON_NULL: &[u8] = b"null";

/// Serializes `value` to JSON and encodes it as unpadded base64url.
///
/// # Errors
///
/// Returns [`Error::NilInput`] when the value serializes to JSON `null` (an absent value) and
/// [`Error::Encode`] when serialization fails.
pub fn encode<T>(value: &T) -> Result<String>
where
	T: ?Sized + Serialize,
{
	let json = serde_json::to_vec(value).map_err(Error::Encode)?;

	if json == JSON_NULL {
		return Err(Error::NilInput);
	}

	Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decodes a base64url segment, restoring any stripped padding first.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] for blank input and [`Error::Decode`] for malformed input.
pub fn decode(segment: &str) -> Result<Vec<u8>> {
	if segment.trim().is_empty() {
		return Err(Error::EmptyInput);
	}

	let mut padded = segment.to_owned();
	let rem = padded.len() % 4;

	if rem > 0 {
		padded.push_str(&"=".repeat(4 - rem));
	}

	Ok(URL_SAFE.decode(padded)?)
}

/// Decodes a base64url segment and parses it as JSON.
///
/// `part` names the segment in [`Error::MalformedJson`].
///
/// # Errors
///
/// Propagates [`decode`] failures and returns [`Error::MalformedJson`] when parsing fails or
/// anything but whitespace follows the document.
pub fn decode_json<T>(segment: &str, part: &'static str) -> Result<T>
where
	T: DeserializeOwned,
{
	let bytes = decode(segment)?;
	let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
	let value = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::MalformedJson { segment: part, source })?;

	deserializer.end().map_err(|e| Error::MalformedJson {
		segment: part,
		source: serde_path_to_error::Error::new(serde_path_to_error::Track::new().path(), e),
	})?;

	Ok(value)
}
