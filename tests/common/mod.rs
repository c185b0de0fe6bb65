//! Shared fixtures for integration tests.
#![allow(dead_code)]

// crates.io
use time::{Duration, OffsetDateTime};
// self
use token_authority::auth::{
	Algorithm, Body, Header, Identification, Permission, Secret, SubjectId, TokenCategory,
};

/// Subject used across fixtures.
pub const SUBJECT: &str = "01d3x3wm2nnrdfzp0tka2vw9dx";

/// Secret key shaped like the ones the issuer hands out.
pub const KEY: &str = "j2Yzh-VcIm-lYUzBuqt8TVPeUHNYB5MP1gWvz3Bolow=";

pub fn subject() -> SubjectId {
	SubjectId::new(SUBJECT).expect("Subject fixture should be valid.")
}

/// Secret created a minute ago and valid for another day.
pub fn live_secret() -> Secret {
	let now = OffsetDateTime::now_utc();

	Secret::between(KEY, now - Duration::minutes(1), now + Duration::days(1))
}

pub fn header(alg: Algorithm, category: TokenCategory) -> Header {
	Header::new(alg, category)
}

pub fn body(permission: Permission) -> Body {
	Body::new(subject(), permission)
}

pub fn identification(token: impl Into<String>) -> Identification {
	Identification::new(token, live_secret())
}
