//! Stateless HMAC bearer-token authority: issue signed service tokens, verify them against a
//! shared secret, and bind permission levels to hash strength without a session store.
//!
//! A token is the dot-joined triplet `header.body.signature`, where the first two segments are
//! base64url (no padding) JSON documents and the last is an HMAC-SHA256/512 digest over them.
//! [`authority::TokenAuthority`] runs the verification pipeline; [`issuance`] mints new tokens
//! and secrets.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod authority;
pub mod codec;
pub mod error;
pub mod issuance;
pub mod obs;
pub mod signer;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}

pub use authority::TokenAuthority;
pub use error::{Error, Result};
pub use issuance::{IssuancePolicy, extract_subject_id, new_token};

#[cfg(test)] use color_eyre as _;
