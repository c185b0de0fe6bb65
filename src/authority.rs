//! Stateful façade that holds the required policy and the decoded claims of the last
//! verification run.
//!
//! [`TokenAuthority::authorize`] stores the caller's [`Identification`] and runs the full
//! [`pipeline`]; [`TokenAuthority::validate`] re-runs it against whatever identification is held,
//! always re-parsing the token instead of trusting cached claims. On success the decoded
//! [`Header`] and [`Body`] are trusted; after a failure they hold whatever was parsed before the
//! failing step and must not be trusted.

pub mod pipeline;

pub use pipeline::Requirement;

// self
use crate::{
	_prelude::*,
	auth::{Body, Header, Identification, Permission, TokenCategory},
	authority::pipeline::Segments,
	obs::{self, OpKind},
};

/// Lifecycle state of a [`TokenAuthority`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthorityState {
	/// Policy is set but no verification has completed (also the shape after invalidation).
	#[default]
	Unconfigured,
	/// The last verification run passed every check.
	Authorized,
	/// The last verification run failed.
	Rejected,
}

/// Verifies presented tokens against a fixed category + permission requirement.
#[derive(Clone, Debug, Default)]
pub struct TokenAuthority {
	requirement: Requirement,
	identification: Option<Identification>,
	header: Option<Header>,
	body: Option<Body>,
	state: AuthorityState,
}
impl TokenAuthority {
	/// Creates an authority requiring `category` and at least `permission`.
	pub fn new(category: TokenCategory, permission: Permission) -> Self {
		Self::with_requirement(Requirement { category, permission })
	}

	/// Creates an authority from a prepared [`Requirement`].
	pub fn with_requirement(requirement: Requirement) -> Self {
		Self { requirement, ..Default::default() }
	}

	/// Stores `identification` and verifies it.
	pub fn authorize(&mut self, identification: Identification) -> Result<()> {
		self.authorize_at(identification, OffsetDateTime::now_utc().unix_timestamp())
	}

	/// Stores `identification` and verifies it against the clock at `now` (epoch seconds).
	pub fn authorize_at(&mut self, identification: Identification, now: i64) -> Result<()> {
		self.identification = Some(identification);

		self.validate_at(now)
	}

	/// Replaces the held identification without verifying it.
	pub fn set_identification(&mut self, identification: Identification) {
		self.identification = Some(identification);
	}

	/// Re-runs the full verification pipeline against the held identification.
	pub fn validate(&mut self) -> Result<()> {
		self.validate_at(OffsetDateTime::now_utc().unix_timestamp())
	}

	/// Re-runs the full verification pipeline against the clock at `now` (epoch seconds).
	pub fn validate_at(&mut self, now: i64) -> Result<()> {
		let result = obs::observe(OpKind::Validate, "validate", || self.run_pipeline(now));

		self.state =
			if result.is_ok() { AuthorityState::Authorized } else { AuthorityState::Rejected };

		result
	}

	/// Returns `true` if no claims are decoded or the decoded body is expired.
	///
	/// This is a temporal probe only; it never re-checks the signature.
	pub fn has_expired(&self) -> bool {
		self.has_expired_at(OffsetDateTime::now_utc().unix_timestamp())
	}

	/// Same as [`has_expired`](Self::has_expired) against the clock at `now` (epoch seconds).
	pub fn has_expired_at(&self, now: i64) -> bool {
		match (&self.header, &self.body) {
			(Some(_), Some(body)) => body.is_expired_at(now),
			_ => true,
		}
	}

	/// Clears the identification and decoded claims and resets the requirement to zero values.
	pub fn invalidate(&mut self) {
		*self = Self::default();
	}

	/// Policy the authority enforces.
	pub fn requirement(&self) -> Requirement {
		self.requirement
	}

	/// Category the authority requires.
	pub fn required_category(&self) -> TokenCategory {
		self.requirement.category
	}

	/// Minimum permission the authority requires.
	pub fn required_permission(&self) -> Permission {
		self.requirement.permission
	}

	/// Held identification, if any.
	pub fn identification(&self) -> Option<&Identification> {
		self.identification.as_ref()
	}

	/// Decoded header; trusted only while [`state`](Self::state) is `Authorized`.
	pub fn header(&self) -> Option<&Header> {
		self.header.as_ref()
	}

	/// Decoded body; trusted only while [`state`](Self::state) is `Authorized`.
	pub fn body(&self) -> Option<&Body> {
		self.body.as_ref()
	}

	/// Outcome of the last verification run.
	pub fn state(&self) -> AuthorityState {
		self.state
	}

	/// Returns `true` if the last verification run succeeded.
	pub fn is_authorized(&self) -> bool {
		matches!(self.state, AuthorityState::Authorized)
	}

	fn run_pipeline(&mut self, now: i64) -> Result<()> {
		self.header = None;
		self.body = None;

		let (token, secret) = pipeline::check_identification(self.identification.as_ref(), now)?;
		let segments = Segments::split(token)?;
		let header = *self.header.insert(pipeline::decode_header(segments.header)?);
		let body = self.body.insert(pipeline::decode_body(segments.body, now)?);

		pipeline::check_policy(&header, body, &self.requirement)?;
		pipeline::check_signature(token, &segments, header.alg, secret)
	}
}
