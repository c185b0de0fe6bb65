//! Token body (claims): subject, permission, and expiration.

// self
use crate::{
	_prelude::*,
	auth::{Algorithm, SubjectId},
};

/// Error returned when a permission label cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown permission label {label:?}.")]
pub struct PermissionParseError {
	/// Rejected label.
	pub label: String,
}

/// Permission level granted by a token, ordered by rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i64")]
pub enum Permission {
	/// Caller may not use the service.
	#[default]
	NoPermission = 0,
	/// Caller may only complete registration.
	UserRegistration = 1,
	/// Caller may use services it owns.
	User = 2,
	/// Caller may perform any operation.
	Admin = 3,
}
impl Permission {
	/// All permissions in ascending rank.
	pub const ALL: [Permission; 4] =
		[Permission::NoPermission, Permission::UserRegistration, Permission::User, Permission::Admin];

	/// Returns the canonical label for the permission.
	pub const fn as_str(self) -> &'static str {
		match self {
			Permission::NoPermission => "NO_PERM",
			Permission::UserRegistration => "USER_REGISTRATION",
			Permission::User => "USER",
			Permission::Admin => "ADMIN",
		}
	}

	/// Numeric rank used for comparisons and on the wire.
	pub const fn rank(self) -> i32 {
		self as i32
	}

	/// Algorithm a freshly issued token with this permission should use.
	pub const fn default_algorithm(self) -> Algorithm {
		match self {
			Permission::Admin => Algorithm::Hs512,
			_ => Algorithm::Hs256,
		}
	}

	/// Algorithm a token with this permission must be signed with, if any.
	pub const fn required_algorithm(self) -> Option<Algorithm> {
		match self {
			Permission::Admin => Some(Algorithm::Hs512),
			_ => None,
		}
	}

	/// Returns `true` if `alg` satisfies the binding for this permission.
	pub fn permits_algorithm(self, alg: Algorithm) -> bool {
		self.required_algorithm().is_none_or(|required| required == alg)
	}

	/// Returns `true` if this permission meets or exceeds `required`.
	pub fn satisfies(self, required: Permission) -> bool {
		self >= required
	}
}
impl From<Permission> for i32 {
	fn from(value: Permission) -> Self {
		value.rank()
	}
}
impl TryFrom<i64> for Permission {
	type Error = Error;

	fn try_from(value: i64) -> Result<Self> {
		match value {
			0 => Ok(Permission::NoPermission),
			1 => Ok(Permission::UserRegistration),
			2 => Ok(Permission::User),
			3 => Ok(Permission::Admin),
			_ => Err(Error::UnknownPermission { value }),
		}
	}
}
impl Display for Permission {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Permission {
	type Err = PermissionParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Permission::ALL
			.into_iter()
			.find(|permission| permission.as_str() == s)
			.ok_or_else(|| PermissionParseError { label: s.to_owned() })
	}
}

/// Decoded token claims.
///
/// Serializes to `{"UUID":<string>,"Permission":<int>,"ExpirationTimestamp":<int>}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBody")]
pub struct Body {
	/// Subject the token was issued to.
	#[serde(rename = "UUID")]
	pub subject: SubjectId,
	/// Granted permission.
	#[serde(rename = "Permission")]
	pub permission: Permission,
	/// Expiration as Unix epoch seconds; zero means unset.
	#[serde(rename = "ExpirationTimestamp")]
	pub expiration_timestamp: i64,
}
impl Body {
	/// Creates a body without an expiration; issuance stamps one before signing.
	pub fn new(subject: SubjectId, permission: Permission) -> Self {
		Self { subject, permission, expiration_timestamp: 0 }
	}

	/// Sets the expiration timestamp.
	pub fn with_expiration(mut self, expiration_timestamp: i64) -> Self {
		self.expiration_timestamp = expiration_timestamp;

		self
	}

	/// Returns `true` if the body counts as expired at `now` (epoch seconds).
	///
	/// An unset (zero or negative) expiration is always expired.
	pub fn is_expired_at(&self, now: i64) -> bool {
		self.expiration_timestamp <= 0 || now >= self.expiration_timestamp
	}

	/// Returns `true` if the body is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc().unix_timestamp())
	}

	/// Fails with [`Error::ExpiredBody`] when the body is expired at `now`.
	pub fn ensure_live_at(&self, now: i64) -> Result<()> {
		if self.is_expired_at(now) { Err(Error::ExpiredBody) } else { Ok(()) }
	}
}
impl TryFrom<RawBody> for Body {
	type Error = Error;

	fn try_from(raw: RawBody) -> Result<Self> {
		let subject = SubjectId::new(&raw.uuid)?;
		let permission = raw.permission.try_into()?;

		Ok(Self { subject, permission, expiration_timestamp: raw.expiration_timestamp })
	}
}

/// Wire shape of [`Body`] before identifier and range validation.
///
/// Missing fields decode as zero values.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawBody {
	/// Raw subject identifier.
	#[serde(rename = "UUID")]
	pub uuid: String,
	/// Raw permission value.
	#[serde(rename = "Permission")]
	pub permission: i64,
	/// Expiration as Unix epoch seconds.
	#[serde(rename = "ExpirationTimestamp")]
	pub expiration_timestamp: i64,
}
