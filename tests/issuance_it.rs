mod common;

// crates.io
use color_eyre::Result;
use time::{Duration, OffsetDateTime};
// self
use common::*;
use token_authority::{
	Error, IssuancePolicy, TokenAuthority,
	auth::{Algorithm, Body, Header, Identification, Permission, SubjectId, TokenCategory},
	extract_subject_id, new_token,
};

#[test]
fn issued_tokens_round_trip_through_validation() -> Result<()> {
	let secret = live_secret();
	let original = body(Permission::User);
	let token = new_token(&header(Algorithm::Hs256, TokenCategory::Jwt), original.clone(), &secret)?;
	let mut authority = TokenAuthority::new(TokenCategory::Jwt, Permission::User);

	authority.authorize(Identification::new(token, secret))?;

	let decoded = authority.body().cloned().expect("Authorized authority should expose claims.");

	assert_eq!(decoded.subject, original.subject);
	assert_eq!(decoded.permission, original.permission);
	assert_ne!(decoded.expiration_timestamp, original.expiration_timestamp);

	let horizon = (OffsetDateTime::now_utc() + Duration::hours(2)).unix_timestamp();

	assert!((horizon - decoded.expiration_timestamp).abs() <= 5, "Session tokens live for two hours.");

	Ok(())
}

#[test]
fn admin_requires_hs512_at_issuance() {
	let err = new_token(
		&header(Algorithm::Hs256, TokenCategory::Jwt),
		body(Permission::Admin),
		&live_secret(),
	)
	.expect_err("Admin tokens must not be issued with HS256.");

	assert!(matches!(err, Error::InsufficientPermission));

	new_token(
		&Header::for_permission(Permission::Admin, TokenCategory::Jwt),
		body(Permission::Admin),
		&live_secret(),
	)
	.expect("The default admin header should be accepted.");
}

#[test]
fn generated_secret_and_subject_issue_verification_tokens() -> Result<()> {
	let policy = IssuancePolicy::builder().verification_lifetime(Duration::days(1)).build()?;
	let secret = policy.generate_secret()?;
	let subject = SubjectId::generate();
	let token = policy.issue(
		&Header::for_permission(Permission::UserRegistration, TokenCategory::Jet),
		Body::new(subject.clone(), Permission::UserRegistration),
		&secret,
	)?;

	assert_eq!(extract_subject_id(&token), Some(subject.clone()));

	let mut authority = TokenAuthority::new(TokenCategory::Jet, Permission::UserRegistration);

	authority.authorize(Identification::new(token, secret))?;

	assert_eq!(authority.body().map(|body| &body.subject), Some(&subject));

	Ok(())
}

#[test]
fn expired_secret_blocks_issuance_and_validation() -> Result<()> {
	let now = OffsetDateTime::now_utc();
	let live = live_secret();
	let token = new_token(&header(Algorithm::Hs256, TokenCategory::Jwt), body(Permission::User), &live)?;
	let mut expired = live.clone();

	expired.expiration_timestamp = (now - Duration::seconds(1)).unix_timestamp();

	assert!(matches!(
		new_token(&header(Algorithm::Hs256, TokenCategory::Jwt), body(Permission::User), &expired),
		Err(Error::ExpiredSecret)
	));

	let mut authority = TokenAuthority::new(TokenCategory::Jwt, Permission::User);

	assert!(matches!(
		authority.authorize(Identification::new(token, expired)),
		Err(Error::ExpiredSecret)
	));

	Ok(())
}

#[test]
fn extract_subject_id_ignores_unparseable_tokens() {
	assert_eq!(extract_subject_id(""), None);
	assert_eq!(extract_subject_id("a.b"), None);
	assert_eq!(extract_subject_id("eyJBbGciOjF9.e30.sig"), None, "An empty body has no subject.");
}
