//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn token() -> ActivationToken {
    ActivationToken::random()
}

#[fixture]
fn pending_user(token: ActivationToken) -> User {
    User::pending(
        UserId::random(),
        Email::new("ada@example.com").expect("valid email"),
        token,
    )
}

fn credential() -> CredentialHash {
    CredentialHash::new("digest").expect("valid digest")
}

fn name() -> DisplayName {
    DisplayName::new("Ada Lovelace").expect("valid name")
}

#[rstest]
#[case("ada@example.com", "ada@example.com")]
#[case("  ADA@Example.com", "ada@example.com")]
fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(Email::new(raw).expect("valid").as_ref(), expected);
}

#[rstest]
#[case("", FieldViolation::Required)]
#[case("ada", FieldViolation::InvalidFormat)]
#[case("@example.com", FieldViolation::InvalidFormat)]
#[case("ada@", FieldViolation::InvalidFormat)]
#[case("a@b@c", FieldViolation::InvalidFormat)]
#[case("ada lovelace@example.com", FieldViolation::InvalidFormat)]
fn malformed_emails_are_rejected(#[case] raw: &str, #[case] violation: FieldViolation) {
    let err = Email::new(raw).expect_err("invalid email");
    assert_eq!(err.violation(), violation);
    assert_eq!(err.field(), "email");
}

#[rstest]
fn overlong_email_is_rejected() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    assert!(matches!(
        Email::new(raw).map_err(|err| err.violation()),
        Err(FieldViolation::TooLong { .. })
    ));
}

#[rstest]
fn pending_user_is_unactivated_with_placeholder(pending_user: User) {
    assert!(!pending_user.is_activated());
    assert!(pending_user.credential().is_placeholder());
    assert!(pending_user.display_name().is_none());
    assert!(pending_user.has_role(Role::User));
    assert!(!pending_user.has_role(Role::Admin));
}

#[rstest]
fn activation_sets_profile_and_consumes_token(token: ActivationToken) {
    let mut user = pending_user(token);
    user.activate(&token, name(), credential())
        .expect("activation succeeds");

    assert!(user.is_activated());
    assert_eq!(user.display_name().map(DisplayName::as_str), Some("Ada Lovelace"));
    assert!(!user.credential().is_placeholder());
    assert!(user.activation_token().is_none());
}

#[rstest]
fn activation_happens_exactly_once(token: ActivationToken) {
    let mut user = pending_user(token);
    user.activate(&token, name(), credential())
        .expect("first activation");
    assert_eq!(
        user.activate(&token, name(), credential()),
        Err(ActivationError::AlreadyActivated)
    );
}

#[rstest]
fn activation_requires_matching_token(mut pending_user: User) {
    let result = pending_user.activate(&ActivationToken::random(), name(), credential());
    assert_eq!(result, Err(ActivationError::TokenMismatch));
    assert!(!pending_user.is_activated());
}

#[rstest]
fn placeholder_cannot_be_constructed_from_input() {
    assert!(CredentialHash::new("!").is_err());
    assert!(CredentialHash::new("  ").is_err());
}

#[rstest]
fn credential_debug_is_redacted() {
    assert_eq!(format!("{:?}", credential()), "CredentialHash(..)");
}

#[rstest]
fn change_profile_keeps_name_when_absent(token: ActivationToken) {
    let mut user = pending_user(token);
    user.activate(&token, name(), credential())
        .expect("activation");
    let email = Email::new("countess@example.com").expect("valid email");
    user.change_profile(email.clone(), None);

    assert_eq!(user.email(), &email);
    assert_eq!(user.display_name().map(DisplayName::as_str), Some("Ada Lovelace"));
}

#[rstest]
fn roles_are_additive(pending_user: User) {
    let admin = pending_user.with_role(Role::Admin);
    assert!(admin.has_role(Role::Admin));
    assert!(admin.has_role(Role::User));
}
