use super::*;

#[test]
fn validate_credentials_trims_email() {
    assert_eq!(
        validate_credentials("  a@b.com ", "secret"),
        Ok(("a@b.com".to_owned(), "secret".to_owned()))
    );
}

#[test]
fn validate_credentials_keeps_password_verbatim() {
    assert_eq!(
        validate_credentials("a@b.com", " pass word "),
        Ok(("a@b.com".to_owned(), " pass word ".to_owned()))
    );
}

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("   ", "secret"), Err(MISSING_FIELDS));
    assert_eq!(validate_credentials("a@b.com", ""), Err(MISSING_FIELDS));
}

#[test]
fn failure_message_uses_provider_text() {
    let err = AuthError::SignIn("Invalid credentials".to_owned());
    assert_eq!(sign_in_failure_message(&err), "Invalid credentials");
}

#[test]
fn failure_message_falls_back_when_blank() {
    let err = AuthError::SignIn(String::new());
    assert_eq!(sign_in_failure_message(&err), SIGN_IN_FALLBACK);
}
