use std::collections::HashMap;

use super::*;
use crate::net::types::{Profile, Role, Session, Theme, User};

fn session(id: &str) -> Session {
    Session {
        access_token: "at".to_owned(),
        token_type: "bearer".to_owned(),
        expires_in: 3600,
        expires_at: None,
        refresh_token: "rt".to_owned(),
        user: User { id: id.to_owned(), email: None, user_metadata: HashMap::new(), app_metadata: HashMap::new() },
    }
}

fn admin_profile(id: &str) -> Profile {
    Profile { id: id.to_owned(), name: None, role: Role::Admin, theme_preference: Theme::Dark }
}

// =============================================================
// protected_outcome
// =============================================================

#[test]
fn protected_shows_placeholder_while_loading() {
    assert_eq!(protected_outcome(&AuthState::default()), GuardOutcome::Loading);
}

#[test]
fn protected_redirects_when_signed_out() {
    assert_eq!(protected_outcome(&AuthState::signed_out()), GuardOutcome::Redirect(LOGIN_ROUTE));
}

#[test]
fn protected_renders_when_signed_in() {
    assert_eq!(protected_outcome(&AuthState::signed_in(session("u1"), None)), GuardOutcome::Render);
}

#[test]
fn protected_redirects_after_resolution_with_error() {
    let state = AuthState { error: Some("Invalid credentials".to_owned()), ..AuthState::signed_out() };
    assert_eq!(protected_outcome(&state), GuardOutcome::Redirect(LOGIN_ROUTE));
}

// =============================================================
// login_outcome
// =============================================================

#[test]
fn login_redirects_authenticated_admin_home() {
    let state = AuthState::signed_in(session("u1"), Some(admin_profile("u1")));
    assert_eq!(login_outcome(&state), GuardOutcome::Redirect(DEFAULT_ROUTE));
}

#[test]
fn login_renders_form_when_signed_out() {
    assert_eq!(login_outcome(&AuthState::signed_out()), GuardOutcome::Render);
}

#[test]
fn login_renders_form_while_loading() {
    assert_eq!(login_outcome(&AuthState::default()), GuardOutcome::Render);
}

// =============================================================
// fallback
// =============================================================

#[test]
fn unknown_paths_go_to_default_route() {
    assert_eq!(fallback_destination(), "/");
    assert_eq!(LOGIN_ROUTE, "/login");
}
