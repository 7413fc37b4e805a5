use std::collections::HashMap;

use super::*;
use crate::net::types::Theme;

fn session(id: &str) -> Session {
    Session {
        access_token: "at".to_owned(),
        token_type: "bearer".to_owned(),
        expires_in: 3600,
        expires_at: None,
        refresh_token: "rt".to_owned(),
        user: User {
            id: id.to_owned(),
            email: Some(format!("{id}@example.com")),
            user_metadata: HashMap::new(),
            app_metadata: HashMap::new(),
        },
    }
}

fn profile(id: &str, role: Role, name: Option<&str>) -> Profile {
    Profile { id: id.to_owned(), name: name.map(str::to_owned), role, theme_preference: Theme::Light }
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(state.session.is_none());
    assert!(state.profile.is_none());
}

#[test]
fn auth_state_default_is_loading() {
    assert!(AuthState::default().loading);
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn signed_in_sets_user_and_session_together() {
    let state = AuthState::signed_in(session("u1"), None);
    assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("u1"));
    assert!(state.session.is_some());
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn signed_out_clears_everything() {
    let state = AuthState::signed_out();
    assert!(state.user.is_none());
    assert!(state.session.is_none());
    assert!(state.profile.is_none());
    assert!(!state.loading);
}

#[test]
fn resolved_keeps_error_and_clears_loading() {
    let before = AuthState { error: Some("boom".to_owned()), ..AuthState::default() };
    let after = before.resolved();
    assert!(!after.loading);
    assert_eq!(after.error.as_deref(), Some("boom"));
}

// =============================================================
// Derived values
// =============================================================

#[test]
fn is_authenticated_follows_user() {
    assert!(!AuthState::signed_out().is_authenticated());
    assert!(AuthState::signed_in(session("u1"), None).is_authenticated());
}

#[test]
fn is_admin_requires_admin_profile() {
    assert!(AuthState::signed_in(session("u1"), Some(profile("u1", Role::Admin, None))).is_admin());
    assert!(!AuthState::signed_in(session("u1"), Some(profile("u1", Role::User, None))).is_admin());
}

#[test]
fn is_admin_false_without_profile() {
    assert!(!AuthState::signed_in(session("u1"), None).is_admin());
    assert!(!AuthState::default().is_admin());
}

#[test]
fn display_name_prefers_profile_name() {
    let named = AuthState::signed_in(session("u1"), Some(profile("u1", Role::User, Some("Ana"))));
    assert_eq!(named.display_name().as_deref(), Some("Ana"));

    let unnamed = AuthState::signed_in(session("u1"), Some(profile("u1", Role::User, None)));
    assert_eq!(unnamed.display_name().as_deref(), Some("u1@example.com"));

    assert!(AuthState::signed_out().display_name().is_none());
}
