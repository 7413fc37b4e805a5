//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the route guards and user-aware components through a
//! `RwSignal<AuthState>` context; written only by the session store.
//!
//! Every transition below returns a whole new value so `user` and `session`
//! always change together.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Profile, Role, Session, User};

/// Authentication state: identity, profile, session, and loading status.
///
/// `loading` is `true` only until the first session check resolves.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub profile: Option<Profile>,
    pub session: Option<Session>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, profile: None, session: None, loading: true, error: None }
    }
}

impl AuthState {
    /// Signed in with `session`; the profile may legitimately be missing.
    #[must_use]
    pub fn signed_in(session: Session, profile: Option<Profile>) -> Self {
        Self { user: Some(session.user.clone()), profile, session: Some(session), loading: false, error: None }
    }

    /// Fully signed out.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { loading: false, ..Self::default() }
    }

    /// Same state with the initial check marked as resolved.
    #[must_use]
    pub fn resolved(&self) -> Self {
        Self { loading: false, ..self.clone() }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Admin only with a loaded profile whose role is `admin`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.role == Role::Admin)
    }

    /// Best label for the signed-in user: profile name, then email.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        self.profile
            .as_ref()
            .and_then(|p| p.name.clone())
            .or_else(|| self.user.as_ref().and_then(|u| u.email.clone()))
    }
}
