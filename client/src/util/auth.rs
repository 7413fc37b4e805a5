//! Route-guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every gated route applies the same rules, so the decision is a pure
//! function of `AuthState` resolved before any content is chosen. The guard
//! components in `components::guard` only render the outcome.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;

/// Public sign-in route.
pub const LOGIN_ROUTE: &str = "/login";
/// Protected landing route; also the target for unknown paths.
pub const DEFAULT_ROUTE: &str = "/";

/// What a guarded route should do for the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Initial session check still running: show a placeholder.
    Loading,
    /// Navigate elsewhere and render nothing.
    Redirect(&'static str),
    /// Render the wrapped content.
    Render,
}

/// Decision for a protected route.
#[must_use]
pub fn protected_outcome(state: &AuthState) -> GuardOutcome {
    if state.loading {
        GuardOutcome::Loading
    } else if state.is_authenticated() {
        GuardOutcome::Render
    } else {
        GuardOutcome::Redirect(LOGIN_ROUTE)
    }
}

/// Decision for the login route: signed-in users never see the form.
#[must_use]
pub fn login_outcome(state: &AuthState) -> GuardOutcome {
    if state.is_authenticated() {
        GuardOutcome::Redirect(DEFAULT_ROUTE)
    } else {
        GuardOutcome::Render
    }
}

/// Destination for paths that match no route, regardless of auth state.
#[must_use]
pub fn fallback_destination() -> &'static str {
    DEFAULT_ROUTE
}
