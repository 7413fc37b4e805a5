//! Identity-provider contract consumed by the session store.
//!
//! ARCHITECTURE
//! ============
//! The store never talks to a concrete provider; it receives an
//! `Rc<dyn IdentityProvider>` at construction so tests can substitute a fake.
//! Everything here is single-threaded (`?Send`): the app runs on the browser
//! event loop and listeners are plain `Rc` closures.
//!
//! `SessionListeners` is the shared fan-out used by provider implementations.
//! Delivery iterates a snapshot, so a listener may subscribe or unsubscribe
//! from inside its own callback.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;

use super::types::Session;

/// Error reported by the identity provider. Displays as the provider message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    /// Human-readable message suitable for display.
    pub message: String,
    /// HTTP status, when the failure came from a response.
    pub status: Option<u16>,
}

impl ProviderError {
    /// Build an error with no associated HTTP status.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), status: None }
    }

    /// Build an error carrying the response status.
    #[must_use]
    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self { message: message.into(), status: Some(status) }
    }
}

/// Why the provider delivered a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// Callback invoked for every session change, in provider delivery order.
pub type SessionListener = Rc<dyn Fn(AuthEvent, Option<Session>)>;

/// Handle for a registered listener.
///
/// Releasing happens exactly once: either through [`Subscription::unsubscribe`]
/// or when the handle is dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a release action.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// Stop receiving notifications.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Ordered registry of session listeners.
#[derive(Default)]
pub struct SessionListeners {
    entries: Rc<RefCell<Vec<(u64, SessionListener)>>>,
    next_id: Cell<u64>,
}

impl SessionListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; the returned handle removes it again.
    pub fn subscribe(&self, listener: SessionListener) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));

        let entries = Rc::downgrade(&self.entries);
        Subscription::new(move || {
            if let Some(entries) = entries.upgrade() {
                entries.borrow_mut().retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Deliver one notification to every listener registered right now.
    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        let snapshot: Vec<SessionListener> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event, session.cloned());
        }
    }

    /// Number of active listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// External service that issues and validates sessions.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// The session currently held by the provider, if any.
    async fn get_current_session(&self) -> Result<Option<Session>, ProviderError>;

    /// Register for session-change notifications.
    fn on_session_change(&self, listener: SessionListener) -> Subscription;

    /// Password-based sign-in.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}
