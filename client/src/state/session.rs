//! Session store: keeps `AuthState` in sync with the identity provider.
//!
//! ARCHITECTURE
//! ============
//! `SessionStore::mount` acquires everything up front: it starts the initial
//! session check and subscribes to provider notifications. The subscription
//! is released exactly once, by `dispose()` or when the last handle drops.
//! Provider and profile store are injected so tests can run against fakes,
//! and async work goes through an injected `Spawner` (the Leptos executor in
//! the browser, a `LocalPool` in tests).
//!
//! ORDERING
//! ========
//! Each transition (initial check, each notification) takes a sequence
//! number when it starts. Profile fetches may finish out of order; a
//! completion is applied only if its number is still the latest issued, so
//! `user` and `profile` always come from the same notification. Spawned tasks
//! hold `Weak` references and become no-ops once the store is gone.
//!
//! ERROR HANDLING
//! ==============
//! Sign-in/sign-out failures set `AuthState.error` and propagate to the
//! caller. Profile failures are logged and treated as "no profile"; they
//! never block authentication.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use futures::future::LocalBoxFuture;
use leptos::prelude::*;

use super::auth::AuthState;
use crate::net::identity::{IdentityProvider, SessionListener, Subscription};
use crate::net::profiles::{ProfileQuery, QueryError};
use crate::net::types::{Profile, Session};

/// Runs a local (non-`Send`) task to completion in the background.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Called with the new state after every applied change.
pub type StateObserver = Box<dyn Fn(&AuthState)>;

/// Failure of an explicit session operation. Displays as the provider message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    SignIn(String),
    #[error("{0}")]
    SignOut(String),
}

struct Inner {
    provider: Rc<dyn IdentityProvider>,
    profiles: Rc<dyn ProfileQuery>,
    state: RefCell<AuthState>,
    issued: Cell<u64>,
    disposed: Cell<bool>,
    subscription: RefCell<Option<Subscription>>,
    observer: StateObserver,
    spawn: Spawner,
}

impl Inner {
    fn issue(&self) -> u64 {
        let seq = self.issued.get() + 1;
        self.issued.set(seq);
        seq
    }

    /// Replace the whole state, unless a newer transition has started.
    fn commit(&self, seq: u64, next: impl FnOnce(&AuthState) -> AuthState) {
        if self.disposed.get() {
            log::debug!("session transition {seq} ignored after dispose");
            return;
        }
        let latest = self.issued.get();
        if seq != latest {
            log::debug!("session transition {seq} superseded by {latest}");
            return;
        }
        let snapshot = {
            let mut state = self.state.borrow_mut();
            let updated = next(&state);
            *state = updated;
            state.clone()
        };
        (self.observer)(&snapshot);
    }

    fn update(&self, f: impl FnOnce(&mut AuthState)) {
        if self.disposed.get() {
            return;
        }
        let snapshot = {
            let mut state = self.state.borrow_mut();
            f(&mut state);
            state.clone()
        };
        (self.observer)(&snapshot);
    }
}

/// Fetch the profile for `user_id`, failing open.
///
/// A missing row is expected for not-yet-provisioned users; any other failure
/// is logged. Both yield `None`.
pub async fn load_profile(profiles: &dyn ProfileQuery, user_id: &str) -> Option<Profile> {
    match profiles.fetch_profile(user_id).await {
        Ok(profile) => Some(profile),
        Err(QueryError::NotFound) => {
            log::info!("no profile provisioned for {user_id}");
            None
        }
        Err(e) => {
            log::error!("profile fetch for {user_id} failed: {e}");
            None
        }
    }
}

async fn settle_signed_in(weak: Weak<Inner>, seq: u64, session: Session) {
    let Some(profiles) = weak.upgrade().map(|inner| Rc::clone(&inner.profiles)) else {
        return;
    };
    let profile = load_profile(profiles.as_ref(), &session.user.id).await;
    if let Some(inner) = weak.upgrade() {
        inner.commit(seq, move |_| AuthState::signed_in(session, profile));
    }
}

async fn initialize(weak: Weak<Inner>, seq: u64) {
    let Some(provider) = weak.upgrade().map(|inner| Rc::clone(&inner.provider)) else {
        return;
    };
    let session = match provider.get_current_session().await {
        Ok(session) => session,
        Err(e) => {
            log::warn!("initial session check failed: {e}");
            None
        }
    };
    match session {
        Some(session) => settle_signed_in(weak, seq, session).await,
        None => {
            if let Some(inner) = weak.upgrade() {
                inner.commit(seq, AuthState::resolved);
            }
        }
    }
}

async fn on_change(weak: Weak<Inner>, seq: u64, session: Option<Session>) {
    match session {
        Some(session) => settle_signed_in(weak, seq, session).await,
        None => {
            if let Some(inner) = weak.upgrade() {
                inner.commit(seq, |_| AuthState::signed_out());
            }
        }
    }
}

/// Authoritative owner of [`AuthState`] for one mounted app.
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    /// Start the initial session check and subscribe to provider changes.
    pub fn mount(
        provider: Rc<dyn IdentityProvider>,
        profiles: Rc<dyn ProfileQuery>,
        spawn: Spawner,
        observer: StateObserver,
    ) -> Self {
        let inner = Rc::new(Inner {
            provider,
            profiles,
            state: RefCell::new(AuthState::default()),
            issued: Cell::new(0),
            disposed: Cell::new(false),
            subscription: RefCell::new(None),
            observer,
            spawn,
        });

        let seq = inner.issue();
        (inner.spawn)(Box::pin(initialize(Rc::downgrade(&inner), seq)));

        let weak = Rc::downgrade(&inner);
        let listener: SessionListener = Rc::new(move |event, session| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.disposed.get() {
                return;
            }
            let seq = inner.issue();
            log::debug!("session change {event:?} (transition {seq})");
            (inner.spawn)(Box::pin(on_change(Rc::downgrade(&inner), seq, session)));
        });
        let subscription = inner.provider.on_session_change(listener);
        *inner.subscription.borrow_mut() = Some(subscription);

        Self { inner }
    }

    /// Submit credentials to the provider.
    ///
    /// On success the state is updated later, by the provider's change
    /// notification; callers must not expect it to be current on return.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SignIn`] with the provider message; `error` is set
    /// and user/session/profile are left untouched.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.inner.update(|state| state.error = None);
        let provider = Rc::clone(&self.inner.provider);
        match provider.sign_in_with_password(email, password).await {
            Ok(session) => {
                log::info!("signed in as {}", session.user.id);
                Ok(session)
            }
            Err(e) => {
                log::warn!("sign-in rejected: {e}");
                let message = e.message;
                self.inner.update(|state| state.error = Some(message.clone()));
                Err(AuthError::SignIn(message))
            }
        }
    }

    /// Ask the provider to end the session.
    ///
    /// The local state clears through the following change notification.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SignOut`] with the provider message; the user stays
    /// signed in locally.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let provider = Rc::clone(&self.inner.provider);
        match provider.sign_out().await {
            Ok(()) => Ok(()),
            Err(e) => {
                log::warn!("sign-out failed: {e}");
                let message = e.message;
                self.inner.update(|state| state.error = Some(message.clone()));
                Err(AuthError::SignOut(message))
            }
        }
    }

    /// Release the provider subscription. Later notifications and in-flight
    /// completions no longer change the state. Safe to call repeatedly.
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        let subscription = self.inner.subscription.borrow_mut().take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
        log::debug!("session store disposed");
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.inner.state.borrow().is_admin()
    }
}

/// Copyable context handle so event handlers can reach the store.
///
/// Only provided in the browser; SSR renders without a session.
#[derive(Clone, Copy)]
pub struct SessionHandle(StoredValue<Option<SessionStore>, LocalStorage>);

impl SessionHandle {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self(StoredValue::new_local(Some(store)))
    }

    /// The store, unless the owning scope has already been cleaned up.
    #[must_use]
    pub fn store(self) -> Option<SessionStore> {
        self.0.try_with_value(Clone::clone).flatten()
    }
}
