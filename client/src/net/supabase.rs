//! Supabase-compatible identity provider and profile store.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the GoTrue
//! auth API and the PostgREST `profiles` table, with the session persisted in
//! `localStorage`.
//! Server-side (SSR) and native tests: network operations report the provider
//! as unavailable, since sessions only exist in the browser.
//!
//! DESIGN
//! ======
//! One `SupabaseClient` implements both `IdentityProvider` and `ProfileQuery`
//! because profile reads are authorized with the current session's bearer
//! token. It is built explicitly from `AppConfig` and handed to the session
//! store; there is no process-wide instance.
//!
//! ERROR HANDLING
//! ==============
//! Provider messages are surfaced verbatim so the login form can show them.
//! Token refresh is out of scope: a persisted session past `expires_at` is
//! discarded on restore.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::identity::{AuthEvent, IdentityProvider, ProviderError, SessionListener, SessionListeners, Subscription};
use super::profiles::{ProfileQuery, QueryError};
use super::types::{Profile, Session};
use crate::config::AppConfig;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "gatehouse.auth.session";
#[cfg(any(test, feature = "hydrate"))]
const PGRST_OBJECT: &str = "application/vnd.pgrst.object+json";
#[cfg(any(test, feature = "hydrate"))]
const PGRST_NO_ROWS: &str = "PGRST116";
#[cfg(not(feature = "hydrate"))]
const UNAVAILABLE: &str = "identity provider is only available in the browser";

#[cfg(any(test, feature = "hydrate"))]
fn token_endpoint(base_url: &str) -> String {
    format!("{base_url}/auth/v1/token?grant_type=password")
}

#[cfg(any(test, feature = "hydrate"))]
fn logout_endpoint(base_url: &str) -> String {
    format!("{base_url}/auth/v1/logout")
}

#[cfg(any(test, feature = "hydrate"))]
fn profile_endpoint(base_url: &str, user_id: &str) -> String {
    let user_id = urlencoding::encode(user_id);
    format!("{base_url}/rest/v1/profiles?id=eq.{user_id}&select=*")
}

/// Pull a display message out of an auth error body.
#[cfg(any(test, feature = "hydrate"))]
fn error_message(body: &str, status: u16, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty()))
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("{fallback}: {status}"))
}

/// Classify a non-success profile response.
#[cfg(any(test, feature = "hydrate"))]
fn profile_failure(status: u16, body: &str) -> QueryError {
    let value = serde_json::from_str::<serde_json::Value>(body).ok();
    let code = value
        .as_ref()
        .and_then(|v| v.get("code"))
        .and_then(|v| v.as_str());
    if status == 406 && (code == Some(PGRST_NO_ROWS) || body.trim().is_empty()) {
        return QueryError::NotFound;
    }
    let message = value
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|v| v.as_str())
        .map_or_else(|| body.to_owned(), str::to_owned);
    QueryError::Status { status, message }
}

/// Logout is idempotent: a token the server no longer knows is already signed out.
#[cfg(any(test, feature = "hydrate"))]
fn sign_out_accepted(status: u16) -> bool {
    (200..300).contains(&status) || matches!(status, 401 | 403 | 404)
}

fn is_expired(session: &Session, now_secs: i64) -> bool {
    session.expires_at.is_some_and(|at| at <= now_secs)
}

/// Fill in `expires_at` from `expires_in` when the provider omitted it.
#[cfg(any(test, feature = "hydrate"))]
fn stamp_expiry(mut session: Session, now_secs: i64) -> Session {
    if session.expires_at.is_none() {
        session.expires_at = Some(now_secs + session.expires_in);
    }
    session
}

#[allow(clippy::cast_possible_truncation)]
fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn load_persisted() -> Option<Session> {
    #[cfg(feature = "hydrate")]
    {
        let raw = local_storage()?.get_item(STORAGE_KEY).ok()??;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("discarding unreadable persisted session: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

fn persist(session: Option<&Session>) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        match session.and_then(|s| serde_json::to_string(s).ok()) {
            Some(raw) => {
                let _ = storage.set_item(STORAGE_KEY, &raw);
            }
            None => {
                let _ = storage.remove_item(STORAGE_KEY);
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }
}

/// HTTP client for a Supabase project.
pub struct SupabaseClient {
    base_url: String,
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    api_key: String,
    session: RefCell<Option<Session>>,
    restored: Cell<bool>,
    listeners: SessionListeners,
}

impl SupabaseClient {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.identity_url.clone(),
            api_key: config.identity_key.clone(),
            session: RefCell::new(None),
            restored: Cell::new(false),
            listeners: SessionListeners::new(),
        }
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn restore_once(&self) {
        if self.restored.replace(true) {
            return;
        }
        if let Some(session) = load_persisted() {
            *self.session.borrow_mut() = Some(session);
        }
    }

    fn current_session(&self) -> Option<Session> {
        self.restore_once();
        let session = self.session.borrow().clone()?;
        if is_expired(&session, now_secs()) {
            log::info!("persisted session for {} expired", session.user.id);
            self.replace_session(None);
            return None;
        }
        Some(session)
    }

    fn replace_session(&self, session: Option<&Session>) {
        *self.session.borrow_mut() = session.cloned();
        persist(session);
    }

    fn finish_sign_out(&self) {
        self.replace_session(None);
        self.listeners.emit(AuthEvent::SignedOut, None);
    }
}

#[async_trait(?Send)]
impl IdentityProvider for SupabaseClient {
    async fn get_current_session(&self) -> Result<Option<Session>, ProviderError> {
        Ok(self.current_session())
    }

    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        self.listeners.subscribe(listener)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email, "password": password });
            let resp = gloo_net::http::Request::post(&token_endpoint(&self.base_url))
                .header("apikey", &self.api_key)
                .json(&payload)
                .map_err(|e| ProviderError::new(e.to_string()))?
                .send()
                .await
                .map_err(|e| ProviderError::new(e.to_string()))?;
            if !resp.ok() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(ProviderError::with_status(error_message(&body, status, "sign-in failed"), status));
            }
            let session: Session = resp
                .json()
                .await
                .map_err(|e| ProviderError::new(e.to_string()))?;
            let session = stamp_expiry(session, now_secs());
            self.replace_session(Some(&session));
            self.listeners.emit(AuthEvent::SignedIn, Some(&session));
            Ok(session)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(ProviderError::new(UNAVAILABLE))
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let Some(session) = self.current_session() else {
            self.finish_sign_out();
            return Ok(());
        };
        #[cfg(feature = "hydrate")]
        {
            let bearer = format!("Bearer {}", session.access_token);
            let resp = gloo_net::http::Request::post(&logout_endpoint(&self.base_url))
                .header("apikey", &self.api_key)
                .header("Authorization", &bearer)
                .send()
                .await
                .map_err(|e| ProviderError::new(e.to_string()))?;
            let status = resp.status();
            if !sign_out_accepted(status) {
                let body = resp.text().await.unwrap_or_default();
                return Err(ProviderError::with_status(error_message(&body, status, "sign-out failed"), status));
            }
            self.finish_sign_out();
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = session;
            Err(ProviderError::new(UNAVAILABLE))
        }
    }
}

#[async_trait(?Send)]
impl ProfileQuery for SupabaseClient {
    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, QueryError> {
        #[cfg(feature = "hydrate")]
        {
            let token = self
                .current_session()
                .map_or_else(|| self.api_key.clone(), |s| s.access_token);
            let bearer = format!("Bearer {token}");
            let resp = gloo_net::http::Request::get(&profile_endpoint(&self.base_url, user_id))
                .header("apikey", &self.api_key)
                .header("Authorization", &bearer)
                .header("Accept", PGRST_OBJECT)
                .send()
                .await
                .map_err(|e| QueryError::Request(e.to_string()))?;
            if !resp.ok() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(profile_failure(status, &body));
            }
            resp.json::<Profile>()
                .await
                .map_err(|e| QueryError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = user_id;
            Err(QueryError::Request(UNAVAILABLE.to_owned()))
        }
    }
}
