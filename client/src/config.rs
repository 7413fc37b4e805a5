//! Identity-provider configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server reads both values from the environment at startup and embeds
//! them into the HTML shell as `<meta>` tags; the browser entry point reads
//! them back before mounting. Either side refuses to start when a value is
//! missing.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use leptos::prelude::*;

/// Environment variable holding the identity-provider base URL.
pub const URL_VAR: &str = "SUPABASE_URL";
/// Environment variable holding the public (anon) API key.
pub const KEY_VAR: &str = "SUPABASE_ANON_KEY";

const URL_META: &str = "gatehouse-identity-url";
const KEY_META: &str = "gatehouse-identity-key";

/// Errors produced while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required value is absent or blank.
    #[error("missing required configuration: {var}")]
    Missing { var: &'static str },
}

/// Connection settings for the identity provider and profile store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base service URL without a trailing slash.
    pub identity_url: String,
    /// Public API key sent with every request.
    pub identity_key: String,
}

impl AppConfig {
    /// Build config from an arbitrary key lookup. Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing { var })
        };
        let identity_url = required(URL_VAR)?.trim_end_matches('/').to_owned();
        let identity_key = required(KEY_VAR)?;
        Ok(Self { identity_url, identity_key })
    }

    /// Load from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if either variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from the `<meta>` tags written by [`ConfigMeta`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if either tag is absent or empty.
    #[cfg(feature = "hydrate")]
    pub fn from_document() -> Result<Self, ConfigError> {
        let document = web_sys::window().and_then(|w| w.document());
        Self::from_lookup(|var| {
            let doc = document.as_ref()?;
            let selector = format!("meta[name=\"{}\"]", meta_name(var)?);
            doc.query_selector(&selector)
                .ok()
                .flatten()
                .and_then(|el| el.get_attribute("content"))
        })
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn meta_name(var: &str) -> Option<&'static str> {
    match var {
        URL_VAR => Some(URL_META),
        KEY_VAR => Some(KEY_META),
        _ => None,
    }
}

/// Emits the config as `<meta>` tags inside the SSR `<head>`.
#[component]
pub fn ConfigMeta(config: AppConfig) -> impl IntoView {
    let AppConfig { identity_url, identity_key } = config;
    view! {
        <meta name=URL_META content=identity_url/>
        <meta name=KEY_META content=identity_key/>
    }
}
