//! Wire DTOs shared by the identity provider and profile store.
//!
//! DESIGN
//! ======
//! Field names follow the provider's JSON so serde round-trips stay lossless;
//! anything the app does not read is kept in open-ended metadata maps.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// An authenticated identity as issued by the provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Provider-issued user identifier (UUID string).
    pub id: String,
    /// Primary email address, if the provider exposes one.
    #[serde(default)]
    pub email: Option<String>,
    /// User-editable metadata supplied at sign-up.
    #[serde(default)]
    pub user_metadata: HashMap<String, serde_json::Value>,
    /// Provider-controlled metadata.
    #[serde(default)]
    pub app_metadata: HashMap<String, serde_json::Value>,
}

/// Credential bundle bound to a [`User`]. Expiry is managed by the provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for authenticated requests.
    pub access_token: String,
    /// Token type, normally `"bearer"`.
    pub token_type: String,
    /// Lifetime in seconds at issue time.
    pub expires_in: i64,
    /// Absolute expiry in seconds since the Unix epoch, when known.
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Token used by the provider to mint a new session.
    pub refresh_token: String,
    /// The identity this session proves.
    pub user: User,
}

/// Application role stored on a profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Preferred color theme stored on a profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value used for the `data-theme` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Application-owned user record, keyed by [`User::id`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Same identifier as the owning [`User`].
    pub id: String,
    /// Display name, if the user has set one.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_default")]
    pub theme_preference: Theme,
}

/// Treat an explicit `null` column the same as an absent one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
