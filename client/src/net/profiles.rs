//! Profile query contract.
//!
//! A profile lookup returns zero or one row. "No row" is reported as
//! [`QueryError::NotFound`] so callers can tell a not-yet-provisioned profile
//! apart from a failed request.

use async_trait::async_trait;

use super::types::Profile;

/// Errors produced by a profile lookup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// No profile row exists for the identity.
    #[error("profile not found")]
    NotFound,

    /// The request could not be sent or completed.
    #[error("profile request failed: {0}")]
    Request(String),

    /// The store answered with a non-success status.
    #[error("profile query rejected: status {status}: {message}")]
    Status { status: u16, message: String },

    /// The row could not be deserialized.
    #[error("profile decode failed: {0}")]
    Decode(String),
}

/// Read access to the profile table.
#[async_trait(?Send)]
pub trait ProfileQuery {
    /// Fetch the single profile whose id equals `user_id`.
    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, QueryError>;
}
