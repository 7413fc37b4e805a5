//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the plain data the UI renders from, `session` is the store that
//! drives it from the identity provider, and `toast` queues transient
//! notifications.

pub mod auth;
pub mod session;
pub mod toast;
