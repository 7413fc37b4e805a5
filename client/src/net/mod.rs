//! Networking modules for the identity provider and profile store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` and `profiles` define the contracts the session store depends
//! on, `supabase` implements both over HTTP, and `types` holds the shared
//! wire schema.

pub mod identity;
pub mod profiles;
pub mod supabase;
pub mod types;
