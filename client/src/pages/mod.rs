//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages own route-scoped orchestration; gating is applied around them in the
//! route table (`app`), never inside the page.

pub mod home;
pub mod login;
