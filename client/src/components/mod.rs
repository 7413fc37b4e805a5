//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render route gating and notifications while reading shared
//! state from Leptos context providers.

pub mod guard;
pub mod toaster;
