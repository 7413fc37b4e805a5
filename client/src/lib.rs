//! # gatehouse
//!
//! Leptos + WASM application shell with session-gated navigation.
//!
//! The crate tracks the signed-in user through a [`state::session::SessionStore`]
//! fed by an external identity provider, and gates routes on the resulting
//! [`state::auth::AuthState`]. Pages and components stay thin; the decision
//! logic lives in `state` and `util::auth` so it can be tested without a browser.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: validate configuration, then hydrate the SSR markup.
///
/// A missing identity-provider setting leaves the page un-hydrated; the error
/// is logged to the console and the app never mounts.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config::AppConfig::from_document() {
        Ok(config) => config,
        Err(e) => {
            log::error!("gatehouse not started: {e}");
            return;
        }
    };

    leptos::mount::hydrate_body(move || {
        use leptos::prelude::*;

        use crate::app::App;

        provide_context(config);
        view! { <App/> }
    });
}
