//! Protected landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered only behind `RequireAuth`. Sign-out clears the view through the
//! provider's change notification; a failed sign-out leaves the user here
//! with the error shown inline.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::session::SessionHandle;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = use_context::<SessionHandle>();
    let busy = RwSignal::new(false);

    let greeting = move || auth.with(AuthState::display_name).unwrap_or_else(|| "there".to_owned());
    let is_admin = move || auth.with(AuthState::is_admin);
    let error = move || auth.with(|s| s.error.clone());

    let on_sign_out = move |_| {
        if busy.get() {
            return;
        }
        let Some(store) = session.and_then(SessionHandle::store) else {
            return;
        };
        busy.set(true);
        leptos::task::spawn_local(async move {
            if let Err(e) = store.sign_out().await {
                log::warn!("sign-out failed: {e}");
            }
            let _ = busy.try_set(false);
        });
    };

    view! {
        <main class="home-page">
            <header class="home-page__header">
                <h1>"Dashboard"</h1>
                <Show when=is_admin>
                    <span class="badge badge--admin">"Admin"</span>
                </Show>
                <button class="button" on:click=on_sign_out disabled=move || busy.get()>
                    "Sign out"
                </button>
            </header>
            <p class="home-page__greeting">"Signed in as " {greeting}</p>
            <Show when=move || error().is_some()>
                <p class="home-page__error">{move || error().unwrap_or_default()}</p>
            </Show>
        </main>
    }
}
