//! Login page with email + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::components::toaster::notify;
use crate::state::session::{AuthError, SessionHandle};
use crate::state::toast::{ToastKind, ToastState};

const SIGN_IN_SUCCESS: &str = "Signed in successfully";
const SIGN_IN_FALLBACK: &str = "Invalid email or password";
const SIGN_IN_UNAVAILABLE: &str = "Sign-in is not available yet. Reload the page and try again.";
const MISSING_FIELDS: &str = "Enter both email and password.";

/// Trim the email and require both fields.
fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Message for the error toast after a rejected sign-in.
fn sign_in_failure_message(err: &AuthError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() { SIGN_IN_FALLBACK.to_owned() } else { message }
}

/// Login page. Signed-in visitors are redirected away by the route guard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let session = use_context::<SessionHandle>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_credentials(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                notify(toasts, ToastKind::Error, message);
                return;
            }
        };
        let Some(store) = session.and_then(SessionHandle::store) else {
            notify(toasts, ToastKind::Error, SIGN_IN_UNAVAILABLE);
            return;
        };
        busy.set(true);

        leptos::task::spawn_local(async move {
            match store.sign_in(&email_value, &password_value).await {
                Ok(_) => {
                    notify(toasts, ToastKind::Success, SIGN_IN_SUCCESS);
                    let _ = password.try_set(String::new());
                }
                Err(e) => notify(toasts, ToastKind::Error, sign_in_failure_message(&e)),
            }
            let _ = busy.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Gatehouse"</h1>
                <p class="login-card__subtitle">"Sign in to access the dashboard"</p>
                <form class="login-form" on:submit=on_submit>
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        required
                        prop:value=move || email.get()
                        prop:disabled=move || busy.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        class="login-input"
                        type="password"
                        placeholder="Your password"
                        required
                        prop:value=move || password.get()
                        prop:disabled=move || busy.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
