//! Route guard components.
//!
//! Both wrappers evaluate a pure decision from `util::auth` and render the
//! result; redirects go through the router's `Redirect` so navigation is a
//! routing step, not a side effect buried in page rendering.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::state::auth::AuthState;
use crate::util::auth::{GuardOutcome, login_outcome, protected_outcome};

fn render_outcome(outcome: GuardOutcome, children: &ChildrenFn) -> AnyView {
    match outcome {
        GuardOutcome::Loading => view! { <div class="route-loading">"Loading..."</div> }.into_any(),
        GuardOutcome::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
        GuardOutcome::Render => children().into_any(),
    }
}

/// Renders `children` only for signed-in users; otherwise shows a placeholder
/// while loading or redirects to `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let outcome = Memo::new(move |_| auth.with(protected_outcome));
    move || render_outcome(outcome.get(), &children)
}

/// Inverse guard for the login route: signed-in users go to `/`.
#[component]
pub fn RedirectIfAuthenticated(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let outcome = Memo::new(move |_| auth.with(login_outcome));
    move || render_outcome(outcome.get(), &children)
}
