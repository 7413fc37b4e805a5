//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::guard::{RedirectIfAuthenticated, RequireAuth};
use crate::components::toaster::Toaster;
use crate::config::{AppConfig, ConfigMeta};
use crate::pages::{home::HomePage, login::LoginPage};
use crate::state::{auth::AuthState, toast::ToastState};
use crate::util::{auth::fallback_destination, theme};

/// HTML shell rendered on the server for SSR + hydration.
///
/// The identity-provider settings travel to the browser as `<meta>` tags.
pub fn shell(options: LeptosOptions, config: AppConfig) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <ConfigMeta config/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth and toast contexts, starts the session store in the
/// browser, and sets up the gated route table.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let toasts = RwSignal::new(ToastState::default());
    provide_context(auth);
    provide_context(toasts);

    #[cfg(feature = "hydrate")]
    if let Some(config) = use_context::<AppConfig>() {
        mount_session(&config, auth);
    }

    Effect::new(move || {
        if let Some(theme) = auth.with(|s| s.profile.as_ref().map(|p| p.theme_preference)) {
            theme::apply(theme);
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/gatehouse.css"/>
        <Title text="Gatehouse"/>
        <Toaster/>

        <Router>
            <Routes fallback=|| view! { <Redirect path=fallback_destination()/> }>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <RedirectIfAuthenticated><LoginPage/></RedirectIfAuthenticated> }
                />
                <Route
                    path=StaticSegment("")
                    view=|| view! { <RequireAuth><HomePage/></RequireAuth> }
                />
            </Routes>
        </Router>
    }
}

/// Build the provider client and session store, mirror its state into
/// `auth`, and release the subscription when the app scope is cleaned up.
#[cfg(feature = "hydrate")]
fn mount_session(config: &AppConfig, auth: RwSignal<AuthState>) {
    use std::rc::Rc;

    use crate::net::supabase::SupabaseClient;
    use crate::state::session::{SessionHandle, SessionStore, Spawner};

    let client = Rc::new(SupabaseClient::new(config));
    log::info!("session store using {}", client.base_url());
    let spawn: Spawner = Rc::new(|fut| leptos::task::spawn_local(fut));
    let store = SessionStore::mount(
        client.clone(),
        client,
        spawn,
        Box::new(move |state: &AuthState| {
            let _ = auth.try_set(state.clone());
        }),
    );

    let handle = SessionHandle::new(store);
    provide_context(handle);
    on_cleanup(move || {
        if let Some(store) = handle.store() {
            store.dispose();
        }
    });
}
