//! Toast stack for transient notifications.

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};

#[cfg(feature = "hydrate")]
const TOAST_TTL: std::time::Duration = std::time::Duration::from_secs(4);

/// Queue a toast and, in the browser, dismiss it after a few seconds.
pub fn notify(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) {
    let Some(id) = toasts.try_update(|t| t.push(kind, message)) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(TOAST_TTL).await;
        let _ = toasts.try_update(|t| t.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

/// Renders the visible toasts; clicking one dismisses it.
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toaster" role="status" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .items
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        let class = match toast.kind {
                            ToastKind::Success => "toast toast--success",
                            ToastKind::Error => "toast toast--error",
                        };
                        view! {
                            <div class=class on:click=move |_| toasts.update(|t| t.dismiss(id))>
                                {toast.message}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
