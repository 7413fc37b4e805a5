//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stitches the health probe and the Leptos SSR routes under one Axum router.
//! The identity provider is external, so the server holds no session state;
//! it only renders the shell with the provider settings embedded.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::get;
use gatehouse::config::AppConfig;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Non-Leptos routes. Unmatched paths are sent to the landing route.
fn base_routes() -> Router {
    Router::new().route("/healthz", get(healthz)).fallback(unmatched)
}

/// Full application: health probe, SSR pages, and `/pkg` static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded.
pub fn app(config: AppConfig) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(gatehouse::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || gatehouse::app::shell(opts.clone(), config.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(base_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn unmatched() -> Redirect {
    Redirect::to(gatehouse::util::auth::DEFAULT_ROUTE)
}
