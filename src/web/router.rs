//! Application router builder.
//!
//! Provides [`build_app_router`] so both the binary and the handler tests use
//! the same routes and middleware stack.

use super::{AppState, admin, api, error::handler_404, pages};
use axum::{
    Json, Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Build the full application [`Router`].
///
/// - `/` and `/cart*`: storefront pages
/// - `/admin/*`: admin panel
/// - `/api/*`: JSON API, CORS open to any origin
/// - `/<uploads.url_prefix>/*`: uploaded images, served from `uploads.dir`
/// - `/health`: liveness probe
pub fn build_app_router(state: AppState) -> Router {
    let uploads = &state.settings.uploads;
    let mount = format!("/{}", uploads.url_prefix.trim_matches('/'));

    let mut router = Router::new()
        .route("/health", get(health))
        .merge(pages::router())
        .merge(admin::router(uploads.max_bytes))
        .nest("/api", api::router().layer(build_cors_layer()));

    if mount == "/" {
        tracing::warn!("Upload URL prefix is empty; uploaded images will not be served");
    } else {
        router = router.nest_service(&mount, ServeDir::new(&uploads.dir));
    }

    router
        .fallback(handler_404)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// CORS for the JSON API: any origin, the methods the API uses, JSON bodies.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
