//! CadOutSource marketing site library.
//!
//! This crate provides the site and its contact API as a library,
//! allowing the router to be tested in-process and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header::CACHE_CONTROL},
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router.
///
/// Static files are served from `static_dir` under `/static`. Sentry layers
/// are added by the binary so tests run without a Sentry hub.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    let static_files = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=86400"),
        ))
        .service(ServeDir::new(static_dir));

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", static_files)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                    )
                }))
                .layer(axum::middleware::from_fn(
                    middleware::request_id_middleware,
                ))
                .layer(axum::middleware::from_fn(
                    middleware::security_headers_middleware,
                )),
        )
}
