//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Home page with the quick message form
//! GET  /contact                       - Project quote form
//! GET  /thankyou?token=...            - Acknowledgment page
//! GET  /health                        - Health check
//!
//! # Contact API
//! POST /api/contact/contact           - Quote form submission
//! POST /api/sendMessage/sendMessage   - Message form submission
//! ```

pub mod contact;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};
use cadoutsource_core::{DetailedProjectSubmission, QuickServiceSubmission};

use crate::state::AppState;

/// Create the contact API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contact/contact",
            post(contact::submit::<DetailedProjectSubmission>),
        )
        .route(
            "/sendMessage/sendMessage",
            post(contact::submit::<QuickServiceSubmission>),
        )
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/contact", get(pages::contact))
        .route("/thankyou", get(pages::thank_you))
        .route("/health", get(health))
        .nest("/api", api_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the email provider.
async fn health() -> &'static str {
    "ok"
}
