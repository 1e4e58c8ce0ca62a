//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Contact API handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::DispatchError;

/// Body of every unhandled contact API failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while processing your request.";

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Sending the emails failed outright.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Request body was not JSON.
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Email delivery is not configured.
    #[error("Email integration not configured")]
    EmailNotConfigured,
}

/// Generic failure envelope.
#[derive(Debug, Serialize)]
struct FailureBody {
    success: bool,
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );

        // Don't expose internal error details to clients
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FailureBody {
                success: false,
                message: GENERIC_FAILURE_MESSAGE,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
