//! Contact form API handlers.
//!
//! One generic handler serves both forms. The body is parsed as JSON
//! regardless of `Content-Type`, validated against the form's schema, and
//! dispatched as two emails.
//!
//! | Outcome                     | Status | Body                                   |
//! |-----------------------------|--------|----------------------------------------|
//! | validation failed           | 400    | `{success: false, error: {name, issues}}` |
//! | provider rejected an email  | 200    | `{error: {statusCode, name, message}}` |
//! | both emails accepted        | 200    | `{success: true, message, sendMailData, <operator key>}` |
//! | anything else               | 500    | `{success: false, message}`            |

use std::collections::BTreeMap;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cadoutsource_core::{Issue, SubmissionSchema, ValidationError, validate};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::{DispatchOutcome, ProviderError, SentEmail};
use crate::state::AppState;

/// Message returned when both emails are accepted.
pub const SUCCESS_MESSAGE: &str = "Thank you for your message! We will get back to you soon.";

/// Error detail of a rejected submission.
#[derive(Debug, Serialize)]
pub struct ValidationDetail {
    pub name: &'static str,
    pub issues: Vec<Issue>,
}

/// Body of a 400 response.
#[derive(Debug, Serialize)]
pub struct ValidationFailure {
    pub success: bool,
    pub error: ValidationDetail,
}

impl From<ValidationError> for ValidationFailure {
    fn from(err: ValidationError) -> Self {
        Self {
            success: false,
            error: ValidationDetail {
                name: "ValidationError",
                issues: err.issues,
            },
        }
    }
}

/// Body returned when the provider rejected one of the emails.
#[derive(Debug, Serialize)]
pub struct ProviderFailure {
    pub error: ProviderError,
}

/// Body returned when both emails were accepted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAccepted {
    pub success: bool,
    pub message: &'static str,
    /// Result of the thank-you email.
    pub send_mail_data: SentEmail,
    /// Result of the operator notification, keyed per form.
    #[serde(flatten)]
    pub operator: BTreeMap<&'static str, SentEmail>,
}

/// 200 response body for a dispatched submission.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Accepted(SubmissionAccepted),
    Rejected(ProviderFailure),
}

impl Envelope {
    /// Map a dispatch outcome to the response body for form `S`.
    ///
    /// A rejected notification takes precedence over a rejected thank-you.
    #[must_use]
    pub fn from_outcome<S: SubmissionSchema>(outcome: DispatchOutcome) -> Self {
        match (outcome.notify_result, outcome.thank_you_result) {
            (Err(error), _) | (Ok(_), Err(error)) => Self::Rejected(ProviderFailure { error }),
            (Ok(notification), Ok(thank_you)) => Self::Accepted(SubmissionAccepted {
                success: true,
                message: SUCCESS_MESSAGE,
                send_mail_data: thank_you,
                operator: BTreeMap::from([(S::OPERATOR_DATA_KEY, notification)]),
            }),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Accept a contact form submission.
///
/// POST /api/contact/contact (quote form)
/// POST /api/sendMessage/sendMessage (message form)
///
/// # Errors
///
/// Returns `AppError` for a body that is not JSON, when email is not
/// configured, or when delivery fails without a provider response.
#[instrument(skip(state, body), fields(kind = S::KIND, bytes = body.len()))]
pub async fn submit<S: SubmissionSchema>(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response> {
    let raw: serde_json::Value = serde_json::from_slice(&body)?;

    let submission = match validate::<S>(&raw) {
        Ok(submission) => submission,
        Err(err) => {
            tracing::info!(issues = err.issues.len(), "Submission rejected");
            let body = Json(ValidationFailure::from(err));
            return Ok((StatusCode::BAD_REQUEST, body).into_response());
        }
    };

    add_breadcrumb("contact", "Submission validated", Some(&[("kind", S::KIND)]));

    let Some(dispatcher) = state.dispatcher() else {
        return Err(AppError::EmailNotConfigured);
    };

    let outcome = dispatcher.dispatch(&submission).await?;
    match outcome.first_error() {
        Some(err) => tracing::warn!(name = %err.name, "Submission not fully delivered"),
        None => tracing::info!("Submission delivered"),
    }

    Ok(Envelope::from_outcome::<S>(outcome).into_response())
}
