//! Notification dispatch for contact submissions.
//!
//! Every accepted submission produces two emails, sent one after the other:
//! a notification to the operator, then a thank-you to the submitter. The
//! thank-you is attempted even if the provider rejected the notification.

use std::sync::Arc;

use cadoutsource_core::{Email, SubmissionSchema};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use super::email::templates::{notification_email, thank_you_email};
use super::email::{EmailProvider, OutboundEmail, ProviderError, ResendClient, SendError, SentEmail};
use crate::config::DispatchConfig;

/// Errors that stop a dispatch before both results are known.
///
/// A provider rejecting an email is not one of these; see [`DispatchOutcome`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Email template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Delivery could not be attempted or confirmed.
    #[error("Delivery failed: {0}")]
    Delivery(SendError),
}

/// Per-email results of a completed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub notify_result: Result<SentEmail, ProviderError>,
    pub thank_you_result: Result<SentEmail, ProviderError>,
}

impl DispatchOutcome {
    /// The first provider error, notification before thank-you.
    #[must_use]
    pub fn first_error(&self) -> Option<&ProviderError> {
        self.notify_result
            .as_ref()
            .err()
            .or_else(|| self.thank_you_result.as_ref().err())
    }
}

/// Sends the notification and thank-you emails for a submission.
#[derive(Clone)]
pub struct Dispatcher {
    provider: Arc<dyn EmailProvider>,
    operator_address: Email,
    from_address: Email,
}

impl Dispatcher {
    /// Create a dispatcher over any provider.
    #[must_use]
    pub fn new(provider: Arc<dyn EmailProvider>, config: &DispatchConfig) -> Self {
        Self {
            provider,
            operator_address: config.operator_address.clone(),
            from_address: config.from_address.clone(),
        }
    }

    /// Create a dispatcher backed by the Resend API.
    ///
    /// # Errors
    ///
    /// Returns error if the Resend client cannot be built.
    pub fn resend(config: &DispatchConfig, api_url: &Url) -> Result<Self, SendError> {
        let client = ResendClient::new(config, api_url)?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Send both emails for `submission`.
    ///
    /// # Errors
    ///
    /// Returns error if a template fails to render or delivery fails without
    /// a provider response. An error while sending the notification means the
    /// thank-you is never attempted.
    #[instrument(skip_all, fields(kind = S::KIND))]
    pub async fn dispatch<S: SubmissionSchema>(
        &self,
        submission: &S,
    ) -> Result<DispatchOutcome, DispatchError> {
        let notification = notification_email(submission, &self.from_address, &self.operator_address)?;
        let notify_result = self.send(&notification, "notification").await?;

        let thank_you = thank_you_email(submission, &self.from_address)?;
        let thank_you_result = self.send(&thank_you, "thank_you").await?;

        Ok(DispatchOutcome {
            notify_result,
            thank_you_result,
        })
    }

    /// Send one email, separating provider rejections from fatal failures.
    async fn send(
        &self,
        email: &OutboundEmail,
        purpose: &'static str,
    ) -> Result<Result<SentEmail, ProviderError>, DispatchError> {
        match self.provider.send(email).await {
            Ok(sent) => {
                tracing::info!(purpose, id = %sent.id, "Email accepted");
                Ok(Ok(sent))
            }
            Err(SendError::Provider(err)) => {
                tracing::warn!(
                    purpose,
                    status = ?err.status_code,
                    name = %err.name,
                    message = %err.message,
                    "Email rejected by provider"
                );
                Ok(Err(err))
            }
            Err(err) => Err(DispatchError::Delivery(err)),
        }
    }
}
