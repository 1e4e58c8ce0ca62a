//! Transactional email delivery.
//!
//! [`EmailProvider`] is the seam between the dispatcher and whatever HTTP API
//! actually delivers mail. [`ResendClient`] is the production implementation.

mod resend;
pub mod templates;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use resend::ResendClient;

/// A fully rendered email ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    /// Sender, formatted as `Name <address>`.
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Provider acknowledgment of an accepted email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub id: String,
}

/// Structured error returned by the provider for a rejected email.
///
/// Serialized as-is into the endpoint's error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{name}: {message}")]
pub struct ProviderError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub name: String,
    pub message: String,
}

/// Errors that can occur when sending through a provider.
#[derive(Debug, Error)]
pub enum SendError {
    /// The provider answered and refused the email.
    #[error("Provider rejected email: {0}")]
    Provider(ProviderError),

    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider accepted the email but the response could not be read.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The client could not be built from configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Delivers one email per call. Implementations never retry.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send `email` and return the provider-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::Provider`] when the provider rejects the email and
    /// another variant when delivery could not be attempted or confirmed.
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, SendError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_provider_error_wire_shape() {
        let err = ProviderError {
            status_code: Some(422),
            name: "validation_error".to_string(),
            message: "Invalid `to` field.".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "statusCode": 422,
                "name": "validation_error",
                "message": "Invalid `to` field."
            })
        );
    }

    #[test]
    fn test_provider_error_without_status() {
        let err: ProviderError =
            serde_json::from_value(json!({"name": "missing_api_key", "message": "Missing API key"}))
                .unwrap();

        assert_eq!(err.status_code, None);
        assert_eq!(err.to_string(), "missing_api_key: Missing API key");
        assert!(serde_json::to_value(&err).unwrap().get("statusCode").is_none());
    }

    #[test]
    fn test_outbound_email_omits_missing_reply_to() {
        let email = OutboundEmail {
            from: "CadOutSource <info@cadoutsource.co.uk>".to_string(),
            to: vec!["jo@x.com".to_string()],
            subject: "Thank you for contacting us!".to_string(),
            html: "<p>hi</p>".to_string(),
            text: "hi".to_string(),
            reply_to: None,
        };

        let value = serde_json::to_value(&email).unwrap();
        assert!(value.get("reply_to").is_none());
        assert_eq!(value["to"], json!(["jo@x.com"]));
    }
}
