//! Resend API client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use url::Url;

use super::{EmailProvider, OutboundEmail, ProviderError, SendError, SentEmail};
use crate::config::DispatchConfig;

/// Error name used when the provider's error body is not structured JSON.
const APPLICATION_ERROR: &str = "application_error";

/// Fallback message for an empty error body.
const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Resend API client.
#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ResendClient {
    /// Create a new Resend client posting to `{api_url}/emails`.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value, the URL
    /// cannot be joined, or the HTTP client fails to build.
    pub fn new(config: &DispatchConfig, api_url: &Url) -> Result<Self, SendError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| SendError::Config(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let endpoint = api_url
            .join("emails")
            .map_err(|e| SendError::Config(format!("Invalid API URL: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// The URL emails are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl EmailProvider for ResendClient {
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, SendError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(email)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = error_body(status.as_u16(), response.text().await);
            return Err(SendError::Provider(provider_error(status.as_u16(), &body)));
        }

        response
            .json::<SentEmail>()
            .await
            .map_err(|e| SendError::Parse(e.to_string()))
    }
}

/// Text of an error response, or empty if it could not be read.
fn error_body(status: u16, body: reqwest::Result<String>) -> String {
    body.unwrap_or_else(|e| {
        tracing::warn!(status, error = %e, "Failed to read error body");
        String::new()
    })
}

/// Interpret an error response body.
fn provider_error(status: u16, body: &str) -> ProviderError {
    match serde_json::from_str::<ProviderError>(body) {
        Ok(mut err) => {
            err.status_code.get_or_insert(status);
            err
        }
        Err(_) => ProviderError {
            status_code: Some(status),
            name: APPLICATION_ERROR.to_string(),
            message: if body.trim().is_empty() {
                DEFAULT_ERROR_MESSAGE.to_string()
            } else {
                body.to_string()
            },
        },
    }
}
