//! Integration tests for CadOutSource.
//!
//! # Running Tests
//!
//! ```bash
//! # Self-contained tests (fake email API on a local port)
//! cargo test -p cadoutsource-integration-tests
//!
//! # Tests against a deployed site
//! SITE_BASE_URL=https://preview.cadoutsource.co.uk \
//!     cargo test -p cadoutsource-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `resend_client` - The real Resend client against [`FakeResend`]
//! - `contact_pipeline` - The full site served over TCP, sending through [`FakeResend`]
//! - `live_site` - Requests against `SITE_BASE_URL` (ignored by default)

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use cadoutsource_core::Email;
use cadoutsource_site::config::{DispatchConfig, SiteConfig};
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

/// API key the fake server expects.
pub const TEST_API_KEY: &str = "re_9fQ2xLp7Wm3Kd8Zr1Tv6Yb4N";

/// Token the test site expects on the acknowledgment page.
pub const TEST_THANK_YOU_TOKEN: &str = "integration-token";

/// One request received by [`FakeResend`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

/// A canned response: status and raw body.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    /// Successful send with the given message id.
    #[must_use]
    pub fn sent(id: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({ "id": id }).to_string(),
        }
    }

    /// Structured provider error.
    #[must_use]
    pub fn error(status: StatusCode, name: &str, message: &str) -> Self {
        Self {
            status,
            body: json!({
                "statusCode": status.as_u16(),
                "name": name,
                "message": message,
            })
            .to_string(),
        }
    }

    /// Arbitrary body, e.g. an HTML error page from a proxy.
    #[must_use]
    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Default)]
struct FakeState {
    requests: Mutex<Vec<RecordedRequest>>,
    replies: Mutex<VecDeque<Reply>>,
}

/// Local stand-in for the Resend `POST /emails` endpoint.
///
/// Replays scripted replies in order, then answers every further request
/// with a generated id.
pub struct FakeResend {
    url: Url,
    state: Arc<FakeState>,
}

impl FakeResend {
    /// Start a fake server on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(replies: Vec<Reply>) -> Self {
        let state = Arc::new(FakeState {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(replies.into()),
        });

        let app = Router::new()
            .route("/emails", post(receive))
            .with_state(state.clone());

        let addr = serve(app).await;
        let url = Url::parse(&format!("http://{addr}")).expect("Invalid fake server URL");

        Self { url, state }
    }

    /// Base URL to configure as `RESEND_API_URL`.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

async fn receive(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let position = {
        let mut requests = state.requests.lock().unwrap_or_else(PoisonError::into_inner);
        requests.push(RecordedRequest {
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
            body,
        });
        requests.len()
    };

    let reply = state
        .replies
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
        .unwrap_or_else(|| Reply::sent(&format!("fake_{position}")));

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

/// Serve `app` on an ephemeral local port and return its address.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    addr
}

/// Dispatch settings pointing at the test operator mailbox.
///
/// # Panics
///
/// Panics if the fixed addresses fail to parse.
#[must_use]
pub fn dispatch_config() -> DispatchConfig {
    DispatchConfig {
        api_key: SecretString::from(TEST_API_KEY),
        operator_address: Email::parse("info@cadoutsource.co.uk").expect("valid address"),
        from_address: Email::parse("hello@cadoutsource.co.uk").expect("valid address"),
    }
}

/// Site configuration that sends through `api_url`.
///
/// # Panics
///
/// Panics if the fixed URLs fail to parse.
#[must_use]
pub fn site_config(api_url: &Url) -> SiteConfig {
    SiteConfig {
        host: "127.0.0.1".parse().expect("valid IP"),
        port: 0,
        base_url: Url::parse("http://localhost").expect("valid URL"),
        dispatch: Some(dispatch_config()),
        resend_api_url: api_url.clone(),
        thank_you_token: TEST_THANK_YOU_TOKEN.to_string(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Base URL for live-site tests (configurable via environment).
#[must_use]
pub fn site_base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
