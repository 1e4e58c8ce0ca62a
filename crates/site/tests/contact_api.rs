//! Router-level tests for the contact API and pages.
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot` and a
//! scripted email provider.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use cadoutsource_core::Email;
use cadoutsource_site::config::{DispatchConfig, SiteConfig};
use cadoutsource_site::services::{
    Dispatcher, EmailProvider, OutboundEmail, ProviderError, SendError, SentEmail,
};
use cadoutsource_site::state::AppState;
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;

const TOKEN: &str = "t0k3n";

/// Records every email and replays scripted results, defaulting to success.
#[derive(Default)]
struct StubProvider {
    sent: Mutex<Vec<OutboundEmail>>,
    results: Mutex<VecDeque<Result<SentEmail, SendError>>>,
}

impl StubProvider {
    fn scripted(results: Vec<Result<SentEmail, SendError>>) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            results: Mutex::new(results.into()),
        })
    }

    fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailProvider for StubProvider {
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, SendError> {
        let position = {
            let mut log = self.sent.lock().unwrap();
            log.push(email.clone());
            log.len()
        };
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SentEmail { id: format!("email_{position}") }))
    }
}

fn dispatch_config() -> DispatchConfig {
    DispatchConfig {
        api_key: SecretString::from("re_9fQ2xLp7Wm3Kd8Zr1Tv6Yb4N"),
        operator_address: Email::parse("info@cadoutsource.co.uk").unwrap(),
        from_address: Email::parse("info@cadoutsource.co.uk").unwrap(),
    }
}

fn site_config(dispatch: Option<DispatchConfig>) -> SiteConfig {
    SiteConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: Url::parse("https://cadoutsource.co.uk").unwrap(),
        dispatch,
        resend_api_url: Url::parse("https://api.resend.com").unwrap(),
        thank_you_token: TOKEN.to_string(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

fn app_with(provider: &Arc<StubProvider>) -> Router {
    let config = dispatch_config();
    let dispatcher = Dispatcher::new(provider.clone(), &config);
    let state = AppState::with_dispatcher(site_config(Some(config)), Some(dispatcher));
    cadoutsource_site::app(state, &static_dir())
}

fn app_without_email() -> Router {
    let state = AppState::with_dispatcher(site_config(None), None);
    cadoutsource_site::app(state, &static_dir())
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn quote() -> Value {
    json!({
        "name": "Jo",
        "email": "jo@x.com",
        "phone": "1234567890",
        "projectType": "CAD Conversion",
        "budget": "Under £1,000",
        "timeline": "Flexible",
        "message": "please quote this small job for me"
    })
}

fn message() -> Value {
    json!({
        "fullName": "Tom Brennan",
        "email": "tom@brennan-build.com",
        "phone": "07700 900123",
        "service": "hvac"
    })
}

fn rejected() -> ProviderError {
    ProviderError {
        status_code: Some(403),
        name: "validation_error".to_string(),
        message: "The domain is not verified.".to_string(),
    }
}

// =============================================================================
// Contact API
// =============================================================================

#[tokio::test]
async fn test_quote_submission_sends_both_emails() {
    let provider = Arc::new(StubProvider::default());

    let response = app_with(&provider)
        .oneshot(post("/api/contact/contact", quote().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(
        json_body(response).await,
        json!({
            "success": true,
            "message": "Thank you for your message! We will get back to you soon.",
            "sendMailData": {"id": "email_2"},
            "recieveEmailData": {"id": "email_1"}
        })
    );

    let sent = provider.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, vec!["info@cadoutsource.co.uk".to_string()]);
    assert_eq!(sent[0].subject, "New Contact Form Submission from Jo");
    assert_eq!(sent[1].to, vec!["jo@x.com".to_string()]);
    assert_eq!(sent[1].subject, "Thank you for contacting us!");
}

#[tokio::test]
async fn test_message_submission_uses_its_own_key() {
    let provider = Arc::new(StubProvider::default());

    let response = app_with(&provider)
        .oneshot(post("/api/sendMessage/sendMessage", message().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["receiveEmailData"], json!({"id": "email_1"}));
    assert!(provider.sent()[0].text.contains("No message provided"));
}

#[tokio::test]
async fn test_invalid_submission_sends_nothing() {
    let provider = Arc::new(StubProvider::default());
    let mut payload = quote();
    payload["name"] = json!("J");

    let response = app_with(&provider)
        .oneshot(post("/api/contact/contact", payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({
            "success": false,
            "error": {
                "name": "ValidationError",
                "issues": [{"field": "name", "message": "Name must be at least 2 characters"}]
            }
        })
    );
    assert!(provider.sent().is_empty());
}

#[tokio::test]
async fn test_message_schema_rejects_quote_payload() {
    let provider = Arc::new(StubProvider::default());

    let response = app_with(&provider)
        .oneshot(post("/api/sendMessage/sendMessage", quote().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let fields: Vec<&str> = body["error"]["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["fullName", "service"]);
}

#[tokio::test]
async fn test_malformed_json_is_a_server_error() {
    let provider = Arc::new(StubProvider::default());

    let response = app_with(&provider)
        .oneshot(post("/api/contact/contact", "{\"name\": "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({
            "success": false,
            "message": "An error occurred while processing your request."
        })
    );
    assert!(provider.sent().is_empty());
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let provider = Arc::new(StubProvider::default());
    let request = Request::builder()
        .method("POST")
        .uri("/api/sendMessage/sendMessage")
        .body(Body::from(message().to_string()))
        .unwrap();

    let response = app_with(&provider).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.sent().len(), 2);
}

#[tokio::test]
async fn test_rejected_notification_still_sends_thank_you() {
    let provider = StubProvider::scripted(vec![Err(SendError::Provider(rejected()))]);

    let response = app_with(&provider)
        .oneshot(post("/api/contact/contact", quote().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "error": {
                "statusCode": 403,
                "name": "validation_error",
                "message": "The domain is not verified."
            }
        })
    );
    assert_eq!(provider.sent().len(), 2);
}

#[tokio::test]
async fn test_rejected_thank_you_is_reported() {
    let provider = StubProvider::scripted(vec![
        Ok(SentEmail {
            id: "op".to_string(),
        }),
        Err(SendError::Provider(rejected())),
    ]);

    let response = app_with(&provider)
        .oneshot(post("/api/sendMessage/sendMessage", message().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["error"]["name"], json!("validation_error"));
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn test_delivery_failure_is_generic_server_error() {
    let provider = StubProvider::scripted(vec![Err(SendError::Parse(
        "unexpected end of input".to_string(),
    ))]);

    let response = app_with(&provider)
        .oneshot(post("/api/contact/contact", quote().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = text_body(response).await;
    assert!(!body.contains("unexpected end of input"));
    assert_eq!(provider.sent().len(), 1);
}

#[tokio::test]
async fn test_unconfigured_email_is_server_error() {
    let response = app_without_email()
        .oneshot(post("/api/contact/contact", quote().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unconfigured_email_still_validates() {
    let response = app_without_email()
        .oneshot(post("/api/contact/contact", "[]"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"]["issues"][0]["message"],
        json!("Invalid input: expected object, received array")
    );
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = app_without_email().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, "ok");
}

#[tokio::test]
async fn test_home_embeds_message_form() {
    let response = app_without_email().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("content-security-policy"));
    assert!(response.headers().contains_key("x-request-id"));

    let html = text_body(response).await;
    assert!(html.contains(r#"data-endpoint="/api/sendMessage/sendMessage""#));
    assert!(html.contains(&format!(r#"data-thank-you-token="{TOKEN}""#)));
    assert!(html.contains(r#"name="fullName""#));
    assert!(html.contains("Legionella Schematic Drawing"));
}

#[tokio::test]
async fn test_contact_page_embeds_quote_form() {
    let response = app_without_email().oneshot(get("/contact")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert!(html.contains(r#"data-endpoint="/api/contact/contact""#));
    assert!(html.contains(r#"name="projectType""#));
    assert!(html.contains("Discuss in consultation"));
    assert!(html.contains("Rush (1-3 days)"));
    assert!(html.contains("data-rules="));
}

#[tokio::test]
async fn test_thank_you_requires_token() {
    let response = app_without_email()
        .oneshot(get(&format!("/thankyou?token={TOKEN}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for uri in ["/thankyou", "/thankyou?token=wrong"] {
        let response = app_without_email().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    }
}

#[tokio::test]
async fn test_static_css_is_served() {
    let response = app_without_email()
        .oneshot(get("/static/css/main.css"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=86400"
    );
}

#[tokio::test]
async fn test_form_script_redirects_on_any_success_status() {
    let response = app_without_email()
        .oneshot(get("/static/js/contact-form.js"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let script = text_body(response).await;

    // A 200 with a provider error body is treated as sent, like any other 200.
    assert!(script.contains("if (!response.ok) {"));
    assert!(!script.contains("data.success"));
    assert!(script.contains(r#"localStorage.setItem("herodata""#));
}
