//! The Resend client against a local fake of the email API.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use cadoutsource_integration_tests::{FakeResend, Reply, TEST_API_KEY, dispatch_config};
use cadoutsource_site::services::{EmailProvider, OutboundEmail, ResendClient, SendError};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;

fn email() -> OutboundEmail {
    OutboundEmail {
        from: "CadOutSource <hello@cadoutsource.co.uk>".to_string(),
        to: vec!["jo@x.com".to_string()],
        subject: "Thank you for contacting us!".to_string(),
        html: "<h1>Thank You, Jo!</h1>".to_string(),
        text: "Thank You, Jo!".to_string(),
        reply_to: Some("info@cadoutsource.co.uk".to_string()),
    }
}

#[tokio::test]
async fn test_send_posts_json_with_bearer_auth() {
    let fake = FakeResend::start(vec![Reply::sent("4ef9a417-02e9-4d39-ad75-9611e0fcc33c")]).await;
    let client = ResendClient::new(&dispatch_config(), fake.url()).unwrap();

    let sent = client.send(&email()).await.unwrap();

    assert_eq!(sent.id, "4ef9a417-02e9-4d39-ad75-9611e0fcc33c");
    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bearer {TEST_API_KEY}").as_str())
    );
    assert_eq!(
        requests[0].body,
        json!({
            "from": "CadOutSource <hello@cadoutsource.co.uk>",
            "to": ["jo@x.com"],
            "subject": "Thank you for contacting us!",
            "html": "<h1>Thank You, Jo!</h1>",
            "text": "Thank You, Jo!",
            "reply_to": "info@cadoutsource.co.uk"
        })
    );
}

#[tokio::test]
async fn test_structured_rejection() {
    let fake = FakeResend::start(vec![Reply::error(
        StatusCode::UNPROCESSABLE_ENTITY,
        "validation_error",
        "Invalid `to` field.",
    )])
    .await;
    let client = ResendClient::new(&dispatch_config(), fake.url()).unwrap();

    let err = client.send(&email()).await.unwrap_err();

    let SendError::Provider(err) = err else {
        panic!("expected provider error, got {err:?}");
    };
    assert_eq!(err.status_code, Some(422));
    assert_eq!(err.name, "validation_error");
    assert_eq!(err.message, "Invalid `to` field.");
}

#[tokio::test]
async fn test_unstructured_rejection() {
    let fake = FakeResend::start(vec![Reply::raw(StatusCode::BAD_GATEWAY, "upstream timed out")]).await;
    let client = ResendClient::new(&dispatch_config(), fake.url()).unwrap();

    let err = client.send(&email()).await.unwrap_err();

    let SendError::Provider(err) = err else {
        panic!("expected provider error, got {err:?}");
    };
    assert_eq!(err.status_code, Some(502));
    assert_eq!(err.name, "application_error");
    assert_eq!(err.message, "upstream timed out");
}

#[tokio::test]
async fn test_undecodable_success_is_a_parse_error() {
    let fake = FakeResend::start(vec![Reply::raw(StatusCode::OK, "accepted")]).await;
    let client = ResendClient::new(&dispatch_config(), fake.url()).unwrap();

    let err = client.send(&email()).await.unwrap_err();

    assert!(matches!(err, SendError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_api_is_an_http_error() {
    // Bind and drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{addr}")).unwrap();
    let client = ResendClient::new(&dispatch_config(), &url).unwrap();

    let err = client.send(&email()).await.unwrap_err();

    assert!(matches!(err, SendError::Http(_)));
}
