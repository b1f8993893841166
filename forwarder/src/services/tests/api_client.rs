//! Tests for RealMediaClient

use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::{Attributes, ContactRecord, MediaProcessingRequest};

use crate::core::builder::RequestBuilder;
use crate::services::api_client::{RealMediaClient, media_endpoint};
use crate::traits::MediaClient;
use crate::types::FeatureToggles;

fn sample_request() -> MediaProcessingRequest {
    let attributes = Attributes::new().with("voicebase.priority", "high");
    RequestBuilder::new(FeatureToggles::default())
        .build(&ContactRecord::new("contact-42", attributes))
}

fn client_for(server: &MockServer, token: Option<&str>) -> RealMediaClient {
    let api_url = Url::parse(&server.uri()).unwrap();
    RealMediaClient::new(&api_url, token.map(str::to_string), 5_000).unwrap()
}

#[test]
fn test_media_endpoint_joins_api_root() {
    let api_url = Url::parse("https://apis.voicebase.com/v3").unwrap();
    assert_eq!(media_endpoint(&api_url), "https://apis.voicebase.com/v3/media");

    let api_url = Url::parse("http://localhost:8080/").unwrap();
    assert_eq!(media_endpoint(&api_url), "http://localhost:8080/media");
}

#[tokio::test]
async fn test_accepted_submission_returns_media_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mediaId": "media-123",
            "status": "accepted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let acceptance = assert_ok!(client.submit(&sample_request()).await);

    assert_eq!(acceptance.media_id, "media-123");
    assert_eq!(acceptance.status.as_deref(), Some("accepted"));
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/media"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "mediaId": "m-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret-token"));
    assert_ok!(client.submit(&sample_request()).await);
}

#[tokio::test]
async fn test_bad_request_is_terminal_with_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/media"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": 400,
            "errors": [{ "error": "configuration is invalid" }],
            "reference": "ref-9"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let failure = assert_err!(client.submit(&sample_request()).await);

    assert_eq!(failure.status_code, 400);
    assert!(!failure.is_retryable());
    let error = failure.error.unwrap();
    assert_eq!(error.errors[0].error, "configuration is invalid");
    assert_eq!(error.reference.as_deref(), Some("ref-9"));
}

#[tokio::test]
async fn test_server_errors_are_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/media"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let failure = assert_err!(client.submit(&sample_request()).await);

    assert_eq!(failure.status_code, 503);
    assert!(failure.is_retryable());
    assert!(failure.error.is_none());
}

#[tokio::test]
async fn test_unstructured_error_body_is_kept_as_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/media"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let failure = assert_err!(client.submit(&sample_request()).await);

    assert_eq!(failure.status_code, 429);
    assert!(failure.is_retryable());
    assert_eq!(failure.message.as_deref(), Some("slow down"));
}

#[tokio::test]
async fn test_unreachable_api_is_a_retryable_network_failure() {
    // Nothing listens on the discard port
    let api_url = Url::parse("http://127.0.0.1:9").unwrap();
    let client = RealMediaClient::new(&api_url, None, 2_000).unwrap();

    let failure = assert_err!(client.submit(&sample_request()).await);
    assert_eq!(failure.status_code, 0);
    assert!(failure.is_retryable());
}
