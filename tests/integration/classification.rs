//! Status handling as seen through the public client.

use super::common::{config, core_client, API_BASE};
use busbar_hd_api::client::{ErrorKind, FailureCode, RetryConfig, StatusPolicy};
use busbar_hd_api::{CallOptions, HelpdeskClient, PathSpec};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_every_failure_code_maps_to_its_message() {
    let mock_server = MockServer::start().await;

    let table = [
        (400, "Bad Request"),
        (401, "Not Authorized"),
        (403, "Forbidden"),
        (404, "Item not found"),
        (405, "Method not Allowed"),
        (409, "Conflict"),
        (422, "Unprocessable Entity"),
        (500, "Internal Server Error"),
        (503, "Service Unavailable"),
    ];
    for (status, _) in table {
        Mock::given(method("GET"))
            .and(path(format!("{}/status/{}.json", API_BASE, status)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"error": status})))
            .mount(&mock_server)
            .await;
    }

    let client = core_client(&mock_server);
    for (status, description) in table {
        let err = client
            .get(
                PathSpec::segments(["status".to_string(), status.to_string()]),
                &CallOptions::default(),
            )
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("Helpdesk Error ({}): {}", status, description)
        );
        match err.kind {
            ErrorKind::HttpStatus { code, body, .. } => {
                assert_eq!(code, FailureCode::from_status(status).unwrap());
                assert_eq!(body, Some(json!({"error": status})));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_429_without_retry_after_uses_table() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/busy.json", API_BASE)))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let err = core_client(&mock_server)
        .get(PathSpec::segments(["busy"]), &CallOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Helpdesk Error (429): Too Many Requests");
    assert!(!err.is_rate_limited());
}

#[tokio::test]
async fn test_unlisted_status_is_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/teapot.json", API_BASE)))
        .respond_with(ResponseTemplate::new(418).set_body_json(json!({"short": "stout"})))
        .mount(&mock_server)
        .await;

    let response = core_client(&mock_server)
        .get(PathSpec::segments(["teapot"]), &CallOptions::default())
        .await
        .unwrap();
    assert_eq!(response.status, 418);
    assert_eq!(response.body["short"], "stout");
}

#[tokio::test]
async fn test_lenient_policy() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/tickets/1.json", API_BASE)))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": "RecordInvalid"
        })))
        .mount(&mock_server)
        .await;

    let client = HelpdeskClient::new(
        config(&mock_server)
            .with_status_policy(StatusPolicy::Lenient)
            .build()
            .unwrap(),
    )
    .unwrap();

    let response = client
        .get(PathSpec::segments(["tickets", "1"]), &CallOptions::default())
        .await
        .unwrap();
    assert_eq!(response.status, 422);
    assert_eq!(response.body["error"], "RecordInvalid");
}

#[tokio::test]
async fn test_retry_after_wins_over_table() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/tickets.json", API_BASE)))
        .respond_with(
            ResponseTemplate::new(503)
                .insert_header("Retry-After", "120")
                .set_body_json(json!({"description": "Maintenance"})),
        )
        .mount(&mock_server)
        .await;

    let err = core_client(&mock_server)
        .get(PathSpec::segments(["tickets"]), &CallOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.retry_after(), Some(Duration::from_secs(120)));
}

#[tokio::test]
async fn test_retries_honour_retry_after_then_give_up() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/tickets.json", API_BASE)))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({})),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = HelpdeskClient::new(
        config(&mock_server)
            .with_retry(RetryConfig::default().with_max_attempts(2))
            .build()
            .unwrap(),
    )
    .unwrap();

    let err = client
        .get(PathSpec::segments(["tickets"]), &CallOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RetriesExhausted { attempts: 2 }));
}

#[tokio::test]
async fn test_empty_body_is_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/nothing.json", API_BASE)))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let err = core_client(&mock_server)
        .get(PathSpec::segments(["nothing"]), &CallOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_empty_result());
    assert_eq!(err.to_string(), "Helpdesk Error (204): empty result");
}
