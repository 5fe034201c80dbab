//! Cursor-following across pages.

use super::common::{base_uri, config, core_client, ticket_profile, API_BASE};
use busbar_hd_api::{CallOptions, HelpdeskClient, PathSpec, RequestMethod};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_pages(server: &MockServer, pages: usize) {
    let base = base_uri(server);
    for page in 1..=pages {
        let next = if page < pages {
            json!(format!("{}/tickets.json?page={}", base, page + 1))
        } else {
            json!(null)
        };
        let body = json!({
            "tickets": [{"id": page * 10 + 1}, {"id": page * 10 + 2}],
            "next_page": next,
            "count": pages * 2
        });

        let mock = Mock::given(method("GET")).and(path(format!("{}/tickets.json", API_BASE)));
        let mock = if page == 1 {
            mock.and(query_param_is_missing("page"))
        } else {
            mock.and(query_param("page", page.to_string()))
        };
        mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_request_all_returns_pages_in_order() {
    let mock_server = MockServer::start().await;
    mount_pages(&mock_server, 4).await;

    let all = core_client(&mock_server)
        .request_all(
            RequestMethod::Get,
            PathSpec::segments(["tickets"]),
            &CallOptions::with_profile(ticket_profile()),
        )
        .await
        .expect("pagination should succeed");

    assert_eq!(all.len(), 4);
    assert_eq!(all.statuses(), vec![200; 4]);
    let ids: Vec<u64> = all.body.iter().map(|t| t["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![11, 12, 21, 22, 31, 32, 41, 42]);
    assert_eq!(all.pages[3].body, json!([{"id": 41}, {"id": 42}]));
    assert!(all.envelopes().all(|envelope| envelope["count"] == 8));
}

#[tokio::test]
async fn test_request_all_single_page() {
    let mock_server = MockServer::start().await;
    mount_pages(&mock_server, 1).await;

    let all = core_client(&mock_server)
        .get_all(
            PathSpec::segments(["tickets"]),
            &CallOptions::with_profile(ticket_profile()),
        )
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all.body.len(), 2);
}

#[tokio::test]
async fn test_failure_mid_way_returns_only_the_error() {
    let mock_server = MockServer::start().await;
    let base = base_uri(&mock_server);

    Mock::given(method("GET"))
        .and(path(format!("{}/tickets.json", API_BASE)))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [{"id": 1}],
            "next_page": format!("{}/tickets.json?page=2", base)
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/tickets.json", API_BASE)))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Couldn't authenticate you"
        })))
        .mount(&mock_server)
        .await;

    let err = core_client(&mock_server)
        .get_all(PathSpec::segments(["tickets"]), &CallOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Helpdesk Error (401): Not Authorized");
}

#[tokio::test]
async fn test_first_page_uses_requested_method() {
    let mock_server = MockServer::start().await;
    let base = base_uri(&mock_server);

    Mock::given(method("POST"))
        .and(path(format!("{}/tickets/show_many.json", API_BASE)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [{"id": 1}],
            "next_page": format!("{}/tickets/show_many.json?page=2", base)
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/tickets/show_many.json", API_BASE)))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [{"id": 2}],
            "next_page": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let all = core_client(&mock_server)
        .request_all(
            RequestMethod::Post,
            PathSpec::segments(["tickets", "show_many"]),
            &CallOptions::with_profile(ticket_profile()),
        )
        .await
        .unwrap();
    assert_eq!(all.body, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[tokio::test]
async fn test_throttle_applies_to_every_page() {
    let mock_server = MockServer::start().await;
    mount_pages(&mock_server, 3).await;

    let client = HelpdeskClient::new(
        config(&mock_server)
            .with_throttle(Duration::from_millis(40))
            .build()
            .unwrap(),
    )
    .unwrap();

    let start = std::time::Instant::now();
    client
        .get_all(
            PathSpec::segments(["tickets"]),
            &CallOptions::with_profile(ticket_profile()),
        )
        .await
        .unwrap();
    assert!(start.elapsed() >= Duration::from_millis(80));
}
