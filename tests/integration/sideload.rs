//! Side-load joins through the public client.

use super::common::{config, core_client, ticket_profile, API_BASE};
use busbar_hd_api::client::{ResourceProfile, SideLoadMapping};
use busbar_hd_api::{CallOptions, HelpdeskClient, PathSpec};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_include_and_join() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/tickets.json", API_BASE)))
        .and(query_param("include", "users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [{"id": 1, "requester_id": 10}],
            "users": [{"id": 10, "name": "A"}]
        })))
        .mount(&mock_server)
        .await;

    let options = CallOptions::with_profile(ticket_profile()).include(["users"]);
    let response = core_client(&mock_server)
        .get(PathSpec::segments(["tickets"]), &options)
        .await
        .unwrap();

    assert_eq!(
        response.body,
        json!([{"id": 1, "requester_id": 10, "requester": {"id": 10, "name": "A"}}])
    );
}

#[tokio::test]
async fn test_client_default_include_and_per_call_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/tickets.json", API_BASE)))
        .and(query_param("include", "users,groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tickets": []})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/tickets.json", API_BASE)))
        .and(query_param_is_missing("include"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tickets": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HelpdeskClient::new(
        config(&mock_server)
            .with_include(["users", "groups"])
            .build()
            .unwrap(),
    )
    .unwrap();

    let options = CallOptions::with_profile(ticket_profile());
    client
        .get(PathSpec::segments(["tickets"]), &options)
        .await
        .unwrap();
    client
        .get(PathSpec::segments(["tickets"]), &options.clone().without_include())
        .await
        .unwrap();

    // A per-call list never leaks into the client default.
    assert_eq!(client.config().include, vec!["users", "groups"]);
}

#[tokio::test]
async fn test_array_and_all_joins() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/organizations/5.json", API_BASE)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organization": {"id": 5, "name": "Acme"},
            "users": [
                {"id": 1, "organization_id": 5},
                {"id": 2, "organization_id": 6},
                {"id": 3, "organization_id": 5}
            ],
            "groups": [{"id": 9}]
        })))
        .mount(&mock_server)
        .await;

    let profile = ResourceProfile::new(["organization"])
        .sideload(
            SideLoadMapping::new("id", "members", "users")
                .key("organization_id")
                .array(),
        )
        .sideload(SideLoadMapping::new("id", "groups", "groups").all());

    let response = core_client(&mock_server)
        .get(
            PathSpec::segments(["organizations", "5"]),
            &CallOptions::with_profile(Arc::new(profile)).without_include(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.body["members"],
        json!([{"id": 1, "organization_id": 5}, {"id": 3, "organization_id": 5}])
    );
    assert_eq!(response.body["groups"], json!([{"id": 9}]));
}

#[tokio::test]
async fn test_missing_match_sets_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/tickets/1.json", API_BASE)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": {"id": 1, "requester_id": 99},
            "users": [{"id": 10}]
        })))
        .mount(&mock_server)
        .await;

    let response = core_client(&mock_server)
        .get(
            PathSpec::segments(["tickets", "1"]),
            &CallOptions::with_profile(ticket_profile()),
        )
        .await
        .unwrap();
    assert_eq!(
        response.body,
        json!({"id": 1, "requester_id": 99, "requester": null})
    );
}
