//! Typed resource calls end to end.

use super::common::{base_uri, rest_client, API_BASE};
use busbar_hd_api::rest::{Comment, NewTicket};
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_ticket_lifecycle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/uploads.json", API_BASE)))
        .and(query_param("filename", "crash.log"))
        .and(header("Content-Type", "application/binary"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "upload": {"token": "tok-1", "attachments": [{"id": 4, "file_name": "crash.log"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{}/tickets.json", API_BASE)))
        .and(body_json(json!({
            "ticket": {
                "subject": "Crash on startup",
                "comment": {"body": "Log attached", "uploads": ["tok-1"]},
                "priority": "high"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ticket": {"id": 77, "subject": "Crash on startup", "status": "new"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{}/tickets/77.json", API_BASE)))
        .and(body_json(json!({"ticket": {"status": "solved"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": {"id": 77, "status": "solved"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/tickets/77.json", API_BASE)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("crash.log");
    let mut log = std::fs::File::create(&log_path).unwrap();
    log.write_all(b"panicked at main.rs:1").unwrap();

    let client = rest_client(&mock_server);

    let upload = client
        .upload_attachment(&log_path, None, None)
        .await
        .expect("upload should succeed");
    assert_eq!(upload.attachments[0].id, 4);

    let ticket = client
        .create_ticket(
            &NewTicket::new(
                "Crash on startup",
                Comment::new("Log attached").with_upload(upload.token),
            )
            .priority("high"),
        )
        .await
        .expect("create should succeed");
    assert_eq!(ticket.id, 77);

    let ticket = client
        .update_ticket(ticket.id, &json!({"status": "solved"}))
        .await
        .expect("update should succeed");
    assert_eq!(ticket.status.as_deref(), Some("solved"));

    client
        .delete_ticket(ticket.id)
        .await
        .expect("delete should succeed");
}

#[tokio::test]
async fn test_listing_with_sideloads_across_pages() {
    let mock_server = MockServer::start().await;
    let base = base_uri(&mock_server);

    Mock::given(method("GET"))
        .and(path(format!("{}/tickets.json", API_BASE)))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [{"id": 2, "requester_id": 11, "organization_id": 100}],
            "users": [{"id": 11, "name": "Grace"}],
            "organizations": [{"id": 100, "name": "Navy"}],
            "next_page": null
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/tickets.json", API_BASE)))
        .and(query_param("include", "users,organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [{"id": 1, "requester_id": 10, "organization_id": null}],
            "users": [{"id": 10, "name": "Ada"}],
            "organizations": [],
            "next_page": format!("{}/tickets.json?include=users,organizations&page=2", base)
        })))
        .mount(&mock_server)
        .await;

    let tickets = rest_client(&mock_server)
        .list_tickets(&["users", "organizations"])
        .await
        .unwrap();

    assert_eq!(tickets.len(), 2);
    assert_eq!(
        tickets[0].requester.as_ref().and_then(|u| u.name.as_deref()),
        Some("Ada")
    );
    assert!(tickets[0].organization.is_none());
    assert_eq!(
        tickets[1].organization.as_ref().and_then(|o| o.name.as_deref()),
        Some("Navy")
    );
}

#[tokio::test]
async fn test_current_user_and_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/users/me.json", API_BASE)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "Agent", "role": "agent"}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/search.json", API_BASE)))
        .and(query_param("query", "status:open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"result_type": "ticket", "id": 1},
                {"result_type": "ticket", "id": 2}
            ],
            "next_page": null
        })))
        .mount(&mock_server)
        .await;

    let client = rest_client(&mock_server);
    let me = client.current_user().await.unwrap();
    assert!(me.is_agent());

    let hits = client.search("status:open").await.unwrap();
    let ids: Vec<Option<u64>> = hits.iter().map(|hit| hit.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}
