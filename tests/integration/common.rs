use busbar_hd_api::{ClientConfig, Credentials, HelpdeskClient, HelpdeskRestClient};
use busbar_hd_api::client::{ClientConfigBuilder, ResourceProfile, SideLoadMapping};
use std::sync::Arc;
use wiremock::MockServer;

/// Base path the mock server serves the API under.
pub const API_BASE: &str = "/api/v2";

pub fn base_uri(server: &MockServer) -> String {
    format!("{}{}", server.uri(), API_BASE)
}

pub fn config(server: &MockServer) -> ClientConfigBuilder {
    ClientConfig::builder(
        base_uri(server),
        Credentials::with_token("agent@acme.test", "api-token"),
    )
}

pub fn core_client(server: &MockServer) -> HelpdeskClient {
    HelpdeskClient::new(config(server).build().expect("valid config"))
        .expect("Failed to create client")
}

pub fn rest_client(server: &MockServer) -> HelpdeskRestClient {
    HelpdeskRestClient::new(config(server).build().expect("valid config"))
        .expect("Failed to create REST client")
}

/// Tickets profile with the requester join.
pub fn ticket_profile() -> Arc<ResourceProfile> {
    Arc::new(
        ResourceProfile::new(["tickets", "ticket"])
            .sideload(SideLoadMapping::new("requester_id", "requester", "users")),
    )
}
