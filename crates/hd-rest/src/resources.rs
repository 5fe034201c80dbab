//! Envelope layouts and side-load joins of each resource.

use std::sync::{Arc, LazyLock};

use busbar_hd_client::{ResourceProfile, SideLoadMapping};

static TICKETS: LazyLock<Arc<ResourceProfile>> = LazyLock::new(|| {
    Arc::new(
        ResourceProfile::new(["tickets", "ticket"])
            .sideload(SideLoadMapping::new("requester_id", "requester", "users"))
            .sideload(SideLoadMapping::new("submitter_id", "submitter", "users"))
            .sideload(SideLoadMapping::new("assignee_id", "assignee", "users"))
            .sideload(SideLoadMapping::new(
                "organization_id",
                "organization",
                "organizations",
            ))
            .sideload(SideLoadMapping::new("group_id", "group", "groups")),
    )
});

static USERS: LazyLock<Arc<ResourceProfile>> = LazyLock::new(|| {
    Arc::new(
        ResourceProfile::new(["users", "user"]).sideload(SideLoadMapping::new(
            "organization_id",
            "organization",
            "organizations",
        )),
    )
});

static ORGANIZATIONS: LazyLock<Arc<ResourceProfile>> =
    LazyLock::new(|| Arc::new(ResourceProfile::new(["organizations", "organization"])));

static GROUPS: LazyLock<Arc<ResourceProfile>> =
    LazyLock::new(|| Arc::new(ResourceProfile::new(["groups", "group"])));

static SEARCH: LazyLock<Arc<ResourceProfile>> =
    LazyLock::new(|| Arc::new(ResourceProfile::new(["results"])));

static UPLOADS: LazyLock<Arc<ResourceProfile>> =
    LazyLock::new(|| Arc::new(ResourceProfile::new(["upload"])));

/// Tickets, with requester/submitter/assignee, organization and group joins.
pub fn tickets() -> Arc<ResourceProfile> {
    TICKETS.clone()
}

/// Users, with the organization join.
pub fn users() -> Arc<ResourceProfile> {
    USERS.clone()
}

pub fn organizations() -> Arc<ResourceProfile> {
    ORGANIZATIONS.clone()
}

pub fn groups() -> Arc<ResourceProfile> {
    GROUPS.clone()
}

pub fn search() -> Arc<ResourceProfile> {
    SEARCH.clone()
}

pub fn uploads() -> Arc<ResourceProfile> {
    UPLOADS.clone()
}
