//! Ticket records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::groups::Group;
use crate::organizations::Organization;
use crate::users::User;

/// A support ticket.
///
/// The `requester`, `submitter`, `assignee`, `organization` and `group`
/// fields are only filled when the matching side-load was requested.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Ticket {
    pub id: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(rename = "type", default)]
    pub ticket_type: Option<String>,
    #[serde(default)]
    pub requester_id: Option<u64>,
    #[serde(default)]
    pub submitter_id: Option<u64>,
    #[serde(default)]
    pub assignee_id: Option<u64>,
    #[serde(default)]
    pub organization_id: Option<u64>,
    #[serde(default)]
    pub group_id: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,

    /// Fields not modelled above (custom fields, via, satisfaction rating...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a ticket comment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Comment {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    /// Upload tokens to attach to the comment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uploads: Vec<String>,
}

impl Comment {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            public: None,
            uploads: Vec::new(),
        }
    }

    /// Mark the comment as internal.
    pub fn private(mut self) -> Self {
        self.public = Some(false);
        self
    }

    /// Attach a previously uploaded file by its token.
    pub fn with_upload(mut self, token: impl Into<String>) -> Self {
        self.uploads.push(token.into());
        self
    }
}

/// Fields for creating a ticket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewTicket {
    pub subject: String,
    pub comment: Comment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NewTicket {
    pub fn new(subject: impl Into<String>, comment: Comment) -> Self {
        Self {
            subject: subject.into(),
            comment,
            requester_id: None,
            assignee_id: None,
            group_id: None,
            priority: None,
            tags: Vec::new(),
        }
    }

    pub fn requester(mut self, id: u64) -> Self {
        self.requester_id = Some(id);
        self
    }

    pub fn assignee(mut self, id: u64) -> Self {
        self.assignee_id = Some(id);
        self
    }

    pub fn group(mut self, id: u64) -> Self {
        self.group_id = Some(id);
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
