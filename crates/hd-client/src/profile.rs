//! Per-resource envelope layout and per-call options.

use std::sync::Arc;

use crate::sideload::SideLoadMapping;

/// How responses of one resource type are laid out.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceProfile {
    /// Candidate top-level keys holding the primary payload, checked in order.
    pub envelope_keys: Vec<String>,
    /// Join rules applied to the primary payload.
    pub sideloads: Vec<SideLoadMapping>,
}

impl ResourceProfile {
    /// A profile whose payload sits under the given keys.
    pub fn new<I, S>(envelope_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            envelope_keys: envelope_keys.into_iter().map(Into::into).collect(),
            sideloads: Vec::new(),
        }
    }

    /// Add a join rule.
    pub fn sideload(mut self, mapping: SideLoadMapping) -> Self {
        self.sideloads.push(mapping);
        self
    }
}

/// Options scoped to a single call (and every page of a paginated call).
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Side-load names for this call; `None` uses the client default.
    pub include: Option<Vec<String>>,
    /// Envelope layout; `None` returns the whole decoded body as payload.
    pub profile: Option<Arc<ResourceProfile>>,
}

impl CallOptions {
    /// Options with only a profile set.
    pub fn with_profile(profile: Arc<ResourceProfile>) -> Self {
        Self {
            include: None,
            profile: Some(profile),
        }
    }

    /// Request these side-loads instead of the client default.
    pub fn include<I, S>(mut self, include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(include.into_iter().map(Into::into).collect());
        self
    }

    /// Request no side-loads at all, ignoring the client default.
    pub fn without_include(mut self) -> Self {
        self.include = Some(Vec::new());
        self
    }

    pub(crate) fn envelope_keys(&self) -> &[String] {
        self.profile
            .as_deref()
            .map(|p| p.envelope_keys.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn sideloads(&self) -> &[SideLoadMapping] {
        self.profile
            .as_deref()
            .map(|p| p.sideloads.as_slice())
            .unwrap_or_default()
    }
}
