//! Tracked state persisted by the orchestrator between runs.
//!
//! # Design
//! - Two states only: absent (no identifier) and tracked (identifier = name).
//! - Serialized flat, with `id` empty when absent, so a stored state reads
//!   like the declaration plus an identifier.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use spacecopy_config::{CopyRequest, ForceUpdate};

/// Identifier under which a copy resource is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingId(String);

impl TrackingId {
    /// Tracking identifier derived from a request: the resource name.
    #[must_use]
    pub fn for_request(request: &CopyRequest) -> Self {
        Self(request.name.clone())
    }

    /// Identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TrackingId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Whether the orchestrator currently tracks the resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tracking {
    /// No identifier assigned.
    #[default]
    Absent,
    /// Identifier assigned by a successful create.
    Tracked(TrackingId),
}

impl Tracking {
    /// Tracked identifier, if any.
    #[must_use]
    pub const fn id(&self) -> Option<&TrackingId> {
        match self {
            Self::Absent => None,
            Self::Tracked(id) => Some(id),
        }
    }

    /// Whether an identifier is assigned.
    #[must_use]
    pub const fn is_tracked(&self) -> bool {
        matches!(self, Self::Tracked(_))
    }
}

impl From<String> for Tracking {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::Absent
        } else {
            Self::Tracked(TrackingId(value))
        }
    }
}

impl From<Tracking> for String {
    fn from(value: Tracking) -> Self {
        match value {
            Tracking::Absent => Self::new(),
            Tracking::Tracked(TrackingId(id)) => id,
        }
    }
}

/// State of one copy resource as handed back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Tracking identifier (`id`).
    #[serde(rename = "id")]
    pub tracking: Tracking,
    /// Declared copy parameters as last applied.
    #[serde(flatten)]
    pub request: CopyRequest,
    /// One-shot trigger; always cleared in states returned by the adapter.
    #[serde(default)]
    pub force_update: ForceUpdate,
}

impl ResourceState {
    /// Tracked state for `request` with the force trigger cleared.
    #[must_use]
    pub fn tracked(request: CopyRequest) -> Self {
        Self {
            tracking: Tracking::Tracked(TrackingId::for_request(&request)),
            request,
            force_update: ForceUpdate::cleared(),
        }
    }

    /// Whether an identifier is assigned.
    #[must_use]
    pub const fn is_tracked(&self) -> bool {
        self.tracking.is_tracked()
    }
}
