//! Lifecycle events emitted by the adapter.
//!
//! The adapter never logs directly; it hands every event to an [`EventSink`].
//! [`TracingSink`] forwards them to `tracing`, tests plug in a recorder.

use std::sync::Arc;

use spacecopy_config::CopyRequest;
use tracing::{debug, info, warn};

/// Lifecycle operation that issued a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// First copy of a newly declared resource.
    Create,
    /// Re-copy of a tracked resource.
    Update,
}

impl Operation {
    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// Events surfaced while driving the resource lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyEvent {
    /// A copy call is about to be issued with these parameters.
    CopyRequested {
        /// Issuing operation.
        operation: Operation,
        /// Parameters sent to Kibana.
        request: CopyRequest,
    },
    /// The copy call succeeded.
    Copied {
        /// Issuing operation.
        operation: Operation,
        /// Resource name.
        name: String,
        /// Whether the force trigger caused the copy.
        forced: bool,
    },
    /// The copy call failed.
    CopyFailed {
        /// Issuing operation.
        operation: Operation,
        /// Resource name.
        name: String,
        /// Rendered client error.
        error: String,
    },
    /// Stored state was normalized.
    StateRead {
        /// Tracking identifier.
        id: String,
        /// Whether an armed force trigger was cleared.
        cleared_force_update: bool,
    },
    /// The resource was dropped from tracking; nothing was removed remotely.
    Untracked {
        /// Identifier that was tracked, empty if none.
        id: String,
    },
}

impl CopyEvent {
    /// Machine-friendly discriminator.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CopyRequested { .. } => "copy_requested",
            Self::Copied { .. } => "copied",
            Self::CopyFailed { .. } => "copy_failed",
            Self::StateRead { .. } => "state_read",
            Self::Untracked { .. } => "untracked",
        }
    }
}

/// Receiver for adapter events.
pub trait EventSink: Send + Sync {
    /// Record one event.
    fn record(&self, event: &CopyEvent);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn record(&self, event: &CopyEvent) {
        (**self).record(event);
    }
}

/// Sink that writes events as structured `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &CopyEvent) {
        match event {
            CopyEvent::CopyRequested { operation, request } => debug!(
                operation = operation.as_str(),
                name = %request.name,
                source_space = %request.source_space,
                target_spaces = ?request.target_spaces,
                objects = ?request.objects,
                include_references = request.include_references,
                overwrite = request.overwrite,
                create_new_copies = request.create_new_copies,
                "copying saved objects"
            ),
            CopyEvent::Copied {
                operation,
                name,
                forced,
            } => info!(
                operation = operation.as_str(),
                name = %name,
                forced = *forced,
                "copied saved objects"
            ),
            CopyEvent::CopyFailed {
                operation,
                name,
                error,
            } => warn!(
                operation = operation.as_str(),
                name = %name,
                error = %error,
                "copy of saved objects failed"
            ),
            CopyEvent::StateRead {
                id,
                cleared_force_update,
            } => info!(
                id = %id,
                cleared_force_update = *cleared_force_update,
                "read copy resource"
            ),
            CopyEvent::Untracked { id } => info!(
                id = %id,
                "copies cannot be undone remotely; removed from state only"
            ),
        }
    }
}
