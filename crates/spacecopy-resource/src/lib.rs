#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Lifecycle adapter for the saved-object copy resource.
//!
//! The resource maps a declaration onto one `_copy_saved_objects` call. Kibana
//! offers no way to undo a copy, so deleting the resource only stops tracking
//! it. Nothing here reads the copied objects back: `force_update` and
//! `overwrite` are the only levers for re-synchronising targets.
//!
//! Layout: `adapter.rs` (create/read/update/delete/apply), `plan.rs` (change
//! detection), `state.rs` (tracked state), `events.rs` (lifecycle events and
//! sinks), `error.rs` (adapter errors).

pub mod adapter;
pub mod error;
pub mod events;
pub mod plan;
pub mod state;

pub use adapter::{Applied, CopyAdapter};
pub use error::{ResourceError, ResourceResult};
pub use events::{CopyEvent, EventSink, Operation, TracingSink};
pub use plan::{Plan, plan};
pub use state::{ResourceState, Tracking, TrackingId};
