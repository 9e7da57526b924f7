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

//! Client for the Kibana spaces API.
//!
//! Layout: `api.rs` (the `SpacesApi` seam), `model.rs` (wire DTOs),
//! `kibana.rs` (reqwest implementation), `error.rs` (client errors).

pub mod api;
pub mod error;
pub mod kibana;
pub mod model;

pub use api::SpacesApi;
pub use error::{ClientError, ClientResult};
pub use kibana::KibanaClient;
pub use model::{CopySavedObjectsParams, SpaceObjectParam};
