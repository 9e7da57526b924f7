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

//! Typed declarations for the saved-object copy resource.
//!
//! Layout: `model.rs` (declared and normalized shapes), `validate.rs`
//! (document validation), `connection.rs` (Kibana client settings),
//! `loader.rs` (JSON/YAML document loading), `defaults.rs` (schema defaults).

pub mod connection;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use connection::{ClientSettings, Credentials};
pub use error::{ConfigError, ConfigResult};
pub use loader::{DocumentFormat, load_document, parse_document};
pub use model::{
    CopyRequest, DesiredCopy, ForceUpdate, ObjectBlock, ResourceDocument, SavedObjectRef,
};
pub use validate::{validate_document, validate_space_id};
