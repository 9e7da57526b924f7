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
#![allow(clippy::redundant_pub_crate)]

//! Local driver for one saved-object copy resource.
//!
//! Layout:
//! - `cli.rs`: argument parsing and command dispatch
//! - `commands.rs`: plan/apply/refresh/destroy/show handlers
//! - `client.rs`: CLI errors and Kibana client wiring
//! - `state.rs`: JSON state file
//! - `output.rs`: table and JSON renderers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod output;
pub(crate) mod state;

pub use cli::run;
