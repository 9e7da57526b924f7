//! Schema defaults applied when a declaration omits optional fields.

/// Space objects are copied from when `source_space` is not declared.
pub const SOURCE_SPACE: &str = "default";
/// Default for `include_reference`.
pub const INCLUDE_REFERENCES: bool = true;
/// Default for `overwrite`.
pub const OVERWRITE: bool = false;
/// Default for `create_new_copies`.
pub const CREATE_NEW_COPIES: bool = true;
/// Request timeout applied to the Kibana client when none is configured.
pub const CLIENT_TIMEOUT_SECS: u64 = 30;
