//! Canned declarations.

use std::collections::BTreeSet;

use spacecopy_config::{CopyRequest, DesiredCopy, ForceUpdate, SavedObjectRef, defaults};

/// Copy request with defaults for every optional attribute.
#[must_use]
pub fn copy_request(name: &str, targets: &[&str], objects: &[(&str, &str)]) -> CopyRequest {
    CopyRequest {
        name: name.to_string(),
        source_space: defaults::SOURCE_SPACE.to_string(),
        target_spaces: targets
            .iter()
            .map(|target| (*target).to_string())
            .collect::<BTreeSet<_>>(),
        objects: objects
            .iter()
            .map(|(id, object_type)| SavedObjectRef::new(*id, *object_type))
            .collect(),
        include_references: defaults::INCLUDE_REFERENCES,
        overwrite: defaults::OVERWRITE,
        create_new_copies: defaults::CREATE_NEW_COPIES,
    }
}

/// `copy-dash`: dashboard `abc123` from the default space into `staging`.
#[must_use]
pub fn copy_dash() -> DesiredCopy {
    DesiredCopy {
        request: copy_request("copy-dash", &["staging"], &[("abc123", "dashboard")]),
        force_update: ForceUpdate::cleared(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_dash_uses_defaults() {
        let desired = copy_dash();
        assert_eq!(desired.request.source_space, "default");
        assert!(desired.request.include_references);
        assert!(!desired.request.overwrite);
        assert!(desired.request.create_new_copies);
        assert!(!desired.force_update.is_armed());
    }

    #[test]
    fn duplicate_targets_collapse() {
        let request = copy_request("multi", &["b", "a", "b"], &[]);
        assert_eq!(request.target_spaces.len(), 2);
    }
}
