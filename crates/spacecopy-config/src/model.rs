//! Declared and normalized shapes of the saved-object copy resource.
//!
//! # Design
//! - `ResourceDocument` mirrors the exposed schema and is what users write.
//! - `CopyRequest` is the validated form; field names on the wire (state
//!   files) keep the schema spelling so stored state reads like the declaration.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// A saved object addressed by its `(type, id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SavedObjectRef {
    /// Saved object identifier.
    pub id: String,
    /// Saved object type (`dashboard`, `visualization`, ...).
    #[serde(rename = "type")]
    pub object_type: String,
}

impl SavedObjectRef {
    /// Build a reference from its id and type.
    #[must_use]
    pub fn new(id: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object_type: object_type.into(),
        }
    }
}

/// Validated parameters of one copy operation.
///
/// `name` doubles as the tracking identifier and is never recomputed once the
/// copy has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRequest {
    /// Opaque resource name.
    pub name: String,
    /// Space the objects are copied from.
    pub source_space: String,
    /// Spaces receiving the copies; ordering is not significant.
    pub target_spaces: BTreeSet<String>,
    /// Objects to copy, in declaration order with duplicates removed.
    #[serde(rename = "object")]
    pub objects: Vec<SavedObjectRef>,
    /// Copy referenced objects along with the requested ones.
    #[serde(rename = "include_reference")]
    pub include_references: bool,
    /// Overwrite objects that already exist in a target space.
    pub overwrite: bool,
    /// Regenerate object ids in the target spaces.
    pub create_new_copies: bool,
}

impl CopyRequest {
    /// Whether both requests declare the same objects, ignoring order.
    #[must_use]
    pub fn same_objects(&self, other: &Self) -> bool {
        let mine: HashSet<&SavedObjectRef> = self.objects.iter().collect();
        let theirs: HashSet<&SavedObjectRef> = other.objects.iter().collect();
        mine == theirs
    }

    /// Whether both requests would send the same copy parameters.
    ///
    /// `name` is not compared; callers treat a name change separately.
    #[must_use]
    pub fn same_parameters(&self, other: &Self) -> bool {
        self.source_space == other.source_space
            && self.target_spaces == other.target_spaces
            && self.same_objects(other)
            && self.include_references == other.include_references
            && self.overwrite == other.overwrite
            && self.create_new_copies == other.create_new_copies
    }
}

/// Write-only trigger that forces one more copy and clears itself afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForceUpdate(bool);

impl ForceUpdate {
    /// Trigger requesting a re-copy on the next apply.
    #[must_use]
    pub const fn armed() -> Self {
        Self(true)
    }

    /// Idle trigger.
    #[must_use]
    pub const fn cleared() -> Self {
        Self(false)
    }

    /// Whether the trigger currently requests a re-copy.
    #[must_use]
    pub const fn is_armed(self) -> bool {
        self.0
    }

    /// Consume the trigger, returning whether it was armed.
    pub const fn take(&mut self) -> bool {
        let armed = self.0;
        self.0 = false;
        armed
    }
}

impl From<bool> for ForceUpdate {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

/// One entry of the `object` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectBlock {
    /// Saved object identifier.
    pub id: Option<String>,
    /// Saved object type.
    #[serde(rename = "type")]
    pub object_type: Option<String>,
}

/// Resource declaration as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDocument {
    /// Resource name (required, force-new).
    pub name: Option<String>,
    /// Source space (defaults to `default`).
    pub source_space: Option<String>,
    /// Target spaces (required, non-empty set).
    pub target_spaces: Option<Vec<String>>,
    /// Objects to copy (required, non-empty set).
    pub object: Option<Vec<ObjectBlock>>,
    /// Copy references (defaults to `true`).
    pub include_reference: Option<bool>,
    /// Overwrite existing objects (defaults to `false`).
    pub overwrite: Option<bool>,
    /// Regenerate ids in target spaces (defaults to `true`).
    pub create_new_copies: Option<bool>,
    /// One-shot re-copy trigger.
    pub force_update: Option<bool>,
}

/// Validated declaration: the request to send plus the force trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredCopy {
    /// Copy parameters.
    pub request: CopyRequest,
    /// Trigger requesting a re-copy regardless of changes.
    pub force_update: ForceUpdate,
}
