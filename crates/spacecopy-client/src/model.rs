//! Wire payloads for `_copy_saved_objects`.

use serde::{Deserialize, Serialize};
use spacecopy_config::CopyRequest;

/// One object entry in the copy payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceObjectParam {
    /// Saved object identifier.
    pub id: String,
    /// Saved object type.
    #[serde(rename = "type")]
    pub object_type: String,
}

/// Body of a copy-saved-objects call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopySavedObjectsParams {
    /// Target space identifiers.
    pub spaces: Vec<String>,
    /// Objects to copy.
    pub objects: Vec<SpaceObjectParam>,
    /// Copy referenced objects too.
    pub include_references: bool,
    /// Overwrite conflicting objects in the targets.
    pub overwrite: bool,
    /// Regenerate object ids in the targets.
    pub create_new_copies: bool,
}

impl From<&CopyRequest> for CopySavedObjectsParams {
    fn from(request: &CopyRequest) -> Self {
        Self {
            spaces: request.target_spaces.iter().cloned().collect(),
            objects: request
                .objects
                .iter()
                .map(|object| SpaceObjectParam {
                    id: object.id.clone(),
                    object_type: object.object_type.clone(),
                })
                .collect(),
            include_references: request.include_references,
            overwrite: request.overwrite,
            create_new_copies: request.create_new_copies,
        }
    }
}
