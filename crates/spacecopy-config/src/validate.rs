//! Validation of resource documents into typed copy requests.

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::debug;

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{
    CopyRequest, DesiredCopy, ForceUpdate, ObjectBlock, ResourceDocument, SavedObjectRef,
};

/// Kibana space identifiers: lowercase letters, digits, `_` and `-`.
const SPACE_ID_PATTERN: &str = r"^[a-z0-9_-]+$";

static SPACE_ID: OnceCell<Regex> = OnceCell::new();

fn space_id_regex() -> ConfigResult<&'static Regex> {
    SPACE_ID.get_or_try_init(|| {
        Regex::new(SPACE_ID_PATTERN).map_err(|source| ConfigError::PatternCompile {
            pattern: SPACE_ID_PATTERN,
            source,
        })
    })
}

/// Check that `value` is a well-formed space identifier.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] naming `field` when the identifier is
/// empty or uses characters Kibana does not accept.
pub fn validate_space_id(field: &str, value: &str) -> ConfigResult<()> {
    if value.is_empty() {
        return Err(ConfigError::invalid_value(field, "must not be empty", value));
    }
    if !space_id_regex()?.is_match(value) {
        return Err(ConfigError::invalid_value(
            field,
            "must contain only lowercase letters, digits, '_' or '-'",
            value,
        ));
    }
    Ok(())
}

/// Turn a raw declaration into the request the adapter sends.
///
/// Defaults from [`crate::defaults`] fill omitted optional fields. Duplicate
/// target spaces and duplicate objects collapse, since both fields are sets.
///
/// # Errors
///
/// Returns an error when a required field is missing, a set is empty, or a
/// value is malformed.
pub fn validate_document(document: ResourceDocument) -> ConfigResult<DesiredCopy> {
    let name = document
        .name
        .ok_or(ConfigError::MissingField { field: "name" })?;
    if name.trim().is_empty() {
        return Err(ConfigError::invalid("name", "must not be empty"));
    }

    let source_space = document
        .source_space
        .unwrap_or_else(|| defaults::SOURCE_SPACE.to_string());
    validate_space_id("source_space", &source_space)?;

    let target_spaces = parse_target_spaces(
        document
            .target_spaces
            .ok_or(ConfigError::MissingField {
                field: "target_spaces",
            })?,
    )?;
    let objects = parse_objects(
        document
            .object
            .ok_or(ConfigError::MissingField { field: "object" })?,
    )?;

    let request = CopyRequest {
        name,
        source_space,
        target_spaces,
        objects,
        include_references: document
            .include_reference
            .unwrap_or(defaults::INCLUDE_REFERENCES),
        overwrite: document.overwrite.unwrap_or(defaults::OVERWRITE),
        create_new_copies: document
            .create_new_copies
            .unwrap_or(defaults::CREATE_NEW_COPIES),
    };
    debug!(
        name = %request.name,
        source_space = %request.source_space,
        targets = request.target_spaces.len(),
        objects = request.objects.len(),
        "validated copy declaration"
    );

    Ok(DesiredCopy {
        request,
        force_update: ForceUpdate::from(document.force_update.unwrap_or(false)),
    })
}

fn parse_target_spaces(raw: Vec<String>) -> ConfigResult<BTreeSet<String>> {
    if raw.is_empty() {
        return Err(ConfigError::invalid("target_spaces", "must not be empty"));
    }
    let mut spaces = BTreeSet::new();
    for (index, space) in raw.into_iter().enumerate() {
        validate_space_id(&format!("target_spaces[{index}]"), &space)?;
        spaces.insert(space);
    }
    Ok(spaces)
}

fn parse_objects(raw: Vec<ObjectBlock>) -> ConfigResult<Vec<SavedObjectRef>> {
    if raw.is_empty() {
        return Err(ConfigError::invalid("object", "must not be empty"));
    }
    let mut seen = HashSet::new();
    let mut objects = Vec::with_capacity(raw.len());
    for (index, block) in raw.into_iter().enumerate() {
        let id = required_text(block.id, index, "id")?;
        let object_type = required_text(block.object_type, index, "type")?;
        let object = SavedObjectRef::new(id, object_type);
        if seen.insert(object.clone()) {
            objects.push(object);
        }
    }
    Ok(objects)
}

fn required_text(value: Option<String>, index: usize, key: &str) -> ConfigResult<String> {
    let field = format!("object[{index}].{key}");
    let value = value.ok_or_else(|| ConfigError::invalid(field.clone(), "is required"))?;
    if value.trim().is_empty() {
        return Err(ConfigError::invalid_value(field, "must not be empty", value));
    }
    Ok(value)
}
