//! Loading resource documents from JSON or YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{DesiredCopy, ResourceDocument};
use crate::validate::validate_document;

/// Serialization formats accepted for resource documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON object.
    Json,
    /// YAML mapping.
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Decode and validate a resource document held in memory.
///
/// # Errors
///
/// Returns an error when the text does not decode (including unknown fields)
/// or the declaration fails validation.
pub fn parse_document(text: &str, format: DocumentFormat) -> ConfigResult<DesiredCopy> {
    let document: ResourceDocument = match format {
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|source| ConfigError::Json { source })?
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml { source })?
        }
    };
    validate_document(document)
}

/// Read, decode, and validate a resource document from disk.
///
/// # Errors
///
/// Returns an error when the extension is not recognised, the file cannot be
/// read, or [`parse_document`] rejects its content.
pub fn load_document(path: &Path) -> ConfigResult<DesiredCopy> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        operation: "read_document",
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?format, "loading resource document");
    parse_document(&text, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::path::PathBuf;

    const YAML_DOCUMENT: &str = r"
name: copy-dash
source_space: default
target_spaces: [staging, qa]
object:
  - id: abc123
    type: dashboard
overwrite: true
";

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("copy.json")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("copy.yml")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("copy.toml")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("copy")), None);
    }

    #[test]
    fn yaml_document_loads_from_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("copy.yaml");
        fs::write(&path, YAML_DOCUMENT)?;

        let desired = load_document(&path)?;
        assert_eq!(desired.request.name, "copy-dash");
        assert_eq!(desired.request.target_spaces.len(), 2);
        assert!(desired.request.overwrite);
        assert!(desired.request.include_references);
        Ok(())
    }

    #[test]
    fn json_document_rejects_unknown_fields() {
        let text = r#"{"name":"copy","target_spaces":["a"],"object":[{"id":"1","type":"dashboard"}],"overwrites":true}"#;
        assert!(matches!(
            parse_document(text, DocumentFormat::Json),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn missing_file_and_unknown_extension_are_reported() {
        assert!(matches!(
            load_document(&PathBuf::from("/definitely/missing/copy.json")),
            Err(ConfigError::Io {
                operation: "read_document",
                ..
            })
        ));
        assert!(matches!(
            load_document(Path::new("copy.ini")),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }
}
