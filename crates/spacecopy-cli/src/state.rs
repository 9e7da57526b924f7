//! JSON state file holding the tracked copy between runs.
//!
//! A missing file means nothing is tracked. Writes go through a sibling
//! temporary file so an interrupted run never leaves half a document behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use spacecopy_resource::ResourceState;
use tracing::debug;

use crate::client::{CliError, CliResult};

/// File-backed store for one [`ResourceState`].
#[derive(Debug, Clone)]
pub(crate) struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn load(&self) -> CliResult<Option<ResourceState>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file; nothing tracked");
                return Ok(None);
            }
            Err(err) => {
                return Err(CliError::failure(anyhow::Error::new(err).context(format!(
                    "failed to read state file {}",
                    self.path.display()
                ))));
            }
        };

        serde_json::from_str(&text).map(Some).map_err(|err| {
            CliError::validation(format!(
                "state file {} is not valid: {err}",
                self.path.display()
            ))
        })
    }

    pub(crate) fn save(&self, state: &ResourceState) -> CliResult<()> {
        let text = serde_json::to_string_pretty(state)
            .context("failed to serialise state")
            .map_err(CliError::failure)?;

        let staging = self.staging_path();
        fs::write(&staging, text)
            .and_then(|()| fs::rename(&staging, &self.path))
            .with_context(|| format!("failed to write state file {}", self.path.display()))
            .map_err(CliError::failure)?;

        debug!(path = %self.path.display(), tracked = state.is_tracked(), "state saved");
        Ok(())
    }

    pub(crate) fn remove(&self) -> CliResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CliError::failure(anyhow::Error::new(err).context(format!(
                "failed to remove state file {}",
                self.path.display()
            )))),
        }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use spacecopy_test_support::fixtures::copy_dash;
    use tempfile::tempdir;

    #[test]
    fn missing_file_means_nothing_tracked() -> Result<()> {
        let dir = tempdir()?;
        let store = StateStore::new(dir.path().join("state.json"));
        assert!(matches!(store.load(), Ok(None)));
        assert!(store.remove().is_ok());
        Ok(())
    }

    #[test]
    fn saved_state_loads_back() -> Result<()> {
        let dir = tempdir()?;
        let store = StateStore::new(dir.path().join("state.json"));
        let state = ResourceState::tracked(copy_dash().request);

        store.save(&state).map_err(|err| anyhow::anyhow!(err.display_message()))?;

        let loaded = store
            .load()
            .map_err(|err| anyhow::anyhow!(err.display_message()))?;
        assert_eq!(loaded, Some(state));
        assert!(!dir.path().join("state.json.tmp").exists());
        assert_eq!(store.path(), dir.path().join("state.json"));
        Ok(())
    }

    #[test]
    fn corrupt_state_is_a_validation_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json")?;

        let err = StateStore::new(&path).load().err();
        assert!(matches!(
            err,
            Some(CliError::Validation(ref message)) if message.contains("state.json")
        ));
        Ok(())
    }

    #[test]
    fn remove_deletes_the_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("state.json");
        fs::write(&path, "{}")?;

        StateStore::new(&path)
            .remove()
            .map_err(|err| anyhow::anyhow!(err.display_message()))?;
        assert!(!path.exists());
        Ok(())
    }
}
