//! Command handlers. Each loads what it needs, drives the adapter, persists
//! the resulting state, and prints the outcome.

use std::path::Path;

use spacecopy_client::SpacesApi;
use spacecopy_config::{DesiredCopy, load_document};
use spacecopy_resource::{CopyAdapter, plan};
use tracing::info;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};
use crate::output::{render_applied, render_plan, render_state};
use crate::state::StateStore;

fn load_desired(config: &Path) -> CliResult<DesiredCopy> {
    load_document(config).map_err(CliError::from_config)
}

pub(crate) fn handle_plan(
    store: &StateStore,
    config: &Path,
    format: OutputFormat,
) -> CliResult<()> {
    let desired = load_desired(config)?;
    let prior = store.load()?;

    let planned = plan(prior.as_ref(), &desired);
    info!(plan = planned.as_str(), name = %desired.request.name, "planned copy");
    let rendered = render_plan(planned, prior.as_ref(), &desired.request, format)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) async fn handle_apply<C: SpacesApi>(
    adapter: &CopyAdapter<C>,
    store: &StateStore,
    config: &Path,
    format: OutputFormat,
) -> CliResult<()> {
    let desired = load_desired(config)?;
    let prior = store.load()?;

    let applied = adapter
        .apply(prior.as_ref(), &desired)
        .await
        .map_err(CliError::from_resource)?;
    store.save(&applied.state)?;

    info!(plan = applied.plan.as_str(), name = %applied.state.request.name, "applied copy");
    println!("{}", render_applied(applied.plan, &applied.state, format)?);
    Ok(())
}

pub(crate) fn handle_refresh<C>(
    adapter: &CopyAdapter<C>,
    store: &StateStore,
    format: OutputFormat,
) -> CliResult<()> {
    let state = store
        .load()?
        .ok_or_else(|| CliError::validation("nothing tracked; run apply first"))?;

    let refreshed = adapter.read(&state).map_err(CliError::from_resource)?;
    store.save(&refreshed)?;

    println!("{}", render_state(Some(&refreshed), format)?);
    Ok(())
}

pub(crate) fn handle_destroy<C>(
    adapter: &CopyAdapter<C>,
    store: &StateStore,
    format: OutputFormat,
) -> CliResult<()> {
    let Some(state) = store.load()? else {
        println!("{}", render_state(None, format)?);
        return Ok(());
    };

    let untracked = adapter.delete(state);
    store.remove()?;

    info!(
        path = %store.path().display(),
        "state file removed; copied objects remain in Kibana"
    );
    println!("{}", render_state(Some(&untracked), format)?);
    Ok(())
}

pub(crate) fn handle_show(store: &StateStore, format: OutputFormat) -> CliResult<()> {
    let state = store.load()?;
    println!("{}", render_state(state.as_ref(), format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use spacecopy_config::ForceUpdate;
    use spacecopy_resource::ResourceState;
    use spacecopy_test_support::fixtures::copy_dash;
    use spacecopy_test_support::mocks::RecordingSpacesApi;
    use std::fs;
    use tempfile::tempdir;

    const DOCUMENT: &str = r#"{
        "name": "copy-dash",
        "target_spaces": ["staging"],
        "object": [{"id": "abc123", "type": "dashboard"}],
        "force_update": true
    }"#;

    fn cli_err(err: CliError) -> anyhow::Error {
        anyhow!(err.display_message())
    }

    #[tokio::test]
    async fn apply_twice_with_force_copies_each_time() -> Result<()> {
        let dir = tempdir()?;
        let config = dir.path().join("copy.json");
        fs::write(&config, DOCUMENT)?;
        let store = StateStore::new(dir.path().join("state.json"));
        let api = RecordingSpacesApi::new();
        let adapter = CopyAdapter::new(api.clone());

        handle_apply(&adapter, &store, &config, OutputFormat::Json)
            .await
            .map_err(cli_err)?;
        handle_apply(&adapter, &store, &config, OutputFormat::Json)
            .await
            .map_err(cli_err)?;

        assert_eq!(api.call_count(), 2);
        let saved = store
            .load()
            .map_err(cli_err)?
            .ok_or_else(|| anyhow!("state missing"))?;
        assert!(!saved.force_update.is_armed());
        Ok(())
    }

    #[tokio::test]
    async fn failed_forced_update_keeps_state_file_unchanged() -> Result<()> {
        let dir = tempdir()?;
        let config = dir.path().join("copy.json");
        fs::write(&config, DOCUMENT)?;
        let store = StateStore::new(dir.path().join("state.json"));
        store
            .save(&ResourceState::tracked(copy_dash().request))
            .map_err(cli_err)?;
        let before = fs::read(store.path())?;
        let api = RecordingSpacesApi::new();
        api.fail_with(503, "kibana unavailable");
        let adapter = CopyAdapter::new(api.clone());

        let err = handle_apply(&adapter, &store, &config, OutputFormat::Table)
            .await
            .err();

        assert!(matches!(err, Some(CliError::Failure(_))));
        assert_eq!(api.call_count(), 1);
        assert_eq!(fs::read(store.path())?, before);
        Ok(())
    }

    #[test]
    fn destroy_removes_state_without_copying() -> Result<()> {
        let dir = tempdir()?;
        let store = StateStore::new(dir.path().join("state.json"));
        let mut state = ResourceState::tracked(copy_dash().request);
        state.force_update = ForceUpdate::armed();
        store.save(&state).map_err(cli_err)?;
        let api = RecordingSpacesApi::new();
        let adapter = CopyAdapter::new(api.clone());

        handle_destroy(&adapter, &store, OutputFormat::Table).map_err(cli_err)?;

        assert!(store.load().map_err(cli_err)?.is_none());
        assert_eq!(api.call_count(), 0);
        handle_destroy(&adapter, &store, OutputFormat::Table).map_err(cli_err)?;
        Ok(())
    }

    #[test]
    fn refresh_requires_tracked_state() -> Result<()> {
        let dir = tempdir()?;
        let store = StateStore::new(dir.path().join("state.json"));
        let adapter = CopyAdapter::new(RecordingSpacesApi::new());

        let err = handle_refresh(&adapter, &store, OutputFormat::Table).err();
        assert!(matches!(err, Some(CliError::Validation(_))));
        Ok(())
    }

    #[test]
    fn plan_rejects_unknown_document_fields() -> Result<()> {
        let dir = tempdir()?;
        let config = dir.path().join("copy.yaml");
        fs::write(
            &config,
            "name: copy-dash\ntarget_spaces: [a]\nobject: [{id: x, type: dashboard}]\nspaces: [b]\n",
        )?;
        let store = StateStore::new(dir.path().join("state.json"));

        let err = handle_plan(&store, &config, OutputFormat::Table).err();
        assert!(matches!(err, Some(CliError::Validation(_))));
        Ok(())
    }
}
