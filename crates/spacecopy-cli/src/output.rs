//! Output renderers for CLI commands.

use anyhow::anyhow;
use serde::Serialize;
use spacecopy_config::CopyRequest;
use spacecopy_resource::{Plan, ResourceState, TrackingId};

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

#[derive(Serialize)]
struct PlanView<'a> {
    plan: &'static str,
    copies: bool,
    tracked: Option<&'a str>,
    request: &'a CopyRequest,
}

pub(crate) fn render_plan(
    planned: Plan,
    prior: Option<&ResourceState>,
    request: &CopyRequest,
    format: OutputFormat,
) -> CliResult<String> {
    let tracked = prior.and_then(|state| state.tracking.id()).map(TrackingId::as_str);
    match format {
        OutputFormat::Json => to_json(&PlanView {
            plan: planned.as_str(),
            copies: planned.copies(),
            tracked,
            request,
        }),
        OutputFormat::Table => {
            let mut lines = vec![format!("plan: {}", planned.as_str())];
            if let Some(id) = tracked {
                lines.push(format!("tracked: {id}"));
            }
            lines.extend(request_lines(request));
            if !planned.copies() {
                lines.push("no copy will be issued".to_string());
            }
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn render_applied(
    planned: Plan,
    state: &ResourceState,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "plan": planned.as_str(),
            "state": state,
        })),
        OutputFormat::Table => Ok(format!(
            "applied: {}\n{}",
            planned.as_str(),
            state_lines(state).join("\n")
        )),
    }
}

pub(crate) fn render_state(
    state: Option<&ResourceState>,
    format: OutputFormat,
) -> CliResult<String> {
    match (format, state) {
        (OutputFormat::Json, state) => to_json(&state),
        (OutputFormat::Table, None) => Ok("nothing tracked".to_string()),
        (OutputFormat::Table, Some(state)) => Ok(state_lines(state).join("\n")),
    }
}

fn state_lines(state: &ResourceState) -> Vec<String> {
    let id = state.tracking.id().map_or("<none>", TrackingId::as_str);
    let mut lines = vec![format!("id: {id}")];
    lines.extend(request_lines(&state.request));
    lines
}

fn request_lines(request: &CopyRequest) -> Vec<String> {
    let targets = request
        .target_spaces
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let objects = request
        .objects
        .iter()
        .map(|object| format!("{}/{}", object.object_type, object.id))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        format!("name: {}", request.name),
        format!("source space: {}", request.source_space),
        format!("target spaces: {targets}"),
        format!("objects: {objects}"),
        format!("include references: {}", request.include_references),
        format!("overwrite: {}", request.overwrite),
        format!("create new copies: {}", request.create_new_copies),
    ]
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::{Value, json};
    use spacecopy_test_support::fixtures::copy_dash;

    fn rendered(result: CliResult<String>) -> Result<String> {
        result.map_err(|err| anyhow!(err.display_message()))
    }

    #[test]
    fn plan_table_lists_request() -> Result<()> {
        let text = rendered(render_plan(
            Plan::Create,
            None,
            &copy_dash().request,
            OutputFormat::Table,
        ))?;
        assert!(text.starts_with("plan: create\n"));
        assert!(text.contains("target spaces: staging"));
        assert!(text.contains("objects: dashboard/abc123"));
        assert!(!text.contains("tracked:"));
        Ok(())
    }

    #[test]
    fn no_op_plan_says_so() -> Result<()> {
        let state = ResourceState::tracked(copy_dash().request);
        let text = rendered(render_plan(
            Plan::NoOp,
            Some(&state),
            &state.request,
            OutputFormat::Table,
        ))?;
        assert!(text.contains("tracked: copy-dash"));
        assert!(text.ends_with("no copy will be issued"));
        Ok(())
    }

    #[test]
    fn plan_json_carries_label_and_request() -> Result<()> {
        let text = rendered(render_plan(
            Plan::Update { forced: true },
            None,
            &copy_dash().request,
            OutputFormat::Json,
        ))?;
        let value: Value = serde_json::from_str(&text)?;
        assert_eq!(value["plan"], json!("forced-update"));
        assert_eq!(value["copies"], json!(true));
        assert_eq!(value["tracked"], Value::Null);
        assert_eq!(value["request"]["target_spaces"], json!(["staging"]));
        Ok(())
    }

    #[test]
    fn state_renders_in_both_formats() -> Result<()> {
        let state = ResourceState::tracked(copy_dash().request);

        let table = rendered(render_state(Some(&state), OutputFormat::Table))?;
        assert!(table.starts_with("id: copy-dash\n"));
        assert_eq!(rendered(render_state(None, OutputFormat::Table))?, "nothing tracked");

        let value: Value = serde_json::from_str(&rendered(render_state(
            Some(&state),
            OutputFormat::Json,
        ))?)?;
        assert_eq!(value["id"], json!("copy-dash"));
        assert_eq!(rendered(render_state(None, OutputFormat::Json))?, "null");

        let applied = rendered(render_applied(Plan::Replace, &state, OutputFormat::Table))?;
        assert!(applied.starts_with("applied: replace\nid: copy-dash"));
        Ok(())
    }
}
