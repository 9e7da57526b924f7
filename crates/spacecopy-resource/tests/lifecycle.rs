//! End-to-end lifecycle of a copy resource against a recording client.

use anyhow::{Result, anyhow};
use spacecopy_config::{DesiredCopy, ForceUpdate};
use spacecopy_resource::{CopyAdapter, Plan, ResourceError, ResourceState, plan};
use spacecopy_test_support::fixtures::{copy_dash, copy_request};
use spacecopy_test_support::mocks::RecordingSpacesApi;

fn declarations() -> Vec<DesiredCopy> {
    let mut marketing = copy_request(
        "marketing-dashboards",
        &["emea", "apac"],
        &[("abc123", "dashboard"), ("v1", "visualization")],
    );
    marketing.source_space = "marketing".into();
    marketing.overwrite = true;
    marketing.create_new_copies = false;

    vec![
        copy_dash(),
        DesiredCopy {
            request: marketing,
            force_update: ForceUpdate::armed(),
        },
        DesiredCopy {
            request: copy_request("index-pattern", &["a", "b"], &[("logs-*", "index-pattern")]),
            force_update: ForceUpdate::cleared(),
        },
    ]
}

#[tokio::test]
async fn copy_dash_scenario_posts_expected_body() -> Result<()> {
    let api = RecordingSpacesApi::new();
    let adapter = CopyAdapter::new(api.clone());

    let state = adapter.create(&copy_dash()).await?;

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].source_space, "default");
    assert_eq!(calls[0].params.spaces, vec!["staging".to_string()]);
    assert_eq!(calls[0].params.objects.len(), 1);
    assert_eq!(calls[0].params.objects[0].id, "abc123");
    assert_eq!(calls[0].params.objects[0].object_type, "dashboard");
    assert!(calls[0].params.include_references);
    assert!(!calls[0].params.overwrite);
    assert!(calls[0].params.create_new_copies);
    assert_eq!(
        state.tracking.id().map(ToString::to_string).as_deref(),
        Some("copy-dash")
    );
    Ok(())
}

#[tokio::test]
async fn created_state_reads_back_unchanged() -> Result<()> {
    for desired in declarations() {
        let api = RecordingSpacesApi::new();
        let adapter = CopyAdapter::new(api.clone());

        let created = adapter.create(&desired).await?;
        let read = adapter.read(&created)?;

        assert_eq!(read, created);
        assert_eq!(read.request, desired.request);
        assert!(!read.force_update.is_armed());
        assert_eq!(plan(Some(&read), &desired_without_trigger(&desired)), Plan::NoOp);
        assert_eq!(api.call_count(), 1);
    }
    Ok(())
}

#[tokio::test]
async fn delete_never_calls_kibana() -> Result<()> {
    for desired in declarations() {
        let api = RecordingSpacesApi::new();
        let adapter = CopyAdapter::new(api.clone());
        let created = adapter.create(&desired).await?;

        let deleted = adapter.delete(created);

        assert!(!deleted.is_tracked());
        assert_eq!(api.call_count(), 1);
        assert!(matches!(adapter.read(&deleted), Err(ResourceError::NotTracked)));
    }
    Ok(())
}

#[tokio::test]
async fn every_update_issues_exactly_one_copy() -> Result<()> {
    for desired in declarations() {
        let api = RecordingSpacesApi::new();
        let adapter = CopyAdapter::new(api.clone());
        let created = adapter.create(&desired).await?;

        let updated = adapter.update(&created, &desired).await?;
        let again = adapter.update(&updated, &desired).await?;

        assert_eq!(api.call_count(), 3);
        assert_eq!(again, created);
    }
    Ok(())
}

#[tokio::test]
async fn failed_copy_leaves_nothing_tracked() -> Result<()> {
    let api = RecordingSpacesApi::new();
    api.fail_with(401, "unauthorized");
    let adapter = CopyAdapter::new(api.clone());

    let applied = adapter.apply(None, &copy_dash()).await;

    let err = applied.err().ok_or_else(|| anyhow!("expected failure"))?;
    assert_eq!(err.to_string(), "Kibana returned 401 Unauthorized: unauthorized");
    assert_eq!(api.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn target_spaces_compare_as_sets() -> Result<()> {
    let api = RecordingSpacesApi::new();
    let adapter = CopyAdapter::new(api.clone());
    let first = DesiredCopy {
        request: copy_request("multi", &["a", "b"], &[("abc123", "dashboard")]),
        force_update: ForceUpdate::cleared(),
    };
    let reordered = DesiredCopy {
        request: copy_request("multi", &["b", "a"], &[("abc123", "dashboard")]),
        force_update: ForceUpdate::cleared(),
    };

    let created = adapter.apply(None, &first).await?;
    let reapplied = adapter.apply(Some(&created.state), &reordered).await?;

    assert_eq!(reapplied.plan, Plan::NoOp);
    assert_eq!(api.call_count(), 1);
    assert_eq!(
        reapplied.state.request.target_spaces.iter().collect::<Vec<_>>(),
        vec!["a", "b"]
    );
    Ok(())
}

#[tokio::test]
async fn force_trigger_fires_once() -> Result<()> {
    let api = RecordingSpacesApi::new();
    let adapter = CopyAdapter::new(api.clone());
    let created = adapter.apply(None, &copy_dash()).await?.state;

    let mut forced = copy_dash();
    forced.force_update = ForceUpdate::armed();
    let first = adapter.apply(Some(&created), &forced).await?;
    assert_eq!(first.plan, Plan::Update { forced: true });
    assert!(!first.state.force_update.is_armed());

    let settled = adapter.apply(Some(&first.state), &copy_dash()).await?;
    assert_eq!(settled.plan, Plan::NoOp);
    assert_eq!(api.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn stored_state_survives_json_round_trip() -> Result<()> {
    let api = RecordingSpacesApi::new();
    let adapter = CopyAdapter::new(api.clone());
    let created = adapter.create(&copy_dash()).await?;

    let stored = serde_json::to_string(&created)?;
    let restored: ResourceState = serde_json::from_str(&stored)?;

    assert_eq!(plan(Some(&restored), &copy_dash()), Plan::NoOp);
    Ok(())
}

fn desired_without_trigger(desired: &DesiredCopy) -> DesiredCopy {
    DesiredCopy {
        request: desired.request.clone(),
        force_update: ForceUpdate::cleared(),
    }
}
