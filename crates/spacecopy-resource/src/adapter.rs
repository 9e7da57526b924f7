//! Lifecycle operations of the saved-object copy resource.
//!
//! # Design
//! - `create` and `update` issue exactly one copy call, then delegate to `read`.
//! - `read` never talks to Kibana; it normalizes the stored state and clears
//!   the force trigger.
//! - `delete` only drops tracking since Kibana cannot undo a copy.

use spacecopy_client::{CopySavedObjectsParams, SpacesApi};
use spacecopy_config::{CopyRequest, DesiredCopy, ForceUpdate};

use crate::error::{ResourceError, ResourceResult};
use crate::events::{CopyEvent, EventSink, Operation, TracingSink};
use crate::plan::{Plan, plan_tracked};
use crate::state::{ResourceState, Tracking};

/// Outcome of [`CopyAdapter::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Plan that was carried out.
    pub plan: Plan,
    /// Resulting state for the orchestrator to persist.
    pub state: ResourceState,
}

/// Adapter driving one copy resource against a [`SpacesApi`].
pub struct CopyAdapter<C, S = TracingSink> {
    client: C,
    events: S,
}

impl<C: SpacesApi> CopyAdapter<C> {
    /// Adapter that reports lifecycle events through `tracing`.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self {
            client,
            events: TracingSink,
        }
    }
}

impl CopyAdapter<()> {
    /// Adapter for the local operations only (`read` and `delete`).
    ///
    /// It carries no client, so it needs no connection settings and cannot copy.
    #[must_use]
    pub const fn local() -> Self {
        Self {
            client: (),
            events: TracingSink,
        }
    }
}

impl<C, S: EventSink> CopyAdapter<C, S> {
    /// Adapter that reports lifecycle events to `events`.
    #[must_use]
    pub const fn with_events(client: C, events: S) -> Self {
        Self { client, events }
    }

    /// Normalize stored state without contacting Kibana.
    ///
    /// `name` is rewritten from the tracking identifier and the force trigger
    /// is cleared, so a follow-up plan is a no-op unless the declaration changes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotTracked`] for an absent state.
    pub fn read(&self, state: &ResourceState) -> ResourceResult<ResourceState> {
        let id = state.tracking.id().ok_or(ResourceError::NotTracked)?;

        let mut normalized = state.clone();
        normalized.request.name = id.as_str().to_string();
        let cleared_force_update = normalized.force_update.take();

        self.events.record(&CopyEvent::StateRead {
            id: id.to_string(),
            cleared_force_update,
        });
        Ok(normalized)
    }

    /// Stop tracking the resource. Nothing is removed from Kibana.
    #[must_use]
    pub fn delete(&self, state: ResourceState) -> ResourceState {
        let id = state
            .tracking
            .id()
            .map(ToString::to_string)
            .unwrap_or_default();
        self.events.record(&CopyEvent::Untracked { id });

        ResourceState {
            tracking: Tracking::Absent,
            force_update: ForceUpdate::cleared(),
            ..state
        }
    }
}

impl<C: SpacesApi, S: EventSink> CopyAdapter<C, S> {
    /// Copy the declared objects and start tracking the resource under its name.
    ///
    /// # Errors
    ///
    /// Returns the client error unchanged when the copy fails; no state is
    /// produced in that case.
    pub async fn create(&self, desired: &DesiredCopy) -> ResourceResult<ResourceState> {
        self.copy(Operation::Create, &desired.request, false).await?;

        let mut state = ResourceState::tracked(desired.request.clone());
        state.force_update = desired.force_update;
        self.read(&state)
    }

    /// Copy again with the declared parameters, then re-read.
    ///
    /// Every call issues a copy, even when nothing changed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotTracked`] for an absent state,
    /// [`ResourceError::ImmutableName`] when the declaration renames the
    /// resource, or the client error when the copy fails.
    pub async fn update(
        &self,
        state: &ResourceState,
        desired: &DesiredCopy,
    ) -> ResourceResult<ResourceState> {
        let id = state.tracking.id().ok_or(ResourceError::NotTracked)?;
        if id.as_str() != desired.request.name {
            return Err(ResourceError::ImmutableName {
                tracked: id.to_string(),
                declared: desired.request.name.clone(),
            });
        }

        let mut trigger = desired.force_update;
        let forced = trigger.take();
        self.copy(Operation::Update, &desired.request, forced).await?;

        let next = ResourceState {
            tracking: state.tracking.clone(),
            request: desired.request.clone(),
            force_update: trigger,
        };
        self.read(&next)
    }

    /// Plan against `prior` and carry the plan out.
    ///
    /// A rename replaces the resource: the old copy is untracked (it stays in
    /// Kibana) and the new declaration is created.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`Self::create`], [`Self::update`] and [`Self::read`].
    pub async fn apply(
        &self,
        prior: Option<&ResourceState>,
        desired: &DesiredCopy,
    ) -> ResourceResult<Applied> {
        let Some(prior) = prior.filter(|state| state.is_tracked()) else {
            let state = self.create(desired).await?;
            return Ok(Applied {
                plan: Plan::Create,
                state,
            });
        };

        let plan = plan_tracked(prior, desired);
        let state = match plan {
            Plan::Create => self.create(desired).await?,
            Plan::Update { .. } => self.update(prior, desired).await?,
            Plan::Replace => {
                let _untracked = self.delete(prior.clone());
                self.create(desired).await?
            }
            Plan::NoOp => self.read(prior)?,
        };
        Ok(Applied { plan, state })
    }

    async fn copy(
        &self,
        operation: Operation,
        request: &CopyRequest,
        forced: bool,
    ) -> ResourceResult<()> {
        self.events.record(&CopyEvent::CopyRequested {
            operation,
            request: request.clone(),
        });

        let params = CopySavedObjectsParams::from(request);
        match self
            .client
            .copy_saved_objects(&params, &request.source_space)
            .await
        {
            Ok(()) => {
                self.events.record(&CopyEvent::Copied {
                    operation,
                    name: request.name.clone(),
                    forced,
                });
                Ok(())
            }
            Err(err) => {
                self.events.record(&CopyEvent::CopyFailed {
                    operation,
                    name: request.name.clone(),
                    error: err.to_string(),
                });
                Err(err.into())
            }
        }
    }
}
