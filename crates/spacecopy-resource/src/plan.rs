//! Change detection between stored state and a declaration.

use spacecopy_config::DesiredCopy;

use crate::state::ResourceState;

/// What applying a declaration will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Nothing tracked yet: copy and start tracking.
    Create,
    /// Tracked and changed (or forced): copy again.
    Update {
        /// The force trigger, not a field change, caused the update.
        forced: bool,
    },
    /// The name changed: stop tracking the old copy and create a new one.
    Replace,
    /// Tracked and unchanged: only normalize state.
    NoOp,
}

impl Plan {
    /// Stable label for output and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update { forced: false } => "update",
            Self::Update { forced: true } => "forced-update",
            Self::Replace => "replace",
            Self::NoOp => "no-op",
        }
    }

    /// Whether applying the plan issues a copy call.
    #[must_use]
    pub const fn copies(self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

/// Decide how `desired` relates to `prior`.
///
/// Target spaces and objects compare as sets. An armed force trigger turns an
/// otherwise unchanged declaration into an update.
#[must_use]
pub fn plan(prior: Option<&ResourceState>, desired: &DesiredCopy) -> Plan {
    match prior.filter(|state| state.is_tracked()) {
        None => Plan::Create,
        Some(prior) => plan_tracked(prior, desired),
    }
}

pub(crate) fn plan_tracked(prior: &ResourceState, desired: &DesiredCopy) -> Plan {
    let tracked_name = prior
        .tracking
        .id()
        .map_or(prior.request.name.as_str(), |id| id.as_str());
    if tracked_name != desired.request.name {
        return Plan::Replace;
    }
    if desired.force_update.is_armed() {
        return Plan::Update { forced: true };
    }
    if prior.request.same_parameters(&desired.request) {
        Plan::NoOp
    } else {
        Plan::Update { forced: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacecopy_config::{ForceUpdate, SavedObjectRef};
    use spacecopy_test_support::fixtures::copy_dash;

    fn tracked() -> ResourceState {
        ResourceState::tracked(copy_dash().request)
    }

    #[test]
    fn untracked_prior_plans_create() {
        assert_eq!(plan(None, &copy_dash()), Plan::Create);

        let mut absent = tracked();
        absent.tracking = crate::state::Tracking::Absent;
        assert_eq!(plan(Some(&absent), &copy_dash()), Plan::Create);
    }

    #[test]
    fn unchanged_declaration_is_a_no_op() {
        let planned = plan(Some(&tracked()), &copy_dash());
        assert_eq!(planned, Plan::NoOp);
        assert!(!planned.copies());
    }

    #[test]
    fn armed_trigger_forces_update() {
        let mut desired = copy_dash();
        desired.force_update = ForceUpdate::armed();
        let planned = plan(Some(&tracked()), &desired);
        assert_eq!(planned, Plan::Update { forced: true });
        assert_eq!(planned.as_str(), "forced-update");
    }

    #[test]
    fn field_changes_plan_update() {
        let mut desired = copy_dash();
        desired.request.target_spaces.insert("qa".into());
        assert_eq!(plan(Some(&tracked()), &desired), Plan::Update { forced: false });

        let mut desired = copy_dash();
        desired
            .request
            .objects
            .push(SavedObjectRef::new("def456", "visualization"));
        assert_eq!(plan(Some(&tracked()), &desired), Plan::Update { forced: false });

        let mut desired = copy_dash();
        desired.request.source_space = "marketing".into();
        assert_eq!(plan(Some(&tracked()), &desired), Plan::Update { forced: false });
    }

    #[test]
    fn renamed_declaration_plans_replace() {
        let mut desired = copy_dash();
        desired.request.name = "copy-dash-v2".into();
        desired.force_update = ForceUpdate::armed();
        assert_eq!(plan(Some(&tracked()), &desired), Plan::Replace);
    }
}
