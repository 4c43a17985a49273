//! Two-phase reconciliation — plan computes, apply persists.
//!
//! `plan` runs the engine transition exactly once per reconciliation and
//! returns the fully computed result; `apply` persists it verbatim and
//! never recomputes, preserving determinism between the two phases.
//!
//! Immutable-field changes (`step`, `initial_value`, `*_initial_value`)
//! force replacement: the transition is re-run with no prior state and the
//! instance gets a fresh identifier at apply time.

use counters_engine::domain::{
    CounterDiff, TransitionResult, VersionDiff,
};
use counters_engine::invariants::{validate_counter_state, validate_version_state};
use counters_engine::transitions::{counter_transition, version_transition};

use crate::error::ProviderError;
use crate::lifecycle::{self, Diagnostic, Diagnostics, IdSource};
use crate::record::{DeclaredConfig, ResourceRecord, ResourceState};
use crate::store::RecordStore;

/// What the apply phase must do with the planned state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Create,
    Update,
    Replace,
    NoOp,
}

/// A fully computed reconciliation plan.
#[derive(Debug, Clone)]
pub struct Plan {
    pub action: PlanAction,
    pub new_state: ResourceState,
    pub result: TransitionResult,
    pub diagnostics: Diagnostics,
}

/// Compute the plan for one resource instance.
pub fn plan(
    address: &str,
    prior: Option<&ResourceRecord>,
    declared: &DeclaredConfig,
) -> Result<Plan, ProviderError> {
    let mut diagnostics = Vec::new();

    match declared {
        DeclaredConfig::Counter(config) => {
            let prior_state = match prior {
                None => None,
                Some(record) => match &record.state {
                    ResourceState::Counter(s) => Some(s),
                    other => {
                        return Err(ProviderError::KindMismatch {
                            address: address.to_string(),
                            stored: other.type_name(),
                            declared: declared.kind().type_name(),
                        })
                    }
                },
            };

            if config.max_history < 1 {
                diagnostics.push(Diagnostic::warning(format!(
                    "max_history {} clamped to 1: a resource always retains \
                     its current value",
                    config.max_history
                )));
            }

            let replacing = prior_state.is_some_and(|s| {
                s.step != config.step || s.initial_value != config.initial_value
            });
            let effective_prior = if replacing { None } else { prior_state };

            let diff = CounterDiff {
                triggers_changed: effective_prior
                    .is_some_and(|s| s.triggers != config.triggers),
            };
            let (new_state, result) = counter_transition(effective_prior, config, &diff);
            validate_counter_state(&new_state);

            Ok(Plan {
                action: action_for(replacing, &result),
                new_state: ResourceState::Counter(new_state),
                result,
                diagnostics,
            })
        }

        DeclaredConfig::Version(config) => {
            let prior_state = match prior {
                None => None,
                Some(record) => match &record.state {
                    ResourceState::Version(s) => Some(s),
                    other => {
                        return Err(ProviderError::KindMismatch {
                            address: address.to_string(),
                            stored: other.type_name(),
                            declared: declared.kind().type_name(),
                        })
                    }
                },
            };

            if config.max_history < 1 {
                diagnostics.push(Diagnostic::warning(format!(
                    "max_history {} clamped to 1: a resource always retains \
                     its current value",
                    config.max_history
                )));
            }

            let replacing = prior_state.is_some_and(|s| {
                s.major_initial_value != config.major_initial_value
                    || s.minor_initial_value != config.minor_initial_value
                    || s.patch_initial_value != config.patch_initial_value
            });
            let effective_prior = if replacing { None } else { prior_state };

            let diff = VersionDiff {
                major_triggers_changed: effective_prior
                    .is_some_and(|s| s.major_triggers != config.major_triggers),
                minor_triggers_changed: effective_prior
                    .is_some_and(|s| s.minor_triggers != config.minor_triggers),
                patch_triggers_changed: effective_prior
                    .is_some_and(|s| s.patch_triggers != config.patch_triggers),
            };
            let (new_state, result) = version_transition(effective_prior, config, &diff);
            validate_version_state(&new_state);

            Ok(Plan {
                action: action_for(replacing, &result),
                new_state: ResourceState::Version(new_state),
                result,
                diagnostics,
            })
        }
    }
}

fn action_for(replacing: bool, result: &TransitionResult) -> PlanAction {
    use counters_engine::domain::TransitionOutcome;
    if replacing {
        return PlanAction::Replace;
    }
    match result.outcome {
        TransitionOutcome::Initialize => PlanAction::Create,
        TransitionOutcome::Advance => PlanAction::Update,
        TransitionOutcome::Hold => PlanAction::NoOp,
    }
}

/// Persist an already-computed plan. Never recomputes the transition.
pub fn apply(
    store: &mut RecordStore,
    address: &str,
    plan: &Plan,
    ids: &mut dyn IdSource,
) -> Diagnostics {
    match plan.action {
        PlanAction::NoOp => lifecycle::generic_read(),
        PlanAction::Create | PlanAction::Replace => {
            let (id, diagnostics) = lifecycle::generic_create(ids);
            store.put(
                address,
                ResourceRecord {
                    id,
                    state: plan.new_state.clone(),
                },
            );
            diagnostics
        }
        PlanAction::Update => {
            let id = store
                .get(address)
                .expect("update requires a prior record")
                .id
                .clone();
            store.put(
                address,
                ResourceRecord {
                    id,
                    state: plan.new_state.clone(),
                },
            );
            lifecycle::generic_update()
        }
    }
}

/// Remove a resource declaration: release the record, nothing external to
/// clean up.
pub fn destroy(store: &mut RecordStore, address: &str) -> Diagnostics {
    store.remove(address);
    lifecycle::generic_delete()
}
