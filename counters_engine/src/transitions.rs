//! Centralized transition logic.
//!
//! ALL state mutation lives here. Transitions are pure: the prior state is
//! never mutated, a new state is returned alongside an audit result.
//! Evaluated at plan time — the apply phase persists the result verbatim.

use crate::domain::{
    format_version, CounterConfig, CounterDiff, CounterSnapshot, CounterState,
    TransitionOutcome, TransitionResult, VersionConfig, VersionDiff, VersionLevel,
    VersionSnapshot, VersionState,
};
use crate::history::append_and_truncate;
use crate::state::{initial_counter_state, initial_version_state};

/// Reconcile a monotonic counter instance.
///
/// Exactly one transition fires:
///   - Initialize: no prior state exists
///   - Advance: prior exists and the trigger set changed
///   - Hold: prior exists, triggers unchanged — no mutation
pub fn counter_transition(
    prior: Option<&CounterState>,
    config: &CounterConfig,
    diff: &CounterDiff,
) -> (CounterState, TransitionResult) {
    let prior = match prior {
        None => {
            let state = initial_counter_state(config);
            let result = TransitionResult {
                outcome: TransitionOutcome::Initialize,
                bumped_level: None,
                dropped_snapshots: 0,
            };
            return (state, result);
        }
        Some(p) => p,
    };

    guard_counter_immutables(prior, config);

    if !diff.triggers_changed {
        // The declared capacity takes effect at the next advance, not here.
        return (prior.clone(), TransitionResult::held());
    }

    let value = checked_add(prior.value, prior.step);
    let max = config.max_history.max(1);
    let snapshot = CounterSnapshot {
        value,
        triggers: config.triggers.clone(),
    };
    let history = append_and_truncate(&prior.history, snapshot, max);
    let dropped = prior.history.len() + 1 - history.len();

    let state = CounterState {
        value,
        step: prior.step,
        initial_value: prior.initial_value,
        triggers: config.triggers.clone(),
        history,
        max_history: max,
    };
    let result = TransitionResult {
        outcome: TransitionOutcome::Advance,
        bumped_level: None,
        dropped_snapshots: dropped,
    };
    (state, result)
}

/// Reconcile a semantic version instance.
///
/// On advance, trigger changes are evaluated in strict precedence order
/// major → minor → patch; the first changed set wins and suppresses
/// simultaneous lower-level changes for this pass. A higher-level bump
/// resets all lower levels to zero.
pub fn version_transition(
    prior: Option<&VersionState>,
    config: &VersionConfig,
    diff: &VersionDiff,
) -> (VersionState, TransitionResult) {
    let prior = match prior {
        None => {
            let state = initial_version_state(config);
            let result = TransitionResult {
                outcome: TransitionOutcome::Initialize,
                bumped_level: None,
                dropped_snapshots: 0,
            };
            return (state, result);
        }
        Some(p) => p,
    };

    guard_version_immutables(prior, config);

    let level = if diff.major_triggers_changed {
        Some(VersionLevel::Major)
    } else if diff.minor_triggers_changed {
        Some(VersionLevel::Minor)
    } else if diff.patch_triggers_changed {
        Some(VersionLevel::Patch)
    } else {
        None
    };

    let level = match level {
        None => return (prior.clone(), TransitionResult::held()),
        Some(l) => l,
    };

    let (major, minor, patch) = match level {
        VersionLevel::Major => (checked_bump(prior.major_value), 0, 0),
        VersionLevel::Minor => (prior.major_value, checked_bump(prior.minor_value), 0),
        VersionLevel::Patch => (
            prior.major_value,
            prior.minor_value,
            checked_bump(prior.patch_value),
        ),
    };
    let value = format_version(major, minor, patch);

    // The snapshot records the *current* declared trigger sets, not the
    // historical ones.
    let snapshot = VersionSnapshot {
        value: value.clone(),
        major_value: major,
        minor_value: minor,
        patch_value: patch,
        major_triggers: config.major_triggers.clone(),
        minor_triggers: config.minor_triggers.clone(),
        patch_triggers: config.patch_triggers.clone(),
    };
    let max = config.max_history.max(1);
    let history = append_and_truncate(&prior.history, snapshot, max);
    let dropped = prior.history.len() + 1 - history.len();

    let state = VersionState {
        value,
        major_value: major,
        minor_value: minor,
        patch_value: patch,
        major_initial_value: prior.major_initial_value,
        minor_initial_value: prior.minor_initial_value,
        patch_initial_value: prior.patch_initial_value,
        major_triggers: config.major_triggers.clone(),
        minor_triggers: config.minor_triggers.clone(),
        patch_triggers: config.patch_triggers.clone(),
        history,
        max_history: max,
    };
    let result = TransitionResult {
        outcome: TransitionOutcome::Advance,
        bumped_level: Some(level),
        dropped_snapshots: dropped,
    };
    (state, result)
}

// ---------------------------------------------------------------------------
// Guards and arithmetic (private)
// ---------------------------------------------------------------------------

/// Immutable fields must never reach the transition changed — the host
/// plans a replacement instead. A mismatch here is a contract violation.
fn guard_counter_immutables(prior: &CounterState, config: &CounterConfig) {
    if config.step != prior.step {
        panic!(
            "Immutable field changed in place: step {} -> {} (replacement required)",
            prior.step, config.step
        );
    }
    if config.initial_value != prior.initial_value {
        panic!(
            "Immutable field changed in place: initial_value {} -> {} (replacement required)",
            prior.initial_value, config.initial_value
        );
    }
}

fn guard_version_immutables(prior: &VersionState, config: &VersionConfig) {
    let pairs = [
        ("major_initial_value", prior.major_initial_value, config.major_initial_value),
        ("minor_initial_value", prior.minor_initial_value, config.minor_initial_value),
        ("patch_initial_value", prior.patch_initial_value, config.patch_initial_value),
    ];
    for (name, old, new) in pairs {
        if old != new {
            panic!(
                "Immutable field changed in place: {} {} -> {} (replacement required)",
                name, old, new
            );
        }
    }
}

/// Checked signed addition. Panics on i64 overflow.
fn checked_add(a: i64, b: i64) -> i64 {
    match a.checked_add(b) {
        Some(result) => result,
        None => panic!("Overflow: {} + {} overflows i64", a, b),
    }
}

/// Checked increment for version components. Panics on u64 overflow.
fn checked_bump(v: u64) -> u64 {
    match v.checked_add(1) {
        Some(result) => result,
        None => panic!("Overflow: version component {} + 1 overflows u64", v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TriggerSet;

    fn triggers(pairs: &[(&str, &str)]) -> TriggerSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_counter_initialize_seeds_history() {
        let config = CounterConfig {
            initial_value: 35,
            triggers: triggers(&[("hash", "potatoes")]),
            ..Default::default()
        };
        let (state, result) = counter_transition(None, &config, &CounterDiff::default());
        assert_eq!(result.outcome, TransitionOutcome::Initialize);
        assert_eq!(state.value, 35);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].value, 35);
        assert_eq!(state.history[0].triggers, config.triggers);
    }

    #[test]
    fn test_counter_hold_is_pure_clone() {
        let config = CounterConfig::default();
        let (state, _) = counter_transition(None, &config, &CounterDiff::default());
        let (held, result) = counter_transition(
            Some(&state),
            &config,
            &CounterDiff { triggers_changed: false },
        );
        assert_eq!(result.outcome, TransitionOutcome::Hold);
        assert_eq!(held, state);
    }

    #[test]
    #[should_panic(expected = "Immutable field changed")]
    fn test_counter_step_change_is_contract_violation() {
        let config = CounterConfig::default();
        let (state, _) = counter_transition(None, &config, &CounterDiff::default());
        let changed = CounterConfig { step: 5, ..config };
        counter_transition(Some(&state), &changed, &CounterDiff::default());
    }

    #[test]
    #[should_panic(expected = "Overflow")]
    fn test_counter_advance_overflow_is_hard_fault() {
        let config = CounterConfig {
            initial_value: i64::MAX,
            ..Default::default()
        };
        let (state, _) = counter_transition(None, &config, &CounterDiff::default());
        let next = CounterConfig {
            triggers: triggers(&[("hash", "eggs")]),
            ..config
        };
        counter_transition(Some(&state), &next, &CounterDiff { triggers_changed: true });
    }

    #[test]
    fn test_version_major_suppresses_minor_and_patch() {
        let config = VersionConfig::default();
        let (state, _) = version_transition(None, &config, &VersionDiff::default());
        let diff = VersionDiff {
            major_triggers_changed: true,
            minor_triggers_changed: true,
            patch_triggers_changed: true,
        };
        let (next, result) = version_transition(Some(&state), &config, &diff);
        assert_eq!(result.bumped_level, Some(VersionLevel::Major));
        assert_eq!((next.major_value, next.minor_value, next.patch_value), (2, 0, 0));
        assert_eq!(next.value, "2.0.0");
    }

    #[test]
    #[should_panic(expected = "Immutable field changed")]
    fn test_version_initial_value_change_is_contract_violation() {
        let config = VersionConfig::default();
        let (state, _) = version_transition(None, &config, &VersionDiff::default());
        let changed = VersionConfig {
            major_initial_value: 2,
            ..config
        };
        version_transition(Some(&state), &changed, &VersionDiff::default());
    }
}
