//! Invariant checks — hard-fail validation of transition output.
//!
//! The panicking variants run after every plan-time transition; the
//! non-panicking `try_` variants are used when re-reading persisted
//! records, where a violation means the stored state was corrupted by
//! the host rather than computed here.

use crate::domain::{format_version, CounterState, VersionState};

/// Validate a monotonic counter state. Panics on the first violation.
pub fn validate_counter_state(state: &CounterState) {
    if let Err(msg) = try_validate_counter_state(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Non-panicking variant of `validate_counter_state`.
pub fn try_validate_counter_state(state: &CounterState) -> Result<(), String> {
    if state.max_history < 1 {
        return Err(format!(
            "[INVARIANT:history_capacity] max_history={} — must be at least 1",
            state.max_history
        ));
    }
    if state.history.is_empty() {
        return Err(
            "[INVARIANT:history_nonempty] counter history is empty — a resource \
             always retains its current value"
                .to_string(),
        );
    }
    if state.history.len() > state.max_history {
        return Err(format!(
            "[INVARIANT:history_bound] history length {} exceeds max_history {}",
            state.history.len(),
            state.max_history
        ));
    }
    let last = state.history.last().expect("history checked non-empty");
    if last.value != state.value || last.triggers != state.triggers {
        return Err(format!(
            "[INVARIANT:history_head] last history entry (value={}) does not match \
             current state (value={})",
            last.value, state.value
        ));
    }
    Ok(())
}

/// Validate a semantic version state. Panics on the first violation.
pub fn validate_version_state(state: &VersionState) {
    if let Err(msg) = try_validate_version_state(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Non-panicking variant of `validate_version_state`.
pub fn try_validate_version_state(state: &VersionState) -> Result<(), String> {
    if state.max_history < 1 {
        return Err(format!(
            "[INVARIANT:history_capacity] max_history={} — must be at least 1",
            state.max_history
        ));
    }
    if state.history.is_empty() {
        return Err(
            "[INVARIANT:history_nonempty] version history is empty — a resource \
             always retains its current value"
                .to_string(),
        );
    }
    if state.history.len() > state.max_history {
        return Err(format!(
            "[INVARIANT:history_bound] history length {} exceeds max_history {}",
            state.history.len(),
            state.max_history
        ));
    }

    let rendered = format_version(state.major_value, state.minor_value, state.patch_value);
    if state.value != rendered {
        return Err(format!(
            "[INVARIANT:version_string] value {:?} is not the rendering of the \
             current triple ({:?})",
            state.value, rendered
        ));
    }

    let last = state.history.last().expect("history checked non-empty");
    let head_matches = last.value == state.value
        && last.major_value == state.major_value
        && last.minor_value == state.minor_value
        && last.patch_value == state.patch_value
        && last.major_triggers == state.major_triggers
        && last.minor_triggers == state.minor_triggers
        && last.patch_triggers == state.patch_triggers;
    if !head_matches {
        return Err(format!(
            "[INVARIANT:history_head] last history entry ({:?}) does not match \
             current state ({:?})",
            last.value, state.value
        ));
    }
    Ok(())
}
