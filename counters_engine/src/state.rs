//! Initial state construction.
//!
//! Seeds a fresh state from declared configuration. The first history
//! snapshot records whatever triggers were declared at creation time,
//! not empty trigger sets.

use crate::domain::{
    format_version, CounterConfig, CounterSnapshot, CounterState, VersionConfig,
    VersionSnapshot, VersionState,
};

/// Create a fresh monotonic counter state: `value` from `initial_value`,
/// history seeded with a single snapshot.
pub fn initial_counter_state(config: &CounterConfig) -> CounterState {
    let snapshot = CounterSnapshot {
        value: config.initial_value,
        triggers: config.triggers.clone(),
    };
    CounterState {
        value: config.initial_value,
        step: config.step,
        initial_value: config.initial_value,
        triggers: config.triggers.clone(),
        history: vec![snapshot],
        max_history: config.max_history.max(1),
    }
}

/// Create a fresh semantic version state from the three initial values,
/// history seeded with one full snapshot.
pub fn initial_version_state(config: &VersionConfig) -> VersionState {
    let value = format_version(
        config.major_initial_value,
        config.minor_initial_value,
        config.patch_initial_value,
    );
    let snapshot = VersionSnapshot {
        value: value.clone(),
        major_value: config.major_initial_value,
        minor_value: config.minor_initial_value,
        patch_value: config.patch_initial_value,
        major_triggers: config.major_triggers.clone(),
        minor_triggers: config.minor_triggers.clone(),
        patch_triggers: config.patch_triggers.clone(),
    };
    VersionState {
        value,
        major_value: config.major_initial_value,
        minor_value: config.minor_initial_value,
        patch_value: config.patch_initial_value,
        major_initial_value: config.major_initial_value,
        minor_initial_value: config.minor_initial_value,
        patch_initial_value: config.patch_initial_value,
        major_triggers: config.major_triggers.clone(),
        minor_triggers: config.minor_triggers.clone(),
        patch_triggers: config.patch_triggers.clone(),
        history: vec![snapshot],
        max_history: config.max_history.max(1),
    }
}
