//! Data shapes crossing the host boundary.
//!
//! A record pairs an opaque identifier with typed state; declared
//! configuration is the owner-side counterpart. `from_value` parsers load
//! declared configurations from fixture JSON, defaulting absent fields
//! the way the resource schema would.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use counters_engine::domain::{
    CounterConfig, CounterState, TriggerSet, VersionConfig, VersionState,
};
use counters_engine::hashing::{counter_hash, version_hash};

use crate::registry::{ResourceKind, TYPE_MONOTONIC_COUNTER, TYPE_SEMANTIC_VERSION};

/// Declared configuration for one resource instance, as written by the
/// owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredConfig {
    Counter(CounterConfig),
    Version(VersionConfig),
}

impl DeclaredConfig {
    pub fn kind(&self) -> ResourceKind {
        match self {
            DeclaredConfig::Counter(_) => ResourceKind::MonotonicCounter,
            DeclaredConfig::Version(_) => ResourceKind::SemanticVersion,
        }
    }

    /// Parse a declared configuration of the given kind from fixture JSON.
    /// Absent fields take their schema defaults.
    pub fn from_value(kind: ResourceKind, v: &Value) -> Self {
        match kind {
            ResourceKind::MonotonicCounter => {
                let defaults = CounterConfig::default();
                DeclaredConfig::Counter(CounterConfig {
                    step: json_i64(v, "step").unwrap_or(defaults.step),
                    initial_value: json_i64(v, "initial_value")
                        .unwrap_or(defaults.initial_value),
                    triggers: json_triggers(v, "triggers"),
                    max_history: json_usize(v, "max_history")
                        .unwrap_or(defaults.max_history),
                })
            }
            ResourceKind::SemanticVersion => {
                let defaults = VersionConfig::default();
                DeclaredConfig::Version(VersionConfig {
                    major_initial_value: json_u64(v, "major_initial_value")
                        .unwrap_or(defaults.major_initial_value),
                    minor_initial_value: json_u64(v, "minor_initial_value")
                        .unwrap_or(defaults.minor_initial_value),
                    patch_initial_value: json_u64(v, "patch_initial_value")
                        .unwrap_or(defaults.patch_initial_value),
                    major_triggers: json_triggers(v, "major_triggers"),
                    minor_triggers: json_triggers(v, "minor_triggers"),
                    patch_triggers: json_triggers(v, "patch_triggers"),
                    max_history: json_usize(v, "max_history")
                        .unwrap_or(defaults.max_history),
                })
            }
        }
    }
}

/// Persisted state for one resource instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceState {
    Counter(CounterState),
    Version(VersionState),
}

impl ResourceState {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceState::Counter(_) => ResourceKind::MonotonicCounter,
            ResourceState::Version(_) => ResourceKind::SemanticVersion,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ResourceState::Counter(_) => TYPE_MONOTONIC_COUNTER,
            ResourceState::Version(_) => TYPE_SEMANTIC_VERSION,
        }
    }

    /// Current value rendered for display.
    pub fn display_value(&self) -> String {
        match self {
            ResourceState::Counter(s) => s.value.to_string(),
            ResourceState::Version(s) => s.value.clone(),
        }
    }

    /// Canonical SHA-256 fingerprint of the state.
    pub fn canonical_hash(&self) -> String {
        match self {
            ResourceState::Counter(s) => counter_hash(s),
            ResourceState::Version(s) => version_hash(s),
        }
    }
}

/// One persisted record: opaque identifier plus typed state. The host
/// never depends on the identifier's structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub state: ResourceState,
}

// ---------------------------------------------------------------------------
// Fixture field extraction
// ---------------------------------------------------------------------------

fn json_i64(v: &Value, key: &str) -> Option<i64> {
    v.get(key).and_then(|val| val.as_i64())
}

fn json_u64(v: &Value, key: &str) -> Option<u64> {
    v.get(key).and_then(|val| val.as_u64())
}

fn json_usize(v: &Value, key: &str) -> Option<usize> {
    json_u64(v, key).map(|n| n as usize)
}

fn json_triggers(v: &Value, key: &str) -> TriggerSet {
    v.get(key)
        .and_then(|val| val.as_object())
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, val)| {
                    val.as_str().map(|s| (k.clone(), s.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}
