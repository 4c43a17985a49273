//! Canonical hashing — deterministic serialization + SHA-256 fingerprints.
//!
//! Produces byte-identical output across platforms.
//!
//! Rules:
//!   - Strict field order (schema version first — identity binding)
//!   - Trigger maps emitted in key order (BTreeMap iteration)
//!   - History oldest first
//!   - UTF-8 JSON, no whitespace

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::{CounterState, TriggerSet, VersionState};
use crate::STATE_SCHEMA_VERSION;

/// Canonical serialization of a counter state to UTF-8 JSON bytes.
pub fn canonical_counter_bytes(state: &CounterState) -> Vec<u8> {
    let obj = counter_value(state);
    serde_json::to_string(&obj)
        .expect("canonical serialization failed")
        .into_bytes()
}

/// SHA-256 of the canonical counter serialization. Lowercase hex.
pub fn counter_hash(state: &CounterState) -> String {
    hex(&Sha256::digest(canonical_counter_bytes(state)))
}

/// Canonical serialization of a version state to UTF-8 JSON bytes.
pub fn canonical_version_bytes(state: &VersionState) -> Vec<u8> {
    let obj = version_value(state);
    serde_json::to_string(&obj)
        .expect("canonical serialization failed")
        .into_bytes()
}

/// SHA-256 of the canonical version serialization. Lowercase hex.
pub fn version_hash(state: &VersionState) -> String {
    hex(&Sha256::digest(canonical_version_bytes(state)))
}

// ---------------------------------------------------------------------------
// Canonical value builders (private)
// ---------------------------------------------------------------------------

fn counter_value(state: &CounterState) -> Value {
    let mut history: Vec<Value> = Vec::new();
    for snap in &state.history {
        let mut entry = Map::new();
        entry.insert("value".to_string(), Value::Number(snap.value.into()));
        entry.insert("triggers".to_string(), triggers_value(&snap.triggers));
        history.push(Value::Object(entry));
    }

    // schema_version MUST be first — it is part of the state identity.
    let mut root = Map::new();
    root.insert(
        "schema_version".to_string(),
        Value::Number((STATE_SCHEMA_VERSION as u64).into()),
    );
    root.insert("value".to_string(), Value::Number(state.value.into()));
    root.insert("step".to_string(), Value::Number(state.step.into()));
    root.insert(
        "initial_value".to_string(),
        Value::Number(state.initial_value.into()),
    );
    root.insert("triggers".to_string(), triggers_value(&state.triggers));
    root.insert(
        "max_history".to_string(),
        Value::Number((state.max_history as u64).into()),
    );
    root.insert("history".to_string(), Value::Array(history));
    Value::Object(root)
}

fn version_value(state: &VersionState) -> Value {
    let mut history: Vec<Value> = Vec::new();
    for snap in &state.history {
        let mut entry = Map::new();
        entry.insert("value".to_string(), Value::String(snap.value.clone()));
        entry.insert("major_value".to_string(), Value::Number(snap.major_value.into()));
        entry.insert("minor_value".to_string(), Value::Number(snap.minor_value.into()));
        entry.insert("patch_value".to_string(), Value::Number(snap.patch_value.into()));
        entry.insert("major_triggers".to_string(), triggers_value(&snap.major_triggers));
        entry.insert("minor_triggers".to_string(), triggers_value(&snap.minor_triggers));
        entry.insert("patch_triggers".to_string(), triggers_value(&snap.patch_triggers));
        history.push(Value::Object(entry));
    }

    let mut root = Map::new();
    root.insert(
        "schema_version".to_string(),
        Value::Number((STATE_SCHEMA_VERSION as u64).into()),
    );
    root.insert("value".to_string(), Value::String(state.value.clone()));
    root.insert("major_value".to_string(), Value::Number(state.major_value.into()));
    root.insert("minor_value".to_string(), Value::Number(state.minor_value.into()));
    root.insert("patch_value".to_string(), Value::Number(state.patch_value.into()));
    root.insert(
        "major_initial_value".to_string(),
        Value::Number(state.major_initial_value.into()),
    );
    root.insert(
        "minor_initial_value".to_string(),
        Value::Number(state.minor_initial_value.into()),
    );
    root.insert(
        "patch_initial_value".to_string(),
        Value::Number(state.patch_initial_value.into()),
    );
    root.insert("major_triggers".to_string(), triggers_value(&state.major_triggers));
    root.insert("minor_triggers".to_string(), triggers_value(&state.minor_triggers));
    root.insert("patch_triggers".to_string(), triggers_value(&state.patch_triggers));
    root.insert(
        "max_history".to_string(),
        Value::Number((state.max_history as u64).into()),
    );
    root.insert("history".to_string(), Value::Array(history));
    Value::Object(root)
}

fn triggers_value(triggers: &TriggerSet) -> Value {
    // BTreeMap iterates in key order; Map preserves insertion order.
    let mut obj = Map::new();
    for (k, v) in triggers {
        obj.insert(k.clone(), Value::String(v.clone()));
    }
    Value::Object(obj)
}

fn hex(digest: &[u8]) -> String {
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
