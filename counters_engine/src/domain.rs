//! Counter resources — core domain types.
//!
//! Pure data. No behaviour, no transition logic.
//! Trigger maps are ordered (BTreeMap) so canonical hashing is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named set of string key/value pairs whose change — whole-set equality
/// against the last recorded set — is the sole condition that advances a
/// counter.
pub type TriggerSet = BTreeMap<String, String>;

/// Default increment per advance.
pub const DEFAULT_STEP: i64 = 1;

/// Default starting value for the monotonic counter.
pub const DEFAULT_INITIAL_VALUE: i64 = 0;

/// Default history capacity for both resource kinds.
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// Default initial semantic version triple: 1.0.0.
pub const DEFAULT_MAJOR_INITIAL: u64 = 1;
pub const DEFAULT_MINOR_INITIAL: u64 = 0;
pub const DEFAULT_PATCH_INITIAL: u64 = 0;

/// Render a semantic version triple as `"{major}.{minor}.{patch}"`.
pub fn format_version(major: u64, minor: u64, patch: u64) -> String {
    format!("{}.{}.{}", major, minor, patch)
}

// ── Monotonic counter ──────────────────────────────────────────────

/// Declared configuration for a monotonic counter instance.
/// `step` and `initial_value` are immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterConfig {
    pub step: i64,
    pub initial_value: i64,
    pub triggers: TriggerSet,
    pub max_history: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            initial_value: DEFAULT_INITIAL_VALUE,
            triggers: TriggerSet::new(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// One recorded history entry: the counter value at a transition, paired
/// with the trigger set that was current at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterSnapshot {
    pub value: i64,
    pub triggers: TriggerSet,
}

/// Persisted state of a monotonic counter instance.
///
/// Invariants (checked in `invariants`):
///   - `history` is never empty and never longer than `max_history`
///   - the last history entry equals the current `{value, triggers}`
///   - `max_history >= 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterState {
    pub value: i64,
    pub step: i64,
    pub initial_value: i64,
    pub triggers: TriggerSet,
    pub history: Vec<CounterSnapshot>,
    pub max_history: usize,
}

// ── Semantic version ───────────────────────────────────────────────

/// Declared configuration for a semantic version instance.
/// The three `*_initial_value` fields are immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionConfig {
    pub major_initial_value: u64,
    pub minor_initial_value: u64,
    pub patch_initial_value: u64,
    pub major_triggers: TriggerSet,
    pub minor_triggers: TriggerSet,
    pub patch_triggers: TriggerSet,
    pub max_history: usize,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            major_initial_value: DEFAULT_MAJOR_INITIAL,
            minor_initial_value: DEFAULT_MINOR_INITIAL,
            patch_initial_value: DEFAULT_PATCH_INITIAL,
            major_triggers: TriggerSet::new(),
            minor_triggers: TriggerSet::new(),
            patch_triggers: TriggerSet::new(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// One recorded history entry: the full post-transition version state,
/// including the contents of all three trigger sets at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionSnapshot {
    pub value: String,
    pub major_value: u64,
    pub minor_value: u64,
    pub patch_value: u64,
    pub major_triggers: TriggerSet,
    pub minor_triggers: TriggerSet,
    pub patch_triggers: TriggerSet,
}

/// Persisted state of a semantic version instance.
///
/// `value` is always the rendering of the current triple — recomputed on
/// every transition, never independently settable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionState {
    pub value: String,
    pub major_value: u64,
    pub minor_value: u64,
    pub patch_value: u64,
    pub major_initial_value: u64,
    pub minor_initial_value: u64,
    pub patch_initial_value: u64,
    pub major_triggers: TriggerSet,
    pub minor_triggers: TriggerSet,
    pub patch_triggers: TriggerSet,
    pub history: Vec<VersionSnapshot>,
    pub max_history: usize,
}

// ── Change detection ───────────────────────────────────────────────

/// Explicit change signal for a monotonic counter, computed by the host
/// by whole-set equality of the declared triggers against the last
/// recorded set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDiff {
    pub triggers_changed: bool,
}

/// Explicit change signal for a semantic version — one flag per watched
/// trigger set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionDiff {
    pub major_triggers_changed: bool,
    pub minor_triggers_changed: bool,
    pub patch_triggers_changed: bool,
}

// ── Transition outcome ─────────────────────────────────────────────

/// Which transition fired during a reconciliation pass. Exactly one fires
/// per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionOutcome {
    Initialize,
    Advance,
    Hold,
}

/// Version level acted upon during an advance. Precedence is total:
/// major > minor > patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionLevel {
    Major,
    Minor,
    Patch,
}

/// Structured, immutable outcome of a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResult {
    pub outcome: TransitionOutcome,
    /// For the semantic version engine: which level was bumped.
    pub bumped_level: Option<VersionLevel>,
    /// History entries dropped by the capacity bound during this pass.
    pub dropped_snapshots: usize,
}

impl TransitionResult {
    pub fn held() -> Self {
        Self {
            outcome: TransitionOutcome::Hold,
            bumped_level: None,
            dropped_snapshots: 0,
        }
    }
}
