//! Generic lifecycle handlers.
//!
//! Create assigns a fresh opaque identifier and performs no other work —
//! all field population happens through the plan-time transition. Read,
//! update, and delete are no-ops: the backing "infrastructure" is the
//! state record itself, so there is nothing external to fetch, reconcile,
//! or tear down.

use uuid::Uuid;

/// Diagnostic severity, owner-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One owner-facing diagnostic message.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
}

impl Diagnostic {
    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
        }
    }
}

pub type Diagnostics = Vec<Diagnostic>;

/// Source of opaque unique identifiers. Production draws random UUIDs;
/// tests substitute a sequential source.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Default identifier source backed by UUID v4.
#[derive(Debug, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Create: assign a fresh identifier, nothing else.
pub fn generic_create(ids: &mut dyn IdSource) -> (String, Diagnostics) {
    (ids.next_id(), Vec::new())
}

/// Read: no-op.
pub fn generic_read() -> Diagnostics {
    Vec::new()
}

/// Update: no-op.
pub fn generic_update() -> Diagnostics {
    Vec::new()
}

/// Delete: no-op — nothing external to clean up.
pub fn generic_delete() -> Diagnostics {
    Vec::new()
}
