#![forbid(unsafe_code)]

//! Trigger-driven counter state engine.
//!
//! Pure transition logic for two virtual resources: a monotonic counter and
//! a semantic version counter. Each advances deterministically when its
//! configured trigger sets change and retains a bounded history of prior
//! values. No I/O, no host concerns — the hosting tool reads prior state,
//! detects trigger changes, and persists the computed result.

/// State schema version — bound into every canonical hash.
pub const STATE_SCHEMA_VERSION: u32 = 1;

pub mod domain;
pub mod history;
pub mod state;
pub mod transitions;
pub mod invariants;
pub mod hashing;
