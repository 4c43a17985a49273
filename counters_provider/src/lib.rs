#![forbid(unsafe_code)]

//! Host shell for the counter resources.
//!
//! Wraps the pure engine with resource-type dispatch, generic lifecycle
//! handlers, and a two-phase plan/apply reconciler over an in-memory
//! record store. No transition logic lives here — all state computation
//! is delegated to the engine crate.

pub mod error;
pub mod record;
pub mod registry;
pub mod lifecycle;
pub mod store;
pub mod reconcile;
