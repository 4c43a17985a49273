//! Owner-reported configuration errors.
//!
//! Raised before any transition runs. Contract violations inside the
//! engine are panics, not variants here — see the engine crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown resource type {0:?}")]
    UnknownResourceType(String),

    #[error(
        "resource {address:?} is stored as {stored} but declared as {declared}"
    )]
    KindMismatch {
        address: String,
        stored: &'static str,
        declared: &'static str,
    },
}
