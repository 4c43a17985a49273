//! Resource type registry — explicit dispatch table.
//!
//! Built once at process start and passed by reference to whatever needs
//! to dispatch by type name. No global mutable registration state.

use std::collections::BTreeMap;

use crate::error::ProviderError;

/// External type name of the monotonic counter resource.
pub const TYPE_MONOTONIC_COUNTER: &str = "counters_monotonic_counter";

/// External type name of the semantic version resource.
pub const TYPE_SEMANTIC_VERSION: &str = "counters_semantic_version";

/// The two resource kinds this provider implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    MonotonicCounter,
    SemanticVersion,
}

impl ResourceKind {
    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::MonotonicCounter => TYPE_MONOTONIC_COUNTER,
            ResourceKind::SemanticVersion => TYPE_SEMANTIC_VERSION,
        }
    }
}

/// Maps external resource-type names to engine kinds.
#[derive(Debug)]
pub struct Registry {
    entries: BTreeMap<&'static str, ResourceKind>,
}

impl Registry {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(TYPE_MONOTONIC_COUNTER, ResourceKind::MonotonicCounter);
        entries.insert(TYPE_SEMANTIC_VERSION, ResourceKind::SemanticVersion);
        Self { entries }
    }

    /// Resolve a declared type name to a resource kind.
    pub fn kind(&self, type_name: &str) -> Result<ResourceKind, ProviderError> {
        self.entries
            .get(type_name)
            .copied()
            .ok_or_else(|| ProviderError::UnknownResourceType(type_name.to_string()))
    }

    /// All registered type names, in order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
