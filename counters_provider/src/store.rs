//! In-memory record store — stands in for the host's state file.
//!
//! The core has no persistence engine of its own; the host keeps the
//! records. Writes happen only after a plan has been computed and
//! validated (apply-before-persist ordering).

use std::collections::BTreeMap;

use counters_engine::invariants::{
    try_validate_counter_state, try_validate_version_state,
};

use crate::record::{ResourceRecord, ResourceState};

/// Keyed record map: resource address -> persisted record.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: BTreeMap<String, ResourceRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address: &str) -> Option<&ResourceRecord> {
        self.records.get(address)
    }

    /// Re-read a record, validating state invariants first. A violation
    /// here means the stored state was corrupted outside the engine.
    pub fn get_validated(&self, address: &str) -> Result<Option<&ResourceRecord>, String> {
        let record = match self.records.get(address) {
            None => return Ok(None),
            Some(r) => r,
        };
        match &record.state {
            ResourceState::Counter(s) => try_validate_counter_state(s)?,
            ResourceState::Version(s) => try_validate_version_state(s)?,
        }
        Ok(Some(record))
    }

    pub fn put(&mut self, address: &str, record: ResourceRecord) {
        self.records.insert(address.to_string(), record);
    }

    pub fn remove(&mut self, address: &str) -> Option<ResourceRecord> {
        self.records.remove(address)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Addresses in order, for deterministic reporting.
    pub fn addresses(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }
}
