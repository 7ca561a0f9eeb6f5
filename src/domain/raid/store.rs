//! RAID store with injected snapshot persistence.
//!
//! The store exclusively owns the record sequence; no other component
//! mutates records directly. Persistence is a side effect delegated to the
//! injected key-value port on every mutating operation. An empty sequence is
//! never written, so a freshly cleared store does not overwrite a snapshot
//! another surface might still be reading. Clearing the log also drops the
//! assessment context key, so RAID items cannot accumulate against a stale
//! project description.

use std::sync::Arc;

use tracing::warn;

use crate::ports::KeyValueStore;

use super::record::{RaidLevel, RaidRecord, RaidStatus, RaidType};

/// Persistence key for the RAID record snapshot.
pub const RAID_SNAPSHOT_KEY: &str = "raid-log-items";

/// Persistence key for the upstream assessment context.
pub const ASSESSMENT_CONTEXT_KEY: &str = "current-assessment";

/// A single user-editable field with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaidField {
    Description(String),
    Severity(RaidLevel),
    Probability(RaidLevel),
    Mitigation(String),
    Owner(String),
    Status(RaidStatus),
}

/// In-memory, persisted register of RAID records.
pub struct RaidStore {
    items: Vec<RaidRecord>,
    storage: Arc<dyn KeyValueStore>,
}

impl RaidStore {
    /// Loads the store from the persisted snapshot.
    ///
    /// An absent or unreadable snapshot is treated as "no prior state":
    /// the store starts empty and the problem is logged, never raised.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let items = match storage.get(RAID_SNAPSHOT_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(items) => items,
                Err(err) => {
                    warn!(error = %err, "discarding malformed RAID snapshot");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read RAID snapshot");
                Vec::new()
            }
        };

        Self { items, storage }
    }

    /// The current record sequence, in insertion order.
    pub fn items(&self) -> &[RaidRecord] {
        &self.items
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a record by id.
    pub fn get(&self, id: u32) -> Option<&RaidRecord> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Inserts a blank record of the given type at the end of the sequence.
    ///
    /// The generated id is max existing id + 1, or 1 for an empty store.
    pub fn add_blank(&mut self, kind: RaidType) -> u32 {
        let id = self.next_id();
        self.items.push(RaidRecord::blank(id, kind));
        self.persist();
        id
    }

    /// Replaces one field of the record with matching id.
    ///
    /// Returns false (no-op) when the id is absent.
    pub fn update(&mut self, id: u32, field: RaidField) -> bool {
        let Some(record) = self.items.iter_mut().find(|r| r.id == id) else {
            return false;
        };

        match field {
            RaidField::Description(value) => record.description = value,
            RaidField::Severity(value) => record.severity = value,
            RaidField::Probability(value) => record.probability = value,
            RaidField::Mitigation(value) => record.mitigation = value,
            RaidField::Owner(value) => record.owner = value,
            RaidField::Status(value) => record.status = value,
        }

        self.persist();
        true
    }

    /// Removes the record with matching id.
    ///
    /// Returns false (no-op) when the id is absent.
    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id != id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Replaces the entire sequence, typically after a parser run.
    ///
    /// No identifier reconciliation with the prior sequence is attempted.
    pub fn bulk_replace(&mut self, records: Vec<RaidRecord>) {
        self.items = records;
        self.persist();
    }

    /// Empties the store and drops both persistence keys.
    ///
    /// A cleared RAID log always restarts from a fresh assessment, so the
    /// assessment context is removed along with the snapshot.
    pub fn clear(&mut self) {
        self.items.clear();
        if let Err(err) = self.storage.remove(RAID_SNAPSHOT_KEY) {
            warn!(error = %err, "failed to remove RAID snapshot");
        }
        if let Err(err) = self.storage.remove(ASSESSMENT_CONTEXT_KEY) {
            warn!(error = %err, "failed to remove assessment context");
        }
    }

    fn next_id(&self) -> u32 {
        self.items.iter().map(|r| r.id).max().map_or(1, |max| max + 1)
    }

    /// Writes the snapshot when the sequence is non-empty.
    ///
    /// Persistence failures are logged and do not fail the mutation.
    fn persist(&self) {
        if self.items.is_empty() {
            return;
        }
        match serde_json::to_string(&self.items) {
            Ok(json) => {
                if let Err(err) = self.storage.set(RAID_SNAPSHOT_KEY, &json) {
                    warn!(error = %err, "failed to persist RAID snapshot");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize RAID snapshot"),
        }
    }
}
