use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use extup_core::{AppliedRoutines, ExtensionKey, LedgerStore};

/// In-memory ledger store for tests and embedders that manage durability
/// themselves.
#[derive(Default)]
pub struct MemoryLedgerStore {
    records: Mutex<HashMap<ExtensionKey, AppliedRoutines>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of extensions with at least one recorded routine.
    pub fn tracked_extensions(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn get(&self, key: &ExtensionKey) -> Result<AppliedRoutines> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(key).cloned().unwrap_or_default())
    }

    fn put(&self, key: &ExtensionKey, applied: &AppliedRoutines) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.insert(key.clone(), applied.clone());
        Ok(())
    }
}
