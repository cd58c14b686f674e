use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::UpgradeVersion;

/// The durable record for one extension: which routine ids have completed
/// successfully, per version. Entries are only ever added; pruning is out of
/// scope for the core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppliedRoutines {
    by_version: BTreeMap<UpgradeVersion, BTreeSet<String>>,
}

impl AppliedRoutines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, version: &UpgradeVersion, routine: &str) -> bool {
        self.by_version
            .get(version)
            .is_some_and(|ids| ids.contains(routine))
    }

    /// Records a routine as applied. Returns false if it was already present.
    pub fn insert(&mut self, version: UpgradeVersion, routine: impl Into<String>) -> bool {
        self.by_version
            .entry(version)
            .or_default()
            .insert(routine.into())
    }

    pub fn by_version(&self) -> &BTreeMap<UpgradeVersion, BTreeSet<String>> {
        &self.by_version
    }

    pub fn is_empty(&self) -> bool {
        self.by_version.is_empty()
    }

    /// Total number of recorded routine applications.
    pub fn len(&self) -> usize {
        self.by_version.values().map(BTreeSet::len).sum()
    }
}
