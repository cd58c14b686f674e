use std::collections::BTreeMap;

use anyhow::Result;

use crate::UpgradeVersion;

/// A routine's callable body. Actions are caller-supplied and may do
/// arbitrary work (schema migrations, data backfills, config rewrites).
pub type RoutineAction = Box<dyn Fn() -> Result<()> + Send + Sync>;

/// The set of upgrade routines declared for one extension, keyed by version
/// and then by routine id. `(version, id)` is the identity of a routine;
/// ids only need to be unique within their version.
///
/// A registry is built fresh per session by registration calls and handed to
/// the runner, which never mutates it.
#[derive(Default)]
pub struct Registry {
    routines: BTreeMap<UpgradeVersion, BTreeMap<String, Option<RoutineAction>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a routine for `version`. If the `(version, id)` pair is
    /// already registered, the new action replaces the old one; the last
    /// registration wins, so callers can override a default.
    pub fn register<F>(&mut self, version: UpgradeVersion, id: impl Into<String>, action: F)
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.routines
            .entry(version)
            .or_default()
            .insert(id.into(), Some(Box::new(action)));
    }

    /// Registers a routine slot with no action. Running it fails with
    /// `RunError::InvalidRoutine`; a later `register` for the same pair
    /// fills the slot.
    pub fn declare(&mut self, version: UpgradeVersion, id: impl Into<String>) {
        self.routines
            .entry(version)
            .or_default()
            .insert(id.into(), None);
    }

    /// All registered routines, versions in ascending order. Routines within
    /// one version come out in id order; that order is deterministic but not
    /// a contract, so routines needing strict sequencing should use
    /// finer-grained versions instead.
    pub fn routines(&self) -> &BTreeMap<UpgradeVersion, BTreeMap<String, Option<RoutineAction>>> {
        &self.routines
    }

    pub fn len(&self) -> usize {
        self.routines.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids = f.debug_map();
        for (version, routines) in &self.routines {
            ids.entry(version, &routines.keys().collect::<Vec<_>>());
        }
        ids.finish()
    }
}
