use std::sync::PoisonError;

use extup_core::{ExtensionKey, LedgerStore, Registry, RunError, UpgradeVersion};
use log::{debug, info, warn};

mod gate;

use gate::KeyGate;

/// What one `run` invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Routines executed by this run, in execution order.
    pub applied: Vec<(UpgradeVersion, String)>,
    /// Registered routines skipped because the ledger already held them.
    pub skipped: usize,
}

impl RunReport {
    /// True when everything registered was already applied before this run.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Executes the not-yet-applied subset of a registry against the ledger.
///
/// Versions run in ascending order. Each success is persisted before the
/// next routine starts, so a crash loses at most the in-flight routine and a
/// later run resumes from the first unapplied one. The first failure halts
/// the run; re-invoking `run` is the recovery path.
pub struct Runner<S> {
    store: S,
    gate: KeyGate,
}

impl<S: LedgerStore> Runner<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            gate: KeyGate::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs every registered routine not yet recorded for `key`.
    ///
    /// At most one run per key executes at a time; a concurrent call for the
    /// same key blocks until the first finishes, then re-reads the ledger
    /// and skips whatever the first run recorded.
    pub fn run(&self, key: &ExtensionKey, registry: &Registry) -> Result<RunReport, RunError> {
        let slot = self.gate.slot(key);
        let _guard = slot.lock().unwrap_or_else(PoisonError::into_inner);

        let mut applied = self.store.get(key).map_err(|source| RunError::Store {
            key: key.clone(),
            source,
        })?;

        let mut report = RunReport {
            applied: Vec::new(),
            skipped: 0,
        };

        for (version, routines) in registry.routines() {
            for (routine, action) in routines {
                if applied.contains(version, routine) {
                    debug!("{key}: routine '{routine}' for {version} already applied");
                    report.skipped += 1;
                    continue;
                }

                let Some(action) = action else {
                    warn!("{key}: routine '{routine}' for {version} has no action, halting");
                    return Err(RunError::InvalidRoutine {
                        key: key.clone(),
                        version: version.clone(),
                        routine: routine.clone(),
                    });
                };

                if let Err(source) = action() {
                    warn!("{key}: routine '{routine}' for {version} failed, halting");
                    return Err(RunError::ActionFailed {
                        key: key.clone(),
                        version: version.clone(),
                        routine: routine.clone(),
                        source,
                    });
                }

                applied.insert(version.clone(), routine.clone());
                self.store
                    .put(key, &applied)
                    .map_err(|source| RunError::Store {
                        key: key.clone(),
                        source,
                    })?;

                info!("{key}: applied routine '{routine}' for {version}");
                report.applied.push((version.clone(), routine.clone()));
            }
        }

        Ok(report)
    }
}
