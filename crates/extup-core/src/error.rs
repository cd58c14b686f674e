use thiserror::Error;

use crate::{ExtensionKey, UpgradeVersion};

/// Why a run halted. Every variant names the extension and, where one
/// exists, the blocking version and routine id, so an operator can diagnose
/// the stalled upgrade without inspecting ledger internals.
#[derive(Debug, Error)]
pub enum RunError {
    /// A registered routine has no action to invoke (declared but never
    /// filled in). Fixing the registration and re-running recovers.
    #[error("routine '{routine}' for {key} version {version} has no action to invoke")]
    InvalidRoutine {
        key: ExtensionKey,
        version: UpgradeVersion,
        routine: String,
    },

    /// The routine's own action reported an error.
    #[error("routine '{routine}' for {key} version {version} failed")]
    ActionFailed {
        key: ExtensionKey,
        version: UpgradeVersion,
        routine: String,
        #[source]
        source: anyhow::Error,
    },

    /// The ledger store failed to read or write. When this follows a
    /// successful action the routine may run again next time, so actions
    /// should tolerate a rare retry.
    #[error("ledger store failed for {key}")]
    Store {
        key: ExtensionKey,
        #[source]
        source: anyhow::Error,
    },
}
