use anyhow::Result;

use crate::{AppliedRoutines, ExtensionKey};

/// Durable home of the applied-routines record, keyed by extension.
///
/// The runner is the only writer. Implementations must provide
/// read-your-writes consistency within a process: a `put` followed by a
/// `get` for the same key in the same run observes the write.
pub trait LedgerStore {
    /// The applied record for `key`; an empty record if none exists yet.
    fn get(&self, key: &ExtensionKey) -> Result<AppliedRoutines>;

    /// Replaces the applied record for `key`.
    fn put(&self, key: &ExtensionKey, applied: &AppliedRoutines) -> Result<()>;
}
