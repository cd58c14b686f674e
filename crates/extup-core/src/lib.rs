mod error;
mod key;
mod ledger;
mod registry;
mod store;
mod version;

pub use error::RunError;
pub use key::{ExtensionKey, ExtensionKind};
pub use ledger::AppliedRoutines;
pub use registry::{Registry, RoutineAction};
pub use store::LedgerStore;
pub use version::{UpgradeVersion, VersionParseError};
