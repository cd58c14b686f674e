mod file;
mod layout;
mod memory;

pub use file::{FileLedgerStore, LedgerDocument};
pub use layout::{default_user_state_dir, StateLayout};
pub use memory::MemoryLedgerStore;
