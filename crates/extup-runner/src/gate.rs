use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use extup_core::ExtensionKey;

/// One mutex per extension key. A run locks its key's slot for its whole
/// duration, so two concurrent runs for the same extension serialize while
/// runs for different extensions proceed in parallel.
#[derive(Default)]
pub(crate) struct KeyGate {
    slots: Mutex<HashMap<ExtensionKey, Arc<Mutex<()>>>>,
}

impl KeyGate {
    pub(crate) fn slot(&self, key: &ExtensionKey) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(key.clone()).or_default().clone()
    }
}
