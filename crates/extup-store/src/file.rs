use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use extup_core::{AppliedRoutines, ExtensionKey, LedgerStore};
use log::debug;

use crate::StateLayout;

/// On-disk shape of the ledger: kind, then extension id, then the applied
/// record. One document holds every extension tracked under a state dir.
pub type LedgerDocument = BTreeMap<String, BTreeMap<String, AppliedRoutines>>;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Ledger store backed by a single JSON document under a [`StateLayout`].
///
/// Writes land in the layout's tmp dir and are renamed into place, so a
/// crash mid-write leaves the previous document intact. An internal mutex
/// serializes read-modify-write cycles within the process.
pub struct FileLedgerStore {
    layout: StateLayout,
    write_lock: Mutex<()>,
}

impl FileLedgerStore {
    pub fn open(layout: StateLayout) -> Result<Self> {
        layout.ensure_base_dirs()?;
        Ok(Self {
            layout,
            write_lock: Mutex::new(()),
        })
    }

    pub fn layout(&self) -> &StateLayout {
        &self.layout
    }

    /// The full document, for diagnostics and the CLI. Mid-run reads see
    /// whatever the runner has persisted so far.
    pub fn snapshot(&self) -> Result<LedgerDocument> {
        self.read_document()
    }

    fn read_document(&self) -> Result<LedgerDocument> {
        let path = self.layout.ledger_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no ledger document at {}, starting empty", path.display());
                return Ok(LedgerDocument::new());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read ledger: {}", path.display()));
            }
        };

        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse ledger: {}", path.display()))
    }

    fn write_document(&self, document: &LedgerDocument) -> Result<()> {
        let path = self.layout.ledger_path();
        let payload = serde_json::to_vec_pretty(document).context("failed to encode ledger")?;

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system time is before unix epoch")?
            .as_nanos();
        let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_path = self.layout.tmp_dir().join(format!("ledger-{nanos}-{seq}"));

        fs::write(&tmp_path, &payload)
            .with_context(|| format!("failed to stage ledger write: {}", tmp_path.display()))?;
        if let Err(err) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err)
                .with_context(|| format!("failed to replace ledger: {}", path.display()));
        }

        debug!("wrote ledger document to {}", path.display());
        Ok(())
    }
}

impl LedgerStore for FileLedgerStore {
    fn get(&self, key: &ExtensionKey) -> Result<AppliedRoutines> {
        let document = self.read_document()?;
        Ok(document
            .get(key.kind().as_str())
            .and_then(|by_id| by_id.get(key.id()))
            .cloned()
            .unwrap_or_default())
    }

    fn put(&self, key: &ExtensionKey, applied: &AppliedRoutines) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut document = self.read_document()?;
        document
            .entry(key.kind().as_str().to_string())
            .or_default()
            .insert(key.id().to_string(), applied.clone());
        self.write_document(&document)
    }
}
