//! Durable progress ledger
//!
//! The ledger is the only source of truth for "has this URL been processed".
//! It is rewritten in full after each completed unit of work, via a temporary
//! sibling file and a rename, so a crash loses at most the in-flight item.

use crate::HarvestError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Completion status of a ledger entry
///
/// Serialized as a plain string. Values other than `"done"` are kept
/// verbatim so that saving never rewrites entries this version does not
/// understand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemStatus {
    /// Artifact written and recorded
    Done,

    /// Any other status string; treated as not done
    Other(String),
}

impl ItemStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Done => "done",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ItemStatus {
    fn from(raw: String) -> Self {
        if raw == "done" {
            Self::Done
        } else {
            Self::Other(raw)
        }
    }
}

impl From<ItemStatus> for String {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Done => "done".to_string(),
            ItemStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which mapping of the ledger an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Pages,
    Images,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pages => write!(f, "pages"),
            Self::Images => write!(f, "images"),
        }
    }
}

/// The persisted record: two URL → status mappings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub pages: HashMap<String, ItemStatus>,

    #[serde(default)]
    pub images: HashMap<String, ItemStatus>,
}

impl Ledger {
    fn entries(&self, namespace: Namespace) -> &HashMap<String, ItemStatus> {
        match namespace {
            Namespace::Pages => &self.pages,
            Namespace::Images => &self.images,
        }
    }

    fn entries_mut(&mut self, namespace: Namespace) -> &mut HashMap<String, ItemStatus> {
        match namespace {
            Namespace::Pages => &mut self.pages,
            Namespace::Images => &mut self.images,
        }
    }
}

/// Counts of completed entries, shown by `--stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerStatistics {
    pub pages_done: usize,
    pub images_done: usize,
}

/// File-backed owner of the ledger
///
/// Stages receive `&mut LedgerStore` and never touch the maps directly.
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    ledger: Ledger,
}

impl LedgerStore {
    /// Loads the ledger at `path`
    ///
    /// A missing or malformed file yields an empty ledger. Corruption is
    /// logged and never returned as an error.
    pub fn load(path: &Path) -> Self {
        let ledger = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Ledger>(&content) {
                Ok(ledger) => {
                    tracing::info!(
                        "Loaded ledger from {} ({} pages, {} images recorded)",
                        path.display(),
                        ledger.pages.len(),
                        ledger.images.len()
                    );
                    ledger
                }
                Err(e) => {
                    tracing::warn!(
                        "Ledger {} is corrupt ({}), starting from an empty ledger",
                        path.display(),
                        e
                    );
                    Ledger::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No ledger at {}, starting fresh", path.display());
                Ledger::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read ledger {} ({}), starting from an empty ledger",
                    path.display(),
                    e
                );
                Ledger::default()
            }
        };

        Self {
            path: path.to_path_buf(),
            ledger,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the current in-memory ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns true if `url` is recorded as done in `namespace`
    pub fn is_done(&self, namespace: Namespace, url: &str) -> bool {
        self.ledger
            .entries(namespace)
            .get(url)
            .is_some_and(ItemStatus::is_done)
    }

    /// Records `url` as done in memory
    ///
    /// Callers must `save` before starting the next unit of work.
    pub fn mark_done(&mut self, namespace: Namespace, url: &str) {
        self.ledger
            .entries_mut(namespace)
            .insert(url.to_string(), ItemStatus::Done);
    }

    /// Records `url` as done and persists the whole ledger
    pub fn mark_done_and_save(&mut self, namespace: Namespace, url: &str) -> Result<(), HarvestError> {
        self.mark_done(namespace, url);
        self.save()
    }

    /// Number of entries marked done in `namespace`
    pub fn done_count(&self, namespace: Namespace) -> usize {
        self.ledger
            .entries(namespace)
            .values()
            .filter(|status| status.is_done())
            .count()
    }

    pub fn statistics(&self) -> LedgerStatistics {
        LedgerStatistics {
            pages_done: self.done_count(Namespace::Pages),
            images_done: self.done_count(Namespace::Images),
        }
    }

    /// Atomically overwrites the backing file with the full current ledger
    pub fn save(&self) -> Result<(), HarvestError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.ledger)?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::trace!("Saved ledger to {}", self.path.display());
        Ok(())
    }
}
