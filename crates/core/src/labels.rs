//! Persistent label table.
//!
//! Labels are user-defined names attached to linear addresses. The table
//! lives purely in memory during a session and round-trips through a JSON
//! sidecar stored next to the analyzed file (`<file>.json`), shaped as
//! `{"labels": {"<address>": ["name", ...]}}`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for label store operations.
#[derive(Debug, Error)]
pub enum LabelStoreError {
    #[error("label store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("label store is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// Mapping from linear address to an ordered list of label names.
///
/// `attach` appends, preserving insertion order and duplicates; nothing
/// ever overwrites or dedups an existing name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTable {
    labels: BTreeMap<u64, Vec<String>>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` to the list at `address`.
    pub fn attach(&mut self, address: u64, name: impl Into<String>) {
        self.labels.entry(address).or_default().push(name.into());
    }

    /// Names attached to `address`, in insertion order. Empty when none.
    pub fn lookup(&self, address: u64) -> &[String] {
        self.labels.get(&address).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Load a table from `path`. A missing file is not an error; it yields
    /// an empty table. Unreadable or malformed stores are surfaced so the
    /// caller can decide whether to fall back.
    pub fn load(path: &Path) -> Result<Self, LabelStoreError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the table to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), LabelStoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Sidecar path for the label store of `binary`: the same name with
/// `.json` appended.
pub fn store_path_for(binary: &Path) -> PathBuf {
    let mut name = binary.as_os_str().to_os_string();
    name.push(".json");
    PathBuf::from(name)
}
