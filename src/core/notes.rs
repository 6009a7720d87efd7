//! # Notes
//!
//! Free-text notes attached to entities, keyed by resource kind and id.
//!
//! `JsonNoteStore` keeps every note in one JSON file. Writes use atomic
//! rename (write `.tmp`, then `rename()`) so a crash never leaves a torn file.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::ResourceKind;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("note store I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("note store is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Identifies one entity across all resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteKey {
    pub kind: ResourceKind,
    pub id: u32,
}

impl NoteKey {
    pub fn new(kind: ResourceKind, id: u32) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for NoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.path(), self.id)
    }
}

pub trait NoteStore: Send {
    fn get(&self, key: NoteKey) -> Option<String>;

    /// Stores `text` for `key`. Blank text removes the note.
    fn set(&mut self, key: NoteKey, text: &str) -> Result<(), NoteError>;
}

/// Notes that live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: BTreeMap<String, String>,
}

impl NoteStore for MemoryNoteStore {
    fn get(&self, key: NoteKey) -> Option<String> {
        self.notes.get(&key.to_string()).cloned()
    }

    fn set(&mut self, key: NoteKey, text: &str) -> Result<(), NoteError> {
        if text.trim().is_empty() {
            self.notes.remove(&key.to_string());
        } else {
            self.notes.insert(key.to_string(), text.to_string());
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct NoteEntry {
    text: String,
    updated_at: i64,
}

/// Notes persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonNoteStore {
    path: PathBuf,
    notes: BTreeMap<String, NoteEntry>,
}

impl JsonNoteStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, NoteError> {
        let path = path.into();
        let notes = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            BTreeMap::new()
        };
        info!("Opened note store at {} ({} notes)", path.display(), notes.len());
        Ok(Self { path, notes })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unix timestamp of the last write to `key`.
    pub fn updated_at(&self, key: NoteKey) -> Option<i64> {
        self.notes.get(&key.to_string()).map(|e| e.updated_at)
    }

    fn persist(&self) -> Result<(), NoteError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, &self.notes)?;
        debug!("Wrote {} notes to {}", self.notes.len(), self.path.display());
        Ok(())
    }
}

impl NoteStore for JsonNoteStore {
    fn get(&self, key: NoteKey) -> Option<String> {
        self.notes.get(&key.to_string()).map(|e| e.text.clone())
    }

    fn set(&mut self, key: NoteKey, text: &str) -> Result<(), NoteError> {
        if text.trim().is_empty() {
            if self.notes.remove(&key.to_string()).is_none() {
                return Ok(());
            }
        } else {
            self.notes.insert(
                key.to_string(),
                NoteEntry {
                    text: text.to_string(),
                    updated_at: Utc::now().timestamp(),
                },
            );
        }
        self.persist()
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), NoteError> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
