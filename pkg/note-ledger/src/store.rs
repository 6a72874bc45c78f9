use std::{collections::HashMap, fmt::Display, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{Note, Result};

/// The shielded key that owns a set of notes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerKey(pub String);

impl From<&str> for OwnerKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for OwnerKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Display for OwnerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persistence for notes, keyed by owner
///
/// The ledger reads the full list for an owner, modifies it, and writes it back. Implementations
/// must return notes in the order they were put.
pub trait NoteStore: Send + Sync {
    /// All notes for `owner`, or an empty list if there are none
    fn get(&self, owner: &OwnerKey) -> Result<Vec<Note>>;

    /// Replace the notes for `owner`
    fn put(&self, owner: &OwnerKey, notes: Vec<Note>) -> Result<()>;
}

impl<T: NoteStore + ?Sized> NoteStore for Arc<T> {
    fn get(&self, owner: &OwnerKey) -> Result<Vec<Note>> {
        (**self).get(owner)
    }

    fn put(&self, owner: &OwnerKey, notes: Vec<Note>) -> Result<()> {
        (**self).put(owner, notes)
    }
}

/// A [`NoteStore`] that keeps everything in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: RwLock<HashMap<OwnerKey, Vec<Note>>>,
}

impl NoteStore for MemoryStore {
    fn get(&self, owner: &OwnerKey) -> Result<Vec<Note>> {
        Ok(self.notes.read().get(owner).cloned().unwrap_or_default())
    }

    fn put(&self, owner: &OwnerKey, notes: Vec<Note>) -> Result<()> {
        self.notes.write().insert(owner.clone(), notes);
        Ok(())
    }
}
