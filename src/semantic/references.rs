//! Reference table: where each referenced key was first seen.
//!
//! Only used to point diagnostics at a readable location, one per key.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::base::{Name, Position};

/// First occurrence of a referenced key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    key: Name,
    position: Position,
}

impl ReferenceRecord {
    pub fn key(&self) -> &Name {
        &self.key
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Mapping from referenced key to its first occurrence. Write-once per key.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    references: IndexMap<Name, ReferenceRecord, FxBuildHasher>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a reference to `key` at `position`. Returns false if the key was
    /// already seen; the first location is kept.
    pub fn record(&mut self, key: &str, position: Position) -> bool {
        if self.references.contains_key(key) {
            return false;
        }
        let key = Name::new(key);
        self.references
            .insert(key.clone(), ReferenceRecord { key, position });
        true
    }

    pub fn get(&self, key: &str) -> Option<&ReferenceRecord> {
        self.references.get(key)
    }

    /// Records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceRecord> {
        self.references.values()
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn clear(&mut self) {
        self.references.clear();
    }
}
