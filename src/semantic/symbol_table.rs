//! Symbol table: every key bound during a parse and its resolution state.

use std::borrow::Cow;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::base::{Name, Position};
use crate::syntax::{Definition, escape_bare, escape_literal};

/// Where a symbol came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Defined by the parsed source; expanded and registered.
    Local,
    /// Already present in the environment; a read-only substitution source.
    External,
}

/// One binding in the [`SymbolTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    key: Name,
    value: String,
    origin: Origin,
    /// Value is plain text: no references to resolve, no escapes to decode.
    literal: bool,
    position: Position,
    /// References in `value` still waiting for their target to complete.
    pending: usize,
    expanded: bool,
}

impl SymbolRecord {
    /// A binding defined by the parsed source.
    pub fn local(key: impl Into<Name>, value: impl Into<String>, position: Position) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            origin: Origin::Local,
            literal: false,
            position,
            pending: 0,
            expanded: false,
        }
    }

    /// A binding taken from the surrounding environment.
    pub fn external(key: impl Into<Name>, value: impl Into<String>) -> Self {
        Self {
            origin: Origin::External,
            literal: true,
            ..Self::local(key, value, Position::default())
        }
    }

    /// Mark the value as verbatim text.
    pub fn with_literal(mut self, literal: bool) -> Self {
        self.literal = literal;
        self
    }

    pub fn key(&self) -> &Name {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_local(&self) -> bool {
        self.origin == Origin::Local
    }

    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// File position of the first character of the raw value.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// True once no reference in the value is waiting on another symbol.
    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Text to splice in where another value references this symbol.
    ///
    /// Literal values are escaped so the final escape pass restores them.
    /// Other values keep their escapes, but any stray `$` is escaped so that
    /// later sweeps over the receiving value never read it as a reference.
    pub fn substitution_text(&self) -> Cow<'_, str> {
        if self.literal {
            escape_literal(&self.value)
        } else {
            escape_bare(&self.value)
        }
    }

    /// Seed the number of references found by the dependency scan.
    pub(crate) fn set_pending(&mut self, pending: usize) {
        debug_assert!(self.is_local(), "external symbols are always complete");
        self.pending = pending;
    }

    /// Store a new expansion of the value with the references it still holds.
    ///
    /// Completeness never regresses: the pending count can only go down.
    pub(crate) fn rewrite(&mut self, value: String, pending: usize) {
        self.value = value;
        self.pending = self.pending.min(pending);
    }

    /// Store the value with its escapes decoded. Subsequent passes skip it.
    pub(crate) fn expand(&mut self, value: String) {
        self.value = value;
        self.expanded = true;
    }
}

impl From<Definition> for SymbolRecord {
    fn from(definition: Definition) -> Self {
        let literal = definition.quote.is_verbatim();
        Self::local(definition.key, definition.value, definition.position).with_literal(literal)
    }
}

/// Mapping from key to [`SymbolRecord`].
///
/// Iteration follows definition order, so every pass over the table visits
/// records in the same sequence. Keys are never removed during a parse.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<Name, SymbolRecord, FxBuildHasher>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record`, or replace an existing record with the same key when
    /// `overwrite` allows it. Returns whether the table changed.
    pub fn define(&mut self, record: SymbolRecord, overwrite: bool) -> bool {
        if !overwrite && self.symbols.contains_key(record.key()) {
            tracing::trace!(key = %record.key(), "ignoring redefinition");
            return false;
        }
        self.symbols.insert(record.key().clone(), record);
        true
    }

    pub fn get(&self, key: &str) -> Option<&SymbolRecord> {
        self.symbols.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.symbols.contains_key(key)
    }

    pub fn get_index(&self, index: usize) -> Option<&SymbolRecord> {
        self.symbols.get_index(index).map(|(_, record)| record)
    }

    pub(crate) fn get_index_mut(&mut self, index: usize) -> Option<&mut SymbolRecord> {
        self.symbols.get_index_mut(index).map(|(_, record)| record)
    }

    /// Every record, in table order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolRecord> {
        self.symbols.values()
    }

    /// Records defined by the parsed source, in table order.
    pub fn locals(&self) -> impl Iterator<Item = &SymbolRecord> {
        self.iter().filter(|record| record.is_local())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}
