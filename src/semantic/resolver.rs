//! Resolution of nested variables.
//!
//! # Phases
//!
//! 1. **Definition** - scanned definitions are inserted into the [`SymbolTable`]
//! 2. **Dependency scan** - every local value is lexed once; references are
//!    counted per record, first locations land in the [`ReferenceTable`] and
//!    environment variables that are referenced become external symbols
//! 3. **Fixed point** - incomplete records are re-substituted sweep after
//!    sweep; each sweep that makes progress completes at least one record
//! 4. **Cycle breaking** - a sweep without progress means a circular
//!    reference: every referenced key still pending is reported, then the
//!    remaining references are erased so the loop terminates
//! 5. **Escape expansion** - escapes in local values are decoded, once
//!
//! The resolver owns both tables for the duration of a parse. [`Resolver::reset`]
//! clears them so the same instance can be reused for the next source.

use tracing::{debug, trace};

use crate::env::Environment;
use crate::errors::{Diagnostic, Diagnostics};
use crate::syntax::{Definition, OccurrenceKind, occurrences};

use super::references::ReferenceTable;
use super::substitute::{OnPending, Pass, substitute};
use super::symbol_table::{SymbolRecord, SymbolTable};

/// Counters describing how a parse converged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Local records with pending references after the dependency scan.
    pub initial_unresolved: usize,
    /// Unresolved count at the end of each sweep.
    pub sweeps: Vec<usize>,
    /// Sweeps that made no progress and triggered cycle breaking.
    pub stalls: usize,
}

/// The symbol-resolution engine.
#[derive(Debug, Default)]
pub struct Resolver {
    symbols: SymbolTable,
    references: ReferenceTable,
    diagnostics: Diagnostics,
    unresolved: usize,
    stats: ResolveStats,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything from a previous parse.
    pub fn reset(&mut self) {
        self.symbols.clear();
        self.references.clear();
        self.diagnostics.clear();
        self.unresolved = 0;
        self.stats = ResolveStats::default();
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn references(&self) -> &ReferenceTable {
        &self.references
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Local records still waiting on a reference.
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    pub fn stats(&self) -> &ResolveStats {
        &self.stats
    }

    /// Insert a scanned definition. Redefinitions replace the earlier value
    /// only when `overwrite` is set.
    pub fn define(&mut self, definition: Definition, overwrite: bool) -> bool {
        self.symbols.define(SymbolRecord::from(definition), overwrite)
    }

    // =========================================================================
    // DEPENDENCY SCAN
    // =========================================================================

    /// Count references in every local value and seed the unresolved count.
    ///
    /// Referenced keys missing from the table are looked up in `env`; found
    /// ones become external symbols, the rest are reported as undefined and
    /// expand to nothing.
    pub fn scan_dependencies<E: Environment + ?Sized>(&mut self, env: &E) {
        for idx in 0..self.symbols.len() {
            let Some(record) = self.symbols.get_index(idx) else {
                continue;
            };
            if !record.is_local() || record.is_literal() {
                continue;
            }

            let value = record.value().to_owned();
            let origin = record.position();
            let mut pending = 0;
            let mut undefined = false;

            for occurrence in occurrences(&value, origin) {
                let OccurrenceKind::Reference(key) = occurrence.kind else {
                    continue;
                };
                if !self.symbols.contains(key) {
                    match env.get(key) {
                        Some(external) => {
                            trace!(key, "referenced variable taken from environment");
                            self.symbols.define(SymbolRecord::external(key, external), false);
                        }
                        None => {
                            self.diagnostics
                                .push(Diagnostic::undefined_variable(key, occurrence.position));
                            undefined = true;
                            continue;
                        }
                    }
                }
                pending += 1;
                self.references.record(key, occurrence.position);
            }

            if pending > 0 {
                self.unresolved += 1;
            } else if undefined {
                // Nothing to wait for; drop the undefined references right away.
                let erased = substitute(&value, &self.symbols, Pass::Resolve(OnPending::Keep));
                if let Some(record) = self.symbols.get_index_mut(idx) {
                    record.rewrite(erased.value, 0);
                }
            }
            if let Some(record) = self.symbols.get_index_mut(idx) {
                record.set_pending(pending);
            }
        }

        self.stats.initial_unresolved = self.unresolved;
        debug!(
            symbols = self.symbols.len(),
            references = self.references.len(),
            unresolved = self.unresolved,
            "dependency scan finished"
        );
    }

    // =========================================================================
    // FIXED POINT
    // =========================================================================

    /// Substitute complete symbols into pending ones until none are left.
    pub fn resolve(&mut self) {
        while self.unresolved > 0 {
            let before = self.unresolved;
            self.sweep();
            self.stats.sweeps.push(self.unresolved);
            trace!(
                sweep = self.stats.sweeps.len(),
                before,
                after = self.unresolved,
                "resolution sweep"
            );

            if self.unresolved == before {
                self.break_cycles();
            }
        }
    }

    fn sweep(&mut self) {
        for idx in 0..self.symbols.len() {
            let Some(record) = self.symbols.get_index(idx) else {
                continue;
            };
            if !record.is_local() || record.is_complete() {
                continue;
            }

            let result = substitute(record.value(), &self.symbols, Pass::Resolve(OnPending::Keep));
            if let Some(record) = self.symbols.get_index_mut(idx) {
                record.rewrite(result.value, result.pending);
                if record.is_complete() {
                    self.unresolved -= 1;
                }
            }

            if self.unresolved == 0 {
                break;
            }
        }
    }

    // =========================================================================
    // CYCLE BREAKING
    // =========================================================================

    /// Report every referenced key that is still pending, then force all
    /// incomplete records complete by erasing their pending references.
    pub fn break_cycles(&mut self) {
        self.stats.stalls += 1;
        debug!(unresolved = self.unresolved, "resolution stalled; breaking cycles");

        for reference in self.references.iter() {
            let pending = self
                .symbols
                .get(reference.key())
                .is_some_and(|record| !record.is_complete());
            if pending {
                self.diagnostics
                    .push(Diagnostic::circular_reference(reference.key(), reference.position()));
            }
        }

        for idx in 0..self.symbols.len() {
            let Some(record) = self.symbols.get_index(idx) else {
                continue;
            };
            if !record.is_local() || record.is_complete() {
                continue;
            }

            let forced = substitute(record.value(), &self.symbols, Pass::Resolve(OnPending::Erase));
            if let Some(record) = self.symbols.get_index_mut(idx) {
                record.rewrite(forced.value, 0);
                self.unresolved = self.unresolved.saturating_sub(1);
            }
        }

        debug_assert_eq!(self.unresolved, 0);
    }

    // =========================================================================
    // ESCAPE EXPANSION
    // =========================================================================

    /// Decode escapes in every local value. Values already expanded and
    /// verbatim values are left alone, so running this twice is a no-op.
    pub fn expand_escapes(&mut self) {
        for idx in 0..self.symbols.len() {
            let Some(record) = self.symbols.get_index(idx) else {
                continue;
            };
            if !record.is_local() || record.is_literal() || record.is_expanded() {
                continue;
            }

            let expanded = substitute(record.value(), &self.symbols, Pass::Escapes);
            if let Some(record) = self.symbols.get_index_mut(idx) {
                record.expand(expanded.value);
            }
        }
    }
}
