//! # Semantic Analysis
//!
//! This module turns scanned definitions into final values: it tracks every
//! key in a [`SymbolTable`], resolves nested references to a fixed point,
//! breaks circular references and decodes escapes.

mod references;
mod resolver;
mod substitute;
mod symbol_table;

pub use references::{ReferenceRecord, ReferenceTable};
pub use resolver::{ResolveStats, Resolver};
pub use substitute::{OnPending, Pass, Substitution, substitute};
pub use symbol_table::{Origin, SymbolRecord, SymbolTable};
