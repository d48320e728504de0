//! # dotenv-base
//!
//! Core library for loading `.env` files into the environment, with nested
//! variable interpolation and escape-sequence decoding.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! loader    → File loading, defaults
//!   ↓
//! parser    → Entry point: scan → resolve → expand → register
//!   ↓
//! semantic  → Symbol table, fixed-point resolver, cycle breaking
//!   ↓
//! syntax    → Definitions scanner, logos value lexer
//!   ↓
//! env       → Environment boundary (process / in-memory)
//!   ↓
//! errors    → Error codes, diagnostics, fatal errors
//!   ↓
//! base      → Primitives (Position, Name, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → errors → env → syntax → semantic → parser → loader)
// ============================================================================

/// Foundation types: Position, Name, TextRange
pub mod base;

/// Error codes, diagnostics and fatal errors
pub mod errors;

/// Environment boundary: process environment and in-memory map
pub mod env;

/// Syntax: definitions scanner and value lexer
pub mod syntax;

/// Semantic: symbol table and reference resolution
pub mod semantic;

/// Parser: the load pipeline over a source string
pub mod parser;

/// Loader: reading `.env` files
pub mod loader;

// Re-export commonly needed items
pub use base::{Name, Position};
pub use env::{Environment, MemoryEnv, ProcessEnv};
pub use errors::{Diagnostic, Error, ErrorCode, Result, Severity};
pub use loader::{Loader, from_path, load};
pub use parser::{Entry, ParseOptions, Parser, Report};
