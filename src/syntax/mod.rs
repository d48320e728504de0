//! Syntax: the two lexical layers of a dotenv source
//!
//! ```text
//! Source Text
//!     ↓
//! Scanner → Definition { key, raw value, quote, position }
//!     ↓
//! Lexer (logos) → Occurrence { reference | escape, range, position }
//! ```
//!
//! The scanner works on whole files; the lexer on one value at a time and is
//! re-run by the resolver whenever a value changes.

mod lexer;
mod scanner;

pub use lexer::{
    LineToken, Occurrence, OccurrenceKind, Occurrences, decode_escape, escape_bare, escape_literal, occurrences,
};
pub use scanner::{Definition, Quote, scan_definitions};
