//! The substitution primitive shared by every resolution pass.
//!
//! A value is lexed into occurrences and rebuilt with each occurrence either
//! replaced or copied through, depending on the [`Pass`]:
//!
//! | occurrence                 | `Resolve(Keep)` | `Resolve(Erase)` | `Escapes` |
//! |----------------------------|-----------------|------------------|-----------|
//! | reference, target complete | target value    | target value     | as written|
//! | reference, target pending  | as written      | empty            | as written|
//! | reference, undefined       | empty           | empty            | as written|
//! | escape                     | as written      | as written       | decoded   |
//!
//! Resolving passes also escape every stray `$` in the text around the
//! references, and spliced values arrive with theirs escaped. A value that
//! is swept again therefore only ever sees the references it was written
//! with, whatever order the symbols were defined in.

use crate::base::Position;
use crate::syntax::{OccurrenceKind, escape_bare, occurrences};

use super::symbol_table::SymbolTable;

/// What to do with a reference whose target is not complete yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnPending {
    /// Leave it for a later sweep
    Keep,
    /// Replace it with nothing; used to break circular references
    Erase,
}

/// Which occurrences a pass rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Resolve(OnPending),
    Escapes,
}

/// Result of one substitution over a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub value: String,
    /// References left in place because their target is still pending
    pub pending: usize,
}

/// Rewrite `value` against the current state of `symbols`.
pub fn substitute(value: &str, symbols: &SymbolTable, pass: Pass) -> Substitution {
    let mut out = String::with_capacity(value.len());
    let mut pending = 0;
    let mut last = 0;
    let copy = |out: &mut String, text: &str| match pass {
        Pass::Resolve(_) => out.push_str(&escape_bare(text)),
        Pass::Escapes => out.push_str(text),
    };

    for occurrence in occurrences(value, Position::default()) {
        let start = usize::from(occurrence.range.start());
        copy(&mut out, &value[last..start]);
        last = usize::from(occurrence.range.end());

        match (occurrence.kind, pass) {
            (OccurrenceKind::Reference(key), Pass::Resolve(on_pending)) => match symbols.get(key) {
                Some(target) if target.is_complete() => out.push_str(&target.substitution_text()),
                Some(_) if on_pending == OnPending::Keep => {
                    out.push_str(occurrence.text);
                    pending += 1;
                }
                // Pending target being erased, or a key defined nowhere.
                _ => {}
            },
            (OccurrenceKind::Escape(decoded), Pass::Escapes) => out.push(decoded),
            _ => out.push_str(occurrence.text),
        }
    }
    copy(&mut out, &value[last..]);

    Substitution {
        value: out,
        pending,
    }
}
