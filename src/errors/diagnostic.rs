//! Diagnostics collected while loading a dotenv source
//!
//! Provides rich error information including:
//! - Error codes for categorization
//! - Severity: syntax errors abort the parse, resolution problems are warnings
//! - The key the diagnostic is about
//! - Source position of the offending text
//! - Hints/suggestions for fixes

use std::fmt;

use super::codes::ErrorCode;
use crate::base::{Name, Position};

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The source cannot be loaded
    Error,
    /// Recovered; the parse still registers its values
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message with location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Categorized error code
    pub code: ErrorCode,
    /// Severity level, derived from the code
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// The key this diagnostic refers to, when there is one
    pub key: Option<Name>,
    /// Source position (0-indexed)
    pub position: Position,
    /// Optional suggestion for fixing the problem
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the code's default message
    pub fn new(code: ErrorCode, position: Position) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: code.default_message().to_string(),
            key: None,
            position,
            hint: None,
        }
    }

    /// A malformed definition line.
    pub fn syntax(code: ErrorCode, position: Position, message: impl Into<String>) -> Self {
        Self::new(code, position).with_message(message)
    }

    /// A reference to a variable that is neither defined nor in the environment.
    pub fn undefined_variable(key: &str, position: Position) -> Self {
        Self::new(ErrorCode::E0201, position)
            .with_message(format!("undefined variable '{key}'"))
            .with_key(key)
            .with_hint("define it in the file or export it before loading; it expands to an empty string")
    }

    /// A variable that could not be resolved because it depends on itself.
    pub fn circular_reference(key: &str, position: Position) -> Self {
        Self::new(ErrorCode::E0202, position)
            .with_message(format!("circular reference to '{key}'"))
            .with_key(key)
            .with_hint("unresolvable references were replaced by an empty string")
    }

    /// Replace the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the key the diagnostic is about
    pub fn with_key(mut self, key: impl Into<Name>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add a hint to this diagnostic
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Check if this diagnostic aborts the parse
    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.code, self.message, self.position)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

// ============================================================================
// DIAGNOSTIC SINK
// ============================================================================

/// Ordered, append-only collection of diagnostics for a single parse.
///
/// Cleared at the start of every parse and flushed to the caller at the end.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Drop everything collected so far.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Check if any collected diagnostic aborts the parse.
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// Iterate over the collected diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Emit every collected diagnostic and hand the batch to the caller,
    /// leaving the sink empty.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        for diagnostic in &self.diagnostics {
            let code = diagnostic.code.as_str();
            let key = diagnostic.key.as_deref();
            match diagnostic.severity {
                Severity::Error => {
                    tracing::error!(code, key, "{} at {}", diagnostic.message, diagnostic.position)
                }
                Severity::Warning => {
                    tracing::warn!(code, key, "{} at {}", diagnostic.message, diagnostic.position)
                }
            }
        }
        std::mem::take(&mut self.diagnostics)
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.diagnostics.extend(iter);
    }
}
