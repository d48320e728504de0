//! Error code definitions for dotenv diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Syntax errors (malformed definition lines)
//! - E02xx: Resolution errors (interpolation of nested variables)

use std::fmt;

use super::diagnostic::Severity;

/// Error codes for dotenv diagnostics
///
/// Each error code represents a specific category of failure,
/// enabling filtering and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Syntax errors (reported by the definitions scanner)
    // =========================================================================
    /// Key does not start a valid identifier
    E0101,
    /// Missing `=` between key and value
    E0102,
    /// Quoted value never closed
    E0103,
    /// Unexpected text after a quoted value
    E0104,

    // =========================================================================
    // E02xx: Resolution errors (reported by the resolver, recoverable)
    // =========================================================================
    /// Reference to a variable defined nowhere
    E0201,
    /// Variable trapped in a circular reference
    E0202,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 => "syntax error",
            Self::E0201 => "undefined variable",
            Self::E0202 => "circular reference",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid key",
            Self::E0102 => "expected '=' after key",
            Self::E0103 => "unterminated quoted value",
            Self::E0104 => "unexpected text after quoted value",
            Self::E0201 => "reference to undefined variable",
            Self::E0202 => "variable is part of a circular reference",
        }
    }

    /// Syntax errors abort the parse; resolution errors are recovered.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104)
    }

    /// Syntax errors are errors; resolution problems are recovered warnings.
    pub fn severity(&self) -> Severity {
        if self.is_fatal() {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
