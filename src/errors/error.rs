//! Fatal errors for load operations.

use std::path::PathBuf;

use thiserror::Error;

use super::diagnostic::Diagnostic;

/// Errors that abort a load before anything is registered.
///
/// Undefined and circular references are not errors in this sense; they are
/// recovered and reported through [`crate::Report::diagnostics`].
#[derive(Debug, Error)]
pub enum Error {
    /// The dotenv file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error while reading a source stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source contains malformed definition lines.
    #[error("{} syntax error(s), first: {}", .0.len(), first_message(.0))]
    Syntax(Vec<Diagnostic>),
}

impl Error {
    /// Create a read error for `path`.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Syntax diagnostics carried by this error, if any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Syntax(diagnostics) => diagnostics,
            _ => &[],
        }
    }
}

fn first_message(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .first()
        .map(|d| format!("{} at {}", d.message, d.position))
        .unwrap_or_default()
}

/// Result alias for load operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
