//! File loading: read a `.env` file and register it.

use std::path::{Path, PathBuf};

use crate::env::{Environment, ProcessEnv};
use crate::errors::{Error, Result};
use crate::parser::{ParseOptions, Parser, Report};

/// Default file name looked up relative to the working directory.
pub const DEFAULT_PATH: &str = ".env";

/// Builder for loading a dotenv file.
///
/// # Example
///
/// ```no_run
/// let report = dotenv::Loader::new()
///     .path("config/.env")
///     .overwrite(true)
///     .load()?;
/// for diagnostic in &report.diagnostics {
///     eprintln!("{diagnostic}");
/// }
/// # Ok::<(), dotenv::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loader {
    path: PathBuf,
    options: ParseOptions,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            options: ParseOptions::default(),
        }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// File to read.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Replace variables that are already set.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.options.overwrite = overwrite;
        self
    }

    /// Resolve references between values.
    pub fn interpolate(mut self, interpolate: bool) -> Self {
        self.options.interpolate = interpolate;
        self
    }

    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn file(&self) -> &Path {
        &self.path
    }

    /// Load into the process environment.
    pub fn load(&self) -> Result<Report> {
        self.load_into(&mut ProcessEnv)
    }

    /// Load into any [`Environment`].
    pub fn load_into<E: Environment + ?Sized>(&self, env: &mut E) -> Result<Report> {
        tracing::debug!(path = %self.path.display(), "loading dotenv file");
        let source = std::fs::read_to_string(&self.path).map_err(|e| Error::read(&self.path, e))?;
        Parser::new().parse(&source, self.options, env)
    }
}

/// Load `.env` from the working directory into the process environment,
/// keeping variables that are already set.
pub fn load() -> Result<Report> {
    Loader::new().load()
}

/// Load the file at `path` into the process environment, keeping variables
/// that are already set.
pub fn from_path(path: impl AsRef<Path>) -> Result<Report> {
    Loader::new().path(path.as_ref()).load()
}
