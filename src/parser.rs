//! Entry point: parse a dotenv source, resolve it and register the result.
//!
//! ```text
//! scan_definitions → SymbolTable
//!     ↓ (interpolate)
//! dependency scan → ReferenceTable, unresolved count
//!     ↓
//! fixed-point sweeps ⇄ cycle breaking
//!     ↓
//! escape expansion → Environment::set → Report
//! ```

use std::io::Read;

use tracing::debug;

use crate::base::Name;
use crate::env::Environment;
use crate::errors::{Diagnostic, Error, Result};
use crate::semantic::{ResolveStats, Resolver};
use crate::syntax::scan_definitions;

/// Switches for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Replace variables that already exist, and let later definitions of a
    /// key replace earlier ones.
    pub overwrite: bool,
    /// Resolve `${VAR}` / `$VAR` references between values.
    pub interpolate: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            interpolate: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn interpolate(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }
}

/// A local variable after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Name,
    pub value: String,
    /// Whether the value was written to the environment.
    pub applied: bool,
}

/// Outcome of a parse that got past the syntax check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Local variables in definition order.
    pub entries: Vec<Entry>,
    /// Recovered problems (undefined and circular references), in report order.
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ResolveStats,
}

impl Report {
    /// Final value of a local variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key.as_str() == key)
            .map(|entry| entry.value.as_str())
    }

    /// Check if the parse produced no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Reusable dotenv parser.
///
/// Internal tables are reset at the start of every call; a single instance
/// must not be shared between concurrent parses.
#[derive(Debug, Default)]
pub struct Parser {
    resolver: Resolver,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `source` and register its variables in `env`.
    ///
    /// Fails without touching `env` if any definition line is malformed.
    pub fn parse<E: Environment + ?Sized>(
        &mut self,
        source: &str,
        options: ParseOptions,
        env: &mut E,
    ) -> Result<Report> {
        self.resolver.reset();

        let definitions = match scan_definitions(source) {
            Ok(definitions) => definitions,
            Err(errors) => {
                let diagnostics = self.resolver.diagnostics_mut();
                diagnostics.extend(errors);
                return Err(Error::Syntax(diagnostics.flush()));
            }
        };
        debug!(definitions = definitions.len(), ?options, "scanned dotenv source");

        for definition in definitions {
            self.resolver.define(definition, options.overwrite);
        }

        if options.interpolate {
            self.resolver.scan_dependencies(&*env);
            self.resolver.resolve();
        }
        self.resolver.expand_escapes();

        let entries = self.register(env, options.overwrite);
        let stats = self.resolver.stats().clone();
        let diagnostics = self.resolver.diagnostics_mut().flush();
        debug!(
            entries = entries.len(),
            diagnostics = diagnostics.len(),
            sweeps = stats.sweeps.len(),
            "dotenv source loaded"
        );

        Ok(Report {
            entries,
            diagnostics,
            stats,
        })
    }

    /// Read `reader` to the end and [`parse`](Self::parse) it.
    pub fn parse_reader<R: Read, E: Environment + ?Sized>(
        &mut self,
        mut reader: R,
        options: ParseOptions,
        env: &mut E,
    ) -> Result<Report> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        self.parse(&source, options, env)
    }

    /// Write every local symbol to `env`. External symbols are never written.
    fn register<E: Environment + ?Sized>(&self, env: &mut E, overwrite: bool) -> Vec<Entry> {
        self.resolver
            .symbols()
            .locals()
            .map(|record| {
                let applied = env.set(record.key(), record.value(), overwrite);
                if !applied {
                    debug!(key = %record.key(), "variable already set; leaving it untouched");
                }
                Entry {
                    key: record.key().clone(),
                    value: record.value().to_string(),
                    applied,
                }
            })
            .collect()
    }
}
