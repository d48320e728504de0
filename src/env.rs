//! Environment boundary: where external symbols are read from and where
//! finished local symbols are registered.
//!
//! The resolver only ever talks to an [`Environment`]; [`ProcessEnv`] is the
//! thin adapter over the real process environment and [`MemoryEnv`] keeps
//! everything in a map.

use indexmap::IndexMap;

/// A key/value store of environment variables.
pub trait Environment {
    /// Current value of `key`, if set.
    ///
    /// Values that are not valid UTF-8 are converted lossily, so a set
    /// variable is never mistaken for an undefined one.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key` unconditionally. Returns whether it was stored.
    fn insert(&mut self, key: &str, value: &str) -> bool;

    /// Check if `key` is set at all.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Register `value` under `key`, leaving an existing variable untouched
    /// unless `overwrite` is set. Returns whether the value was written.
    fn set(&mut self, key: &str, value: &str, overwrite: bool) -> bool {
        if !overwrite && self.contains(key) {
            return false;
        }
        self.insert(key, value)
    }
}

/// The environment of the current process.
///
/// Writing mutates global state shared by every thread; callers must not
/// load concurrently with other code reading or writing the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        let value = std::env::var_os(key)?;
        Some(match value.into_string() {
            Ok(value) => value,
            Err(raw) => {
                tracing::debug!(key, "environment value is not valid UTF-8; converting lossily");
                raw.to_string_lossy().into_owned()
            }
        })
    }

    fn contains(&self, key: &str) -> bool {
        std::env::var_os(key).is_some()
    }

    fn insert(&mut self, key: &str, value: &str) -> bool {
        if key.is_empty() || key.contains(['=', '\0']) || value.contains('\0') {
            tracing::warn!(key, "cannot register variable containing NUL or '='");
            return false;
        }
        // SAFETY: the loader is documented as single-threaded with respect to
        // the process environment; key and value were checked above.
        unsafe {
            std::env::set_var(key, value);
        }
        true
    }
}

/// An in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: IndexMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Environment for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn insert(&mut self, key: &str, value: &str) -> bool {
        self.vars.insert(key.to_string(), value.to_string());
        true
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
