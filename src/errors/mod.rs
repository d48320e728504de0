//! Error handling module
//!
//! This module provides the error types of the loader:
//! - Categorized error codes for filtering and documentation
//! - Positioned diagnostics with hints, collected into an ordered sink
//! - Fatal [`Error`] values for IO failures and malformed sources

mod codes;
mod diagnostic;
mod error;

pub use codes::ErrorCode;
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
