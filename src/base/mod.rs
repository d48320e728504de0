//! Foundation types for the dotenv loader.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`] - Line/column positions for definitions and references
//! - [`TextRange`], [`TextSize`] - Byte spans of occurrences inside a value
//! - [`Name`] - Cheap-to-clone key names
//!
//! This module has NO dependencies on other dotenv modules.

mod position;

pub use position::Position;

pub use text_size::{TextRange, TextSize};

/// A variable name. Keys are short, so they stay inline.
pub type Name = smol_str::SmolStr;
