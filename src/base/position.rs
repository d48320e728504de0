/// Position tracking for definitions and variable references
///
/// Stores the source location (line/column) of a value or occurrence so
/// diagnostics can point back into the `.env` file.
use std::fmt;

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position reached after walking over `text` starting from `self`.
    ///
    /// Columns count characters, not bytes.
    pub fn advance(self, text: &str) -> Self {
        let mut pos = self;
        for ch in text.chars() {
            if ch == '\n' {
                pos.line += 1;
                pos.column = 0;
            } else {
                pos.column += 1;
            }
        }
        pos
    }

    /// Translate a position relative to a value into file coordinates,
    /// where `self` is the file position of the value's first character.
    pub fn offset_by(self, relative: Position) -> Self {
        if relative.line == 0 {
            Self::new(self.line, self.column + relative.column)
        } else {
            Self::new(self.line + relative.line, relative.column)
        }
    }
}

/// Rendered 1-indexed, the way editors show it.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}
