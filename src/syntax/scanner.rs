//! Definitions scanner for `.env` sources
//!
//! Turns the text of a dotenv file into a flat list of [`Definition`]s.
//! Values are captured raw: escapes and references are left in place for the
//! resolver. Malformed lines are collected as diagnostics and the scanner
//! resynchronises at the next line, so one pass reports every bad line.

use crate::base::{Name, Position};
use crate::errors::{Diagnostic, ErrorCode};

/// How a value was written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quote {
    #[default]
    None,
    /// `"..."`: escapes and interpolation apply
    Double,
    /// `'...'`: verbatim
    Single,
}

impl Quote {
    /// Verbatim values are neither interpolated nor escape-expanded.
    pub fn is_verbatim(self) -> bool {
        matches!(self, Self::Single)
    }
}

/// A `KEY=VALUE` definition found in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub key: Name,
    /// Raw value text, quotes stripped
    pub value: String,
    pub quote: Quote,
    /// Position of the first character of the raw value
    pub position: Position,
}

/// Scan every definition in `source`.
///
/// Returns all syntax diagnostics instead if any line is malformed.
pub fn scan_definitions(source: &str) -> Result<Vec<Definition>, Vec<Diagnostic>> {
    let mut scanner = Scanner::new(source);
    scanner.run();
    if scanner.errors.is_empty() {
        Ok(scanner.definitions)
    } else {
        Err(scanner.errors)
    }
}

struct Scanner<'a> {
    src: &'a str,
    offset: usize,
    position: Position,
    definitions: Vec<Definition>,
    errors: Vec<Diagnostic>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        Self {
            src,
            offset: 0,
            position: Position::default(),
            definitions: Vec::new(),
            errors: Vec::new(),
        }
    }

    // =========================================================================
    // CURSOR
    // =========================================================================

    fn peek(&self) -> Option<char> {
        self.src[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
        Some(ch)
    }

    fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.offset;
        while self.peek().is_some_and(&mut pred) {
            self.bump();
        }
        &self.src[start..self.offset]
    }

    fn skip_blanks(&mut self) {
        self.eat_while(is_blank);
    }

    /// Consume the rest of the current line, including its newline.
    fn skip_line(&mut self) {
        self.eat_while(|c| c != '\n');
        self.bump();
    }

    // =========================================================================
    // GRAMMAR
    // =========================================================================

    fn run(&mut self) {
        loop {
            self.skip_blanks();
            match self.peek() {
                None => break,
                Some('\n') => {
                    self.bump();
                }
                Some('#') => self.skip_line(),
                Some(_) => match self.definition() {
                    Ok(definition) => self.definitions.push(definition),
                    Err(diagnostic) => {
                        self.errors.push(diagnostic);
                        self.skip_line();
                    }
                },
            }
        }
    }

    fn definition(&mut self) -> Result<Definition, Diagnostic> {
        let mut key = self.key()?;
        if key.as_str() == "export" && self.peek().is_some_and(is_blank) {
            self.skip_blanks();
            if self.peek() != Some('=') {
                key = self.key()?;
            }
        }

        self.skip_blanks();
        if self.peek() != Some('=') {
            return Err(Diagnostic::syntax(
                ErrorCode::E0102,
                self.position,
                format!("expected '=' after '{key}'"),
            )
            .with_key(key));
        }
        self.bump();
        self.skip_blanks();

        let (value, quote, position) = match self.peek() {
            Some(q @ ('"' | '\'')) => self.quoted(q, &key)?,
            _ => {
                let position = self.position;
                (self.unquoted(), Quote::None, position)
            }
        };

        Ok(Definition {
            key,
            value,
            quote,
            position,
        })
    }

    fn key(&mut self) -> Result<Name, Diagnostic> {
        let start = self.position;
        if !self.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
            let found = self.eat_while(|c| !is_blank(c) && c != '=' && c != '\n');
            return Err(Diagnostic::syntax(
                ErrorCode::E0101,
                start,
                format!("invalid key '{found}'"),
            )
            .with_hint("keys start with a letter or '_' and contain letters, digits, '_' or '.'"));
        }
        Ok(Name::new(self.eat_while(is_key_char)))
    }

    fn unquoted(&mut self) -> String {
        let line = self.eat_while(|c| c != '\n');
        let mut end = line.len();
        let mut prev_blank = true;
        for (idx, ch) in line.char_indices() {
            if ch == '#' && prev_blank {
                end = idx;
                break;
            }
            prev_blank = is_blank(ch);
        }
        line[..end].trim_end_matches(is_blank).to_string()
    }

    fn quoted(&mut self, quote: char, key: &str) -> Result<(String, Quote, Position), Diagnostic> {
        let open = self.position;
        self.bump();
        let position = self.position;

        let mut value = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(Diagnostic::syntax(
                        ErrorCode::E0103,
                        open,
                        format!("unterminated quoted value for '{key}'"),
                    )
                    .with_key(key)
                    .with_hint(format!("add a closing {quote}")));
                }
                Some(c) if c == quote => break,
                // Escapes stay raw; only the closing quote needs to be skipped over.
                Some('\\') if quote == '"' => {
                    value.push('\\');
                    if let Some(escaped) = self.bump() {
                        value.push(escaped);
                    }
                }
                // CRLF inside a multi-line value becomes a plain newline.
                Some('\r') if self.peek() == Some('\n') => {}
                Some(c) => value.push(c),
            }
        }

        self.skip_blanks();
        match self.peek() {
            None | Some('\n') => {}
            Some('#') => self.skip_line(),
            Some(_) => {
                return Err(Diagnostic::syntax(
                    ErrorCode::E0104,
                    self.position,
                    format!("unexpected text after quoted value of '{key}'"),
                )
                .with_key(key)
                .with_hint("start a comment with '#' or quote the whole value"));
            }
        }

        let kind = if quote == '"' { Quote::Double } else { Quote::Single };
        Ok((value, kind, position))
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}
