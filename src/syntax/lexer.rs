//! Logos-based lexer for dotenv values
//!
//! Splits a single value into literal text, variable references
//! (`${NAME}` / `$NAME`) and backslash escapes. Only references and
//! recognised escapes are surfaced as [`Occurrence`]s; everything else is
//! literal text that callers copy through untouched.

use std::borrow::Cow;

use logos::Logos;

use crate::base::{Position, TextRange, TextSize};

/// Logos token enum for the inside of a value
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineToken {
    /// `${NAME}`
    #[regex(r"\$\{[A-Za-z_][A-Za-z0-9_.]*\}")]
    BoundedVar,

    /// `$NAME`
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    UnboundedVar,

    /// Backslash and the character it escapes
    #[regex(r"\\(.|\n)")]
    Escape,

    #[regex(r"[^$\\]+")]
    Text,

    /// A `$` that does not start a reference
    #[token("$")]
    Dollar,

    /// Trailing backslash with nothing left to escape
    #[token("\\")]
    Backslash,
}

/// What a token inside a value stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceKind<'a> {
    /// Reference to another key
    Reference(&'a str),
    /// Escape sequence and the character it decodes to
    Escape(char),
}

/// A reference or escape found inside a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub kind: OccurrenceKind<'a>,
    /// Source text of the occurrence, e.g. `${HOME}` or `\n`
    pub text: &'a str,
    /// Byte range inside the scanned value
    pub range: TextRange,
    /// File position of the first character
    pub position: Position,
}

/// Lazy iterator over the occurrences of a value.
///
/// Restartable by calling [`occurrences`] again on the same value.
pub struct Occurrences<'a> {
    inner: logos::Lexer<'a, LineToken>,
    origin: Position,
    cursor: Position,
}

impl<'a> Iterator for Occurrences<'a> {
    type Item = Occurrence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = self.inner.next()?;
            let text = self.inner.slice();
            let span = self.inner.span();
            let relative = self.cursor;
            self.cursor = self.cursor.advance(text);

            let kind = match token {
                Ok(LineToken::BoundedVar) => OccurrenceKind::Reference(&text[2..text.len() - 1]),
                Ok(LineToken::UnboundedVar) => OccurrenceKind::Reference(&text[1..]),
                Ok(LineToken::Escape) => match text.chars().nth(1).and_then(decode_escape) {
                    Some(ch) => OccurrenceKind::Escape(ch),
                    None => continue,
                },
                _ => continue,
            };

            return Some(Occurrence {
                kind,
                text,
                range: TextRange::new(TextSize::from(span.start as u32), TextSize::from(span.end as u32)),
                position: self.origin.offset_by(relative),
            });
        }
    }
}

/// Enumerate references and escapes in `value`.
///
/// `origin` is the file position of the value's first character; occurrence
/// positions are reported in file coordinates.
pub fn occurrences(value: &str, origin: Position) -> Occurrences<'_> {
    Occurrences {
        inner: LineToken::lexer(value),
        origin,
        cursor: Position::default(),
    }
}

/// Character an escape sequence `\c` stands for, or `None` for sequences
/// that are kept as written.
pub fn decode_escape(c: char) -> Option<char> {
    let decoded = match c {
        '\\' | '\'' | '"' | '$' | '{' | '}' => c,
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0B}',
        _ => return None,
    };
    Some(decoded)
}

/// Protect literal text so that splicing it into a value and decoding
/// escapes afterwards yields the text unchanged.
pub fn escape_literal(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '$']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 4);
    for ch in text.chars() {
        if matches!(ch, '\\' | '$') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

/// Escape every `$` and lone `\` that is not already part of an escape
/// sequence, leaving existing escapes as written.
///
/// Text treated this way can be lexed again next to other text without a
/// stray `$` starting a new reference, and decodes back to what it was.
pub fn escape_bare(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '$']) {
        return Cow::Borrowed(text);
    }
    let mut lexer = LineToken::lexer(text);
    let mut escaped = String::with_capacity(text.len() + 4);
    while let Some(token) = lexer.next() {
        match token {
            Ok(LineToken::BoundedVar | LineToken::UnboundedVar | LineToken::Dollar | LineToken::Backslash) => {
                escaped.push('\\');
            }
            Ok(LineToken::Escape | LineToken::Text) | Err(()) => {}
        }
        escaped.push_str(lexer.slice());
    }
    Cow::Owned(escaped)
}
