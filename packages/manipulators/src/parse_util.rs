//! Parse Utilities
//!
//! Source locations, spans and parse errors for markup fragments.

use crate::chars;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: String, url: String) -> Self {
        ParseSourceFile { content, url }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseLocation {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { offset, line, col }
    }

    /// Location just past `ch`.
    pub fn advance(self, ch: char) -> ParseLocation {
        if ch == chars::NEWLINE {
            ParseLocation::new(self.offset + ch.len_utf8(), self.line + 1, 0)
        } else {
            ParseLocation::new(self.offset + ch.len_utf8(), self.line, self.col + 1)
        }
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }

    /// The source text covered by this span.
    pub fn text<'a>(&self, content: &'a str) -> &'a str {
        &content[self.start.offset..self.end.offset]
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Error,
        }
    }

    /// Message with up to `max_chars` of surrounding source on each side.
    pub fn contextual_message(&self, file: &ParseSourceFile, max_chars: usize) -> String {
        let content = &file.content;
        let offset = self.span.start.offset.min(content.len());

        let before_start = content[..offset]
            .char_indices()
            .rev()
            .take(max_chars)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(offset);
        let after_end = content[offset..]
            .char_indices()
            .take(max_chars)
            .last()
            .map(|(i, c)| offset + i + c.len_utf8())
            .unwrap_or(offset);

        let level_str = match self.level {
            ParseErrorLevel::Warning => "WARNING",
            ParseErrorLevel::Error => "ERROR",
        };
        format!(
            "{} (\"{}[{} ->]{}\"): {}@{}",
            self.msg,
            &content[before_start..offset],
            level_str,
            &content[offset..after_end],
            file.url,
            self.span.start
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.msg, self.span.start)
    }
}
