//! ML Parser Tokens

use crate::parse_util::ParseSourceSpan;
use serde::{Deserialize, Serialize};

/// Token types for fragment parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    TagOpenStart,
    TagOpenEnd,
    TagOpenEndVoid,
    TagClose,
    Text,
    RawText,
    Comment,
    Cdata,
    DocType,
    AttrName,
    AttrValue,
    Eof,
}

/// A lexed token.
///
/// `parts` holds the decoded pieces: the name for tag and attribute tokens,
/// `[value, quote]` for attribute values, the content for text-like tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub parts: Vec<String>,
    pub source_span: ParseSourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, parts: Vec<String>, source_span: ParseSourceSpan) -> Self {
        Token {
            token_type,
            parts,
            source_span,
        }
    }

    /// First part, or the empty string for tokens without parts.
    pub fn value(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or("")
    }
}
