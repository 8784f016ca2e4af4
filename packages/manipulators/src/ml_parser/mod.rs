//! ML (Markup Language) Parser Module
//!
//! Tokenizes and parses field template fragments into an element tree, and
//! writes attribute edits back into the original source.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod serializer;
pub mod tags;
pub mod tokens;

pub use ast::*;
pub use lexer::{tokenize, TokenizeResult};
pub use parser::{ParseTreeResult, Parser};
pub use serializer::{apply_edits, serialize_attribute, TextEdit};
pub use tags::*;
pub use tokens::*;
