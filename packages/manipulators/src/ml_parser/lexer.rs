//! ML Parser Lexer
//!
//! Fragment tokenizer - converts template source into tokens. Every token
//! carries the exact source span it was read from so that untouched markup
//! can be written back byte for byte.

use super::tags::is_raw_text_element;
use super::tokens::{Token, TokenType};
use crate::chars;
use crate::parse_util::{ParseError, ParseLocation, ParseSourceSpan};

/// Tokenization result
#[derive(Debug, Clone)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

/// Main tokenization function
pub fn tokenize(source: &str) -> TokenizeResult {
    let mut tokenizer = Tokenizer::new(source);
    tokenizer.tokenize();

    TokenizeResult {
        tokens: tokenizer.tokens,
        errors: tokenizer.errors,
    }
}

/// Default interpolation markers
const INTERPOLATION_START: &str = "{{";
const INTERPOLATION_END: &str = "}}";

/// Character cursor over the fragment source
struct Cursor<'a> {
    input: &'a str,
    location: ParseLocation,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            input,
            location: ParseLocation::default(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.location.offset..]
    }

    fn peek(&self) -> char {
        self.rest().chars().next().unwrap_or(chars::EOF)
    }

    fn peek_at(&self, n: usize) -> char {
        self.rest().chars().nth(n).unwrap_or(chars::EOF)
    }

    fn is_eof(&self) -> bool {
        self.location.offset >= self.input.len()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.rest().chars().next() {
            self.location = self.location.advance(ch);
        }
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    fn starts_with_ignore_case(&self, s: &str) -> bool {
        let rest = self.rest();
        rest.len() >= s.len()
            && rest.is_char_boundary(s.len())
            && rest[..s.len()].eq_ignore_ascii_case(s)
    }

    fn skip_whitespace(&mut self) {
        while chars::is_whitespace(self.peek()) {
            self.advance();
        }
    }

    fn slice_from(&self, start: ParseLocation) -> &'a str {
        &self.input[start.offset..self.location.offset]
    }

    fn span_from(&self, start: ParseLocation) -> ParseSourceSpan {
        ParseSourceSpan::new(start, self.location)
    }
}

struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str) -> Self {
        Tokenizer {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn tokenize(&mut self) {
        while !self.cursor.is_eof() {
            let start = self.cursor.location;
            let result = if self.cursor.starts_with("<!--") {
                self.consume_comment(start)
            } else if self.cursor.starts_with_ignore_case("<![CDATA[") {
                self.consume_cdata(start)
            } else if self.cursor.starts_with("<!") || self.cursor.starts_with("<?") {
                self.consume_doc_type(start)
            } else if self.cursor.starts_with("</") && chars::is_ascii_letter(self.cursor.peek_at(2))
            {
                self.consume_tag_close(start)
            } else if self.cursor.peek() == chars::LT
                && chars::is_ascii_letter(self.cursor.peek_at(1))
            {
                self.consume_tag_open(start)
            } else {
                self.consume_text(start);
                Ok(())
            };

            // A broken fragment is rejected as a whole, so stop at the first error.
            if let Err(error) = result {
                self.errors.push(error);
                break;
            }
        }

        let end = self.cursor.location;
        self.tokens.push(Token::new(
            TokenType::Eof,
            vec![],
            ParseSourceSpan::new(end, end),
        ));
    }

    fn push(&mut self, token_type: TokenType, parts: Vec<String>, start: ParseLocation) {
        let span = self.cursor.span_from(start);
        self.tokens.push(Token::new(token_type, parts, span));
    }

    fn error_here(&self, msg: impl Into<String>) -> ParseError {
        let here = self.cursor.location;
        ParseError::new(ParseSourceSpan::new(here, here), msg)
    }

    fn unexpected_char(&self) -> ParseError {
        let ch = self.cursor.peek();
        if ch == chars::EOF {
            self.error_here("Unexpected character \"EOF\"")
        } else {
            self.error_here(format!("Unexpected character \"{}\"", ch))
        }
    }

    /// Reads until `end`, consuming it. Returns the content before `end`.
    fn read_until(&mut self, end: &str) -> Result<&'a str, ParseError> {
        let content_start = self.cursor.location;
        while !self.cursor.starts_with(end) {
            if self.cursor.is_eof() {
                return Err(self.unexpected_char());
            }
            self.cursor.advance();
        }
        let content = self.cursor.slice_from(content_start);
        self.cursor.advance_by(end.chars().count());
        Ok(content)
    }

    fn consume_comment(&mut self, start: ParseLocation) -> Result<(), ParseError> {
        self.cursor.advance_by(4);
        let content = self.read_until("-->")?;
        self.push(TokenType::Comment, vec![content.to_string()], start);
        Ok(())
    }

    fn consume_cdata(&mut self, start: ParseLocation) -> Result<(), ParseError> {
        self.cursor.advance_by(9);
        let content = self.read_until("]]>")?;
        self.push(TokenType::Cdata, vec![content.to_string()], start);
        Ok(())
    }

    fn consume_doc_type(&mut self, start: ParseLocation) -> Result<(), ParseError> {
        self.cursor.advance_by(2);
        let content = self.read_until(">")?;
        self.push(TokenType::DocType, vec![content.to_string()], start);
        Ok(())
    }

    fn consume_name(&mut self) -> &'a str {
        let name_start = self.cursor.location;
        while !chars::is_name_end(self.cursor.peek()) {
            self.cursor.advance();
        }
        self.cursor.slice_from(name_start)
    }

    fn consume_tag_open(&mut self, start: ParseLocation) -> Result<(), ParseError> {
        self.cursor.advance();
        let name = self.consume_name();
        self.push(TokenType::TagOpenStart, vec![name.to_string()], start);

        loop {
            self.cursor.skip_whitespace();
            let end_start = self.cursor.location;

            if self.cursor.peek() == chars::GT {
                self.cursor.advance();
                self.push(TokenType::TagOpenEnd, vec![], end_start);
                break;
            }
            if self.cursor.starts_with("/>") {
                self.cursor.advance_by(2);
                self.push(TokenType::TagOpenEndVoid, vec![], end_start);
                return Ok(());
            }
            if self.cursor.peek() == chars::SLASH {
                // A stray slash inside a tag is ignored, as browsers do.
                self.cursor.advance();
                continue;
            }
            let ch = self.cursor.peek();
            if self.cursor.is_eof() || chars::is_quote(ch) || ch == chars::LT {
                return Err(self.unexpected_char());
            }
            self.consume_attribute()?;
        }

        if is_raw_text_element(name) {
            self.consume_raw_text(name);
        }
        Ok(())
    }

    fn consume_attribute(&mut self) -> Result<(), ParseError> {
        let name_start = self.cursor.location;
        // `=` cannot end the very first character, so `=foo` still yields a name.
        if self.cursor.peek() == chars::EQ {
            self.cursor.advance();
        }
        while !chars::is_name_end(self.cursor.peek()) {
            self.cursor.advance();
        }
        let name = self.cursor.slice_from(name_start);
        self.push(TokenType::AttrName, vec![name.to_string()], name_start);

        self.cursor.skip_whitespace();
        if self.cursor.peek() != chars::EQ {
            return Ok(());
        }
        self.cursor.advance();
        self.cursor.skip_whitespace();

        let value_start = self.cursor.location;
        let quote = self.cursor.peek();
        if chars::is_quote(quote) {
            self.cursor.advance();
            let content_start = self.cursor.location;
            while self.cursor.peek() != quote {
                if self.cursor.is_eof() {
                    return Err(self.error_here("Unterminated quoted attribute value"));
                }
                self.cursor.advance();
            }
            let value = self.cursor.slice_from(content_start);
            self.cursor.advance();
            self.push(
                TokenType::AttrValue,
                vec![value.to_string(), quote.to_string()],
                value_start,
            );
        } else {
            while !self.cursor.is_eof()
                && !chars::is_whitespace(self.cursor.peek())
                && self.cursor.peek() != chars::GT
            {
                self.cursor.advance();
            }
            let value = self.cursor.slice_from(value_start);
            self.push(
                TokenType::AttrValue,
                vec![value.to_string(), String::new()],
                value_start,
            );
        }
        Ok(())
    }

    fn consume_tag_close(&mut self, start: ParseLocation) -> Result<(), ParseError> {
        self.cursor.advance_by(2);
        let name = self.consume_name();
        self.cursor.skip_whitespace();
        if self.cursor.peek() != chars::GT {
            return Err(self.unexpected_char());
        }
        self.cursor.advance();
        self.push(TokenType::TagClose, vec![name.to_string()], start);
        Ok(())
    }

    /// Content of `<script>`, `<textarea>` and friends up to the matching close tag.
    fn consume_raw_text(&mut self, tag_name: &str) {
        let start = self.cursor.location;
        let close = format!("</{}", tag_name);
        while !self.cursor.is_eof() {
            if self.cursor.starts_with_ignore_case(&close)
                && chars::is_name_end(self.cursor.peek_at(close.chars().count()))
            {
                break;
            }
            self.cursor.advance();
        }
        let content = self.cursor.slice_from(start);
        if !content.is_empty() {
            self.push(TokenType::RawText, vec![content.to_string()], start);
        }
    }

    fn is_tag_start(&self) -> bool {
        if self.cursor.peek() != chars::LT {
            return false;
        }
        let next = self.cursor.peek_at(1);
        chars::is_ascii_letter(next)
            || next == chars::BANG
            || next == chars::QUESTION
            || (next == chars::SLASH && chars::is_ascii_letter(self.cursor.peek_at(2)))
    }

    fn consume_text(&mut self, start: ParseLocation) {
        let mut in_interpolation = false;
        loop {
            if self.cursor.starts_with(INTERPOLATION_START) {
                in_interpolation = true;
                self.cursor.advance_by(2);
            } else if in_interpolation && self.cursor.starts_with(INTERPOLATION_END) {
                in_interpolation = false;
                self.cursor.advance_by(2);
            } else {
                self.cursor.advance();
            }

            if self.cursor.is_eof() || (!in_interpolation && self.is_tag_start()) {
                break;
            }
        }
        let text = self.cursor.slice_from(start);
        self.push(TokenType::Text, vec![text.to_string()], start);
    }
}
