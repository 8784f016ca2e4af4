//! ML Parser
//!
//! Builds an element tree out of the lexer's token stream.

use super::ast::{Attribute, Comment, DocType, Element, Node, Text};
use super::lexer::tokenize;
use super::tags::{has_optional_end_tag, is_void_element};
use super::tokens::{Token, TokenType};
use crate::parse_util::{ParseError, ParseSourceFile, ParseSourceSpan};

/// Parse tree result
#[derive(Debug, Clone)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
    pub file: ParseSourceFile,
}

impl ParseTreeResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Fragment parser
#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Parse a template fragment
    ///
    /// # Arguments
    /// * `source` - template fragment
    /// * `url` - name used in error messages
    pub fn parse(&self, source: &str, url: &str) -> ParseTreeResult {
        let file = ParseSourceFile::new(source.to_string(), url.to_string());
        let tokenized = tokenize(source);

        let mut builder = TreeBuilder::new(tokenized.tokens);
        builder.build();

        let mut errors = tokenized.errors;
        errors.extend(builder.errors);

        ParseTreeResult {
            root_nodes: builder.root_nodes,
            errors,
            file,
        }
    }
}

struct TreeBuilder {
    tokens: Vec<Token>,
    index: usize,
    root_nodes: Vec<Node>,
    element_stack: Vec<Element>,
    errors: Vec<ParseError>,
}

impl TreeBuilder {
    fn new(tokens: Vec<Token>) -> Self {
        TreeBuilder {
            tokens,
            index: 0,
            root_nodes: Vec::new(),
            element_stack: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn peek_type(&self) -> TokenType {
        self.tokens
            .get(self.index)
            .map(|t| t.token_type)
            .unwrap_or(TokenType::Eof)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        self.index += 1;
        token
    }

    fn build(&mut self) {
        while let Some(token) = self.advance() {
            match token.token_type {
                TokenType::TagOpenStart => self.consume_start_tag(token),
                TokenType::TagClose => self.consume_end_tag(token),
                TokenType::Text | TokenType::RawText | TokenType::Cdata => {
                    self.add_node(Node::Text(Text {
                        value: token.value().to_string(),
                        source_span: token.source_span,
                    }))
                }
                TokenType::Comment => self.add_node(Node::Comment(Comment {
                    value: token.value().to_string(),
                    source_span: token.source_span,
                })),
                TokenType::DocType => self.add_node(Node::DocType(DocType {
                    value: token.value().to_string(),
                    source_span: token.source_span,
                })),
                TokenType::Eof => break,
                // Attribute and tag-end tokens are consumed with their start tag.
                _ => {}
            }
        }

        while let Some(el) = self.element_stack.pop() {
            if !has_optional_end_tag(&el.name) {
                self.errors.push(ParseError::new(
                    el.start_source_span,
                    format!("Unclosed element \"{}\"", el.name),
                ));
            }
            self.close_implicitly(el);
        }
    }

    fn consume_start_tag(&mut self, start: Token) {
        let name = start.value().to_string();
        let mut attrs = Vec::new();

        while self.peek_type() == TokenType::AttrName {
            if let Some(attr_name) = self.advance() {
                attrs.push(self.consume_attr(attr_name));
            }
        }

        let (is_self_closing, end) = match self.advance() {
            Some(token) if token.token_type == TokenType::TagOpenEndVoid => {
                (true, token.source_span.end)
            }
            Some(token) if token.token_type == TokenType::TagOpenEnd => {
                (false, token.source_span.end)
            }
            // The lexer already reported the broken tag.
            _ => return,
        };

        let start_source_span = ParseSourceSpan::new(start.source_span.start, end);
        let is_void = is_void_element(&name);
        let el = Element {
            name,
            attrs,
            children: Vec::new(),
            is_self_closing,
            is_void,
            source_span: start_source_span,
            start_source_span,
            end_source_span: None,
        };

        if is_self_closing || is_void {
            self.add_node(Node::Element(el));
        } else {
            self.element_stack.push(el);
        }
    }

    fn consume_attr(&mut self, name_token: Token) -> Attribute {
        let key_span = name_token.source_span;
        let mut source_span = key_span;
        let mut value = None;
        let mut value_span = None;

        if self.peek_type() == TokenType::AttrValue {
            if let Some(value_token) = self.advance() {
                source_span.end = value_token.source_span.end;
                value = Some(value_token.value().to_string());
                value_span = Some(value_token.source_span);
            }
        }

        Attribute {
            name: name_token.value().to_string(),
            value,
            source_span,
            key_span,
            value_span,
        }
    }

    fn consume_end_tag(&mut self, token: Token) {
        let name = token.value();

        if is_void_element(name) {
            self.errors.push(ParseError::new(
                token.source_span,
                format!("Void elements do not have end tags \"{}\"", name),
            ));
            return;
        }

        let Some(position) = self
            .element_stack
            .iter()
            .rposition(|el| el.name.eq_ignore_ascii_case(name))
        else {
            self.errors.push(ParseError::new(
                token.source_span,
                format!("Unexpected closing tag \"{}\"", name),
            ));
            return;
        };

        while self.element_stack.len() > position + 1 {
            if let Some(el) = self.element_stack.pop() {
                if !has_optional_end_tag(&el.name) {
                    self.errors.push(ParseError::new(
                        el.start_source_span,
                        format!("Unclosed element \"{}\"", el.name),
                    ));
                }
                self.close_implicitly(el);
            }
        }

        if let Some(mut el) = self.element_stack.pop() {
            el.source_span.end = token.source_span.end;
            el.end_source_span = Some(token.source_span);
            self.add_node(Node::Element(el));
        }
    }

    fn close_implicitly(&mut self, mut el: Element) {
        if let Some(last) = el.children.last() {
            el.source_span.end = last.source_span().end;
        }
        self.add_node(Node::Element(el));
    }

    fn add_node(&mut self, node: Node) {
        match self.element_stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root_nodes.push(node),
        }
    }
}
