//! ML Parser AST
//!
//! Element tree of a template fragment. Nodes keep their source spans; the
//! tree is only ever read; edits go through [`super::serializer::TextEdit`].

use crate::parse_util::ParseSourceSpan;

/// Node type union
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
    DocType(DocType),
}

impl Node {
    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            Node::Element(el) => &el.source_span,
            Node::Text(text) => &text.source_span,
            Node::Comment(comment) => &comment.source_span,
            Node::DocType(doc_type) => &doc_type.source_span,
        }
    }
}

/// Text node (plain text, raw text and CDATA)
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

/// Comment node
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

/// `<!...>` and `<?...>` declarations
#[derive(Debug, Clone, PartialEq)]
pub struct DocType {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

/// Attribute node
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    /// Raw value text; `None` for a bare attribute such as `required`.
    pub value: Option<String>,
    /// Whole attribute, from the first character of the name to the end of the value.
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

impl Attribute {
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// Element node
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub is_self_closing: bool,
    pub is_void: bool,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
}

impl Element {
    /// Attribute lookup; HTML attribute names are case-insensitive.
    pub fn get_attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.get_attr(name).map(Attribute::value_or_empty)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.attr_value("class")
            .unwrap_or("")
            .split_ascii_whitespace()
    }

    /// Source offset where a new attribute can be appended to the start tag.
    pub fn attr_insertion_offset(&self) -> usize {
        match self.attrs.last() {
            Some(attr) => attr.source_span.end.offset,
            None => self.start_source_span.start.offset + 1 + self.name.len(),
        }
    }
}

/// Every element in `nodes`, depth-first in document order.
pub fn all_elements(nodes: &[Node]) -> Vec<&Element> {
    let mut elements = Vec::new();
    collect_elements(nodes, &mut elements);
    elements
}

fn collect_elements<'a>(nodes: &'a [Node], elements: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(el) = node {
            elements.push(el);
            collect_elements(&el.children, elements);
        }
    }
}
