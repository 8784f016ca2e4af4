//! HTML tag classification needed to build a fragment tree.

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is not parsed as markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Elements whose end tag may be omitted.
const OPTIONAL_END_TAG_ELEMENTS: &[&str] = &[
    "li", "dt", "dd", "p", "rt", "rp", "optgroup", "option", "thead", "tbody", "tfoot", "tr",
    "td", "th",
];

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

pub fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

pub fn has_optional_end_tag(name: &str) -> bool {
    OPTIONAL_END_TAG_ELEMENTS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(name))
}
