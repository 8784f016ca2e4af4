/*
 * Character Codes
 *
 * Characters the markup fragment lexer branches on.
 */

// Special characters
pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const NEWLINE: char = '\n';
pub const VTAB: char = '\x0B';
pub const FF: char = '\x0C';
pub const RETURN: char = '\r';
pub const SPACE: char = ' ';

// Punctuation
pub const BANG: char = '!';
pub const DQ: char = '"';
pub const SQ: char = '\'';
pub const SLASH: char = '/';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const QUESTION: char = '?';

/// Check if character is whitespace
pub fn is_whitespace(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == NEWLINE || ch == RETURN || ch == VTAB || ch == FF
}

/// Check if character is ASCII letter
pub fn is_ascii_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Check if character is a quote
pub fn is_quote(ch: char) -> bool {
    ch == SQ || ch == DQ
}

/// Characters that terminate a tag or attribute name
pub fn is_name_end(ch: char) -> bool {
    is_whitespace(ch)
        || ch == GT
        || ch == LT
        || ch == SLASH
        || ch == SQ
        || ch == DQ
        || ch == EQ
        || ch == EOF
}
