//! Parser for the address layout template language

pub mod field;
pub mod lexer;

pub use field::{capitalize, FieldRef, RefSyntax};
pub use lexer::{clean_line, lex_line, tokenize, tokens_with_spans, Piece, Span};

/// Iterate the lines of a template together with the byte offset of each line
///
/// Lines are separated by `\n`; a trailing `\r` stays part of the line and is
/// treated as a delimiter by the lexer.
pub fn lines_with_offsets(template: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut offset = 0;
    template.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line)
    })
}
