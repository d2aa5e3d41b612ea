//! Lexer for address layout templates using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A piece of a template line.
///
/// Every character of a line belongs to exactly one piece, so concatenating
/// the slices of all pieces gives back the original line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    /// Field reference such as `firstname` or `Country:name`
    #[regex(r"[A-Za-z0-9_:]+")]
    Field,

    /// Literal text between fields: spaces, punctuation, anything else
    #[regex(r"[^A-Za-z0-9_:]+")]
    Literal,
}

/// Lex a line into pieces with their spans and source slices
pub fn lex_line(line: &str) -> impl Iterator<Item = (Piece, Span, &str)> + '_ {
    Piece::lexer(line)
        .spanned()
        .filter_map(move |(piece, span)| piece.ok().map(|p| (p, span.clone(), &line[span])))
}

/// Field tokens of a line with their spans, in order
pub fn tokens_with_spans(line: &str) -> impl Iterator<Item = (&str, Span)> + '_ {
    lex_line(line).filter_map(|(piece, span, text)| match piece {
        Piece::Field => Some((text, span)),
        Piece::Literal => None,
    })
}

/// Split a template line into its field tokens, discarding delimiters
pub fn tokenize(line: &str) -> Vec<&str> {
    tokens_with_spans(line).map(|(token, _)| token).collect()
}

/// Normalize a line to its tokens joined by single spaces
pub fn clean_line(line: &str) -> String {
    tokenize(line).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple_line() {
        assert_eq!(tokenize("firstname lastname"), vec!["firstname", "lastname"]);
    }

    #[test]
    fn test_tokenize_related_field() {
        assert_eq!(tokenize("city Country:name"), vec!["city", "Country:name"]);
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(
            tokenize("(firstname), lastname - company"),
            vec!["firstname", "lastname", "company"]
        );
    }

    #[test]
    fn test_tokenize_empty_and_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  -- ,, ").is_empty());
    }

    #[test]
    fn test_tokenize_non_ascii_is_delimiter() {
        assert_eq!(tokenize("city·postcode"), vec!["city", "postcode"]);
    }

    #[test]
    fn test_spans_point_into_line() {
        let line = " (firstname) lastname";
        let spans: Vec<_> = tokens_with_spans(line).collect();
        assert_eq!(spans, vec![("firstname", 2..11), ("lastname", 13..21)]);
    }

    #[test]
    fn test_lex_line_covers_whole_line() {
        let line = "<postcode>, city";
        let rebuilt: String = lex_line(line).map(|(_, _, text)| text).collect();
        assert_eq!(rebuilt, line);
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("  (firstname)  lastname, "), "firstname lastname");
        assert_eq!(clean_line("---"), "");
    }

    #[test]
    fn test_clean_line_idempotent() {
        for line in ["a-b c", "  Country:name  (city)", ",;", "x:y:z  __q"] {
            let once = clean_line(line);
            assert_eq!(clean_line(&once), once);
        }
    }
}
