//! Layout composition - puts literal characters back around resolved values
//!
//! A template word such as `(postcode)` or `firstname-lastname` holds
//! punctuation that belongs to the layout. After resolution, the first token
//! of each word takes the whole word with every token replaced by its
//! value:
//!
//! ```text
//! (firstname)          firstname => "(Presta)"
//! firstname-lastname   firstname => "Presta-Shop", lastname => ""
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::parser::{lex_line, Piece};

/// Compose the resolved values of one template line in place
///
/// Words are separated by single spaces. A word whose tokens all resolved
/// empty composes to the empty string, so its punctuation is dropped with
/// it. Values are read as they were before this line was composed.
pub fn compose_line(values: &mut BTreeMap<String, String>, line: &str, tokens_in_line: &[&str]) {
    if tokens_in_line.is_empty() {
        return;
    }

    let resolved: HashMap<&str, String> = tokens_in_line
        .iter()
        .map(|token| (*token, values.get(*token).cloned().unwrap_or_default()))
        .collect();

    for word in line.split(' ') {
        let mut main: Option<&str> = None;
        let mut composed = String::new();
        let mut has_value = false;

        for (piece, _, text) in lex_line(word) {
            let value = match piece {
                Piece::Field => resolved.get(text),
                Piece::Literal => None,
            };
            let Some(value) = value else {
                composed.push_str(text);
                continue;
            };

            has_value |= !value.is_empty();
            composed.push_str(value);
            match main {
                None => main = Some(text),
                Some(first) if first != text => {
                    values.insert(text.to_string(), String::new());
                }
                Some(_) => {}
            }
        }

        if let Some(main) = main {
            if !has_value {
                composed.clear();
            }
            values.insert(main.to_string(), composed);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parser::tokenize;

    fn compose(line: &str, resolved: &[(&str, &str)]) -> BTreeMap<String, String> {
        let mut values: BTreeMap<String, String> = resolved
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        compose_line(&mut values, line, &tokenize(line));
        values
    }

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_words_unchanged() {
        let values = compose("firstname lastname", &[("firstname", "Presta"), ("lastname", "Shop")]);
        assert_eq!(values, map(&[("firstname", "Presta"), ("lastname", "Shop")]));
    }

    #[test]
    fn test_affixes_kept_in_place() {
        let values = compose("(firstname) lastname", &[("firstname", "Presta"), ("lastname", "Shop")]);
        assert_eq!(values, map(&[("firstname", "(Presta)"), ("lastname", "Shop")]));
    }

    #[test]
    fn test_prefix_and_suffix() {
        let values = compose("city, -postcode", &[("city", "Paris"), ("postcode", "75008")]);
        assert_eq!(values, map(&[("city", "Paris,"), ("postcode", "-75008")]));
    }

    #[test]
    fn test_tokens_sharing_a_word() {
        let values = compose(
            "(firstname-lastname) city",
            &[("firstname", "Presta"), ("lastname", "Shop"), ("city", "Paris")],
        );
        assert_eq!(
            values,
            map(&[("firstname", "(Presta-Shop)"), ("lastname", ""), ("city", "Paris")])
        );
    }

    #[test]
    fn test_empty_word_drops_punctuation() {
        let values = compose("(company) city", &[("company", ""), ("city", "Paris")]);
        assert_eq!(values, map(&[("company", ""), ("city", "Paris")]));
    }

    #[test]
    fn test_related_token_affix() {
        let values = compose("[Country:name]", &[("Country:name", "France")]);
        assert_eq!(values, map(&[("Country:name", "[France]")]));
    }

    #[test]
    fn test_repeated_spaces() {
        let values = compose("  firstname   (city)", &[("firstname", "Presta"), ("city", "Paris")]);
        assert_eq!(values, map(&[("firstname", "Presta"), ("city", "(Paris)")]));
    }
}
