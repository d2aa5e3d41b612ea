//! Per-token styles: printf-style format strings such as `<b>%s</b>`
//!
//! A format string is parsed once when the style is built. Supported
//! directives are `%s` with optional flags (`-` left-aligns, `0`, space or
//! `'c` set the pad character), an optional width and an optional
//! `.precision` that truncates the value, plus `%%` for a literal percent.

use std::collections::HashMap;

use chumsky::prelude::*;

use crate::error::ConfigError;

/// One flag of a `%s` directive
#[derive(Debug, Clone, Copy, PartialEq)]
enum Flag {
    LeftAlign,
    Pad(char),
}

/// A parsed `%s` directive
#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    left_align: bool,
    pad: char,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Directive {
    fn apply(&self, value: &str, out: &mut String) {
        let truncated: String = match self.precision {
            Some(precision) => value.chars().take(precision).collect(),
            None => value.to_string(),
        };
        let padding = self
            .width
            .map(|width| width.saturating_sub(truncated.chars().count()))
            .unwrap_or(0);
        let pad = std::iter::repeat(self.pad).take(padding);

        if self.left_align {
            out.push_str(&truncated);
            out.extend(pad);
        } else {
            out.extend(pad);
            out.push_str(&truncated);
        }
    }
}

/// A piece of a format string
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Value(Directive),
}

/// A parsed format string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    segments: Vec<Segment>,
}

impl FormatSpec {
    /// Parse a format string, reporting the first problem
    pub fn parse(source: &str) -> Result<Self, String> {
        format_parser()
            .parse(source)
            .into_result()
            .map(|segments| FormatSpec { segments })
            .map_err(|errs| {
                errs.into_iter()
                    .next()
                    .map(|e| format!("{} at {:?}", e, e.span().into_range()))
                    .unwrap_or_else(|| "invalid format string".to_string())
            })
    }

    /// Substitute `value` into every directive
    pub fn apply(&self, value: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Value(directive) => directive.apply(value, &mut out),
            }
        }
        out
    }
}

fn format_parser<'a>() -> impl Parser<'a, &'a str, Vec<Segment>, extra::Err<Rich<'a, char>>> {
    let number = one_of("0123456789")
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|digits: String, span| {
            digits
                .parse::<usize>()
                .map_err(|e| Rich::custom(span, e.to_string()))
        });

    let flag = choice((
        just('-').to(Flag::LeftAlign),
        just('0').to(Flag::Pad('0')),
        just(' ').to(Flag::Pad(' ')),
        just('\'').ignore_then(any()).map(Flag::Pad),
    ));

    let directive = just('%')
        .ignore_then(flag.repeated().collect::<Vec<_>>())
        .then(number.clone().or_not())
        .then(just('.').ignore_then(number).or_not())
        .then_ignore(just('s'))
        .map(|((flags, width), precision)| {
            let mut directive = Directive {
                left_align: false,
                pad: ' ',
                width,
                precision,
            };
            for flag in flags {
                match flag {
                    Flag::LeftAlign => directive.left_align = true,
                    Flag::Pad(c) => directive.pad = c,
                }
            }
            Segment::Value(directive)
        });

    let percent = just("%%").to(Segment::Literal("%".to_string()));

    let literal = none_of("%")
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(Segment::Literal);

    choice((literal, percent, directive))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
}

/// Format strings keyed by token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    formats: HashMap<String, FormatSpec>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a style from raw format strings, rejecting any that do not parse
    pub fn from_map<I, K, V>(formats: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut style = Style::new();
        for (token, format) in formats {
            style = style.with(token, format.as_ref())?;
        }
        Ok(style)
    }

    /// Add the format string of one token
    pub fn with(mut self, token: impl Into<String>, format: &str) -> Result<Self, ConfigError> {
        let token = token.into();
        let spec = FormatSpec::parse(format).map_err(|message| ConfigError::InvalidStyle {
            token: token.clone(),
            message,
        })?;
        self.formats.insert(token, spec);
        Ok(self)
    }

    pub fn get(&self, token: &str) -> Option<&FormatSpec> {
        self.formats.get(token)
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Format a value for a token, unchanged when the token has no style
    pub fn apply(&self, token: &str, value: &str) -> String {
        match self.get(token) {
            Some(spec) => spec.apply(value),
            None => value.to_string(),
        }
    }
}
