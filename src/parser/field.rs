//! Field references extracted from template tokens

use std::fmt;

/// A field reference as written in a template token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    /// Field of the address itself, e.g. `firstname`
    Simple(&'a str),
    /// Field of an entity linked to the address, e.g. `Country:name`
    Related { class: &'a str, field: &'a str },
}

/// Structural problems with a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefSyntax {
    /// More than one `:` separator
    TooManyElements,
    /// `Class:` or `:field`
    EmptySegment,
}

impl<'a> FieldRef<'a> {
    /// Classify a token by its `:`-separated parts
    pub fn parse(token: &'a str) -> Result<Self, RefSyntax> {
        let token = token.trim();
        let mut parts = token.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (_, _, Some(_)) => Err(RefSyntax::TooManyElements),
            (Some(class), Some(field), None) => {
                if class.is_empty() || field.is_empty() {
                    Err(RefSyntax::EmptySegment)
                } else {
                    Ok(FieldRef::Related { class, field })
                }
            }
            (Some(field), None, None) => Ok(FieldRef::Simple(field)),
            (None, _, _) => Err(RefSyntax::EmptySegment),
        }
    }

    /// Name of the referenced field
    pub fn field(&self) -> &'a str {
        match self {
            FieldRef::Simple(field) | FieldRef::Related { field, .. } => field,
        }
    }
}

impl fmt::Display for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Simple(field) => write!(f, "{}", field),
            FieldRef::Related { class, field } => write!(f, "{}:{}", class, field),
        }
    }
}

/// Upper-case the first character, leaving the rest untouched
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
