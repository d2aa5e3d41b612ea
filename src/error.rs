//! Error types for template validation and loading

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use thiserror::Error;

pub use crate::parser::Span;

/// A problem found while validating a layout template
///
/// Validation never stops at the first problem; these are collected into a
/// list covering the whole template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("this key has already been used: {token}")]
    DuplicateKey { token: String, span: Span },

    #[error("this association has too many elements: {token}")]
    TooManyElements { token: String, span: Span },

    #[error("syntax error with this pattern: {token}")]
    Syntax { token: String, span: Span },

    /// Forbidden property or class
    #[error("this name is not allowed: {name}")]
    ForbiddenName { name: String, span: Span },

    #[error("this class name does not exist: {class}")]
    UnknownClass { class: String, span: Span },

    /// Field missing from the class, or an identifier where none is allowed
    #[error("this property does not exist in the class or is forbidden: {class}: {field}")]
    UnknownField {
        class: String,
        field: String,
        span: Span,
    },

    /// The address has no `id_<class>` field linking it to the class
    #[error("the address has no reference field {field} for class {class}")]
    MissingReference {
        class: String,
        field: String,
        span: Span,
    },
}

impl ValidationError {
    /// Byte range of the offending token in the template
    pub fn span(&self) -> &Span {
        match self {
            Self::DuplicateKey { span, .. }
            | Self::TooManyElements { span, .. }
            | Self::Syntax { span, .. }
            | Self::ForbiddenName { span, .. }
            | Self::UnknownClass { span, .. }
            | Self::UnknownField { span, .. }
            | Self::MissingReference { span, .. } => span,
        }
    }

    /// Short kind name, stable across message wording changes
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => "duplicate-key",
            Self::TooManyElements { .. } => "too-many-elements",
            Self::Syntax { .. } => "syntax",
            Self::ForbiddenName { .. } => "forbidden-name",
            Self::UnknownClass { .. } => "unknown-class",
            Self::UnknownField { .. } => "unknown-field",
            Self::MissingReference { .. } => "missing-reference",
        }
    }

    /// Format the error with template context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let span = self.span().clone();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_config(Config::default().with_color(false))
            .with_code(self.kind())
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Format a list of validation errors against the template they came from
pub fn format_validation_errors(errors: &[ValidationError], source: &str, filename: &str) -> String {
    errors
        .iter()
        .map(|e| e.format(source, filename))
        .collect::<Vec<_>>()
        .join("")
}

/// Errors loading address data
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read address data file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to parse address data TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Errors loading render configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid style for '{token}': {message}")]
    InvalidStyle { token: String, message: String },
}

/// A template update rejected by validation
#[derive(Error, Debug)]
#[error("address format rejected: {}", format_errors(.errors))]
pub struct UpdateError {
    pub errors: Vec<ValidationError>,
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ValidationError::DuplicateKey {
            token: "city".to_string(),
            span: 0..4,
        };
        assert_eq!(err.to_string(), "this key has already been used: city");

        let err = ValidationError::UnknownField {
            class: "Country".to_string(),
            field: "planet".to_string(),
            span: 0..14,
        };
        assert!(err.to_string().contains("Country: planet"));
    }

    #[test]
    fn test_format_includes_source_line() {
        let source = "firstname lastname\ncity city";
        let err = ValidationError::DuplicateKey {
            token: "city".to_string(),
            span: 24..28,
        };
        let report = err.format(source, "format.txt");
        assert!(report.contains("duplicate-key"));
        assert!(report.contains("city city"));
    }

    #[test]
    fn test_update_error_lists_all() {
        let err = UpdateError {
            errors: vec![
                ValidationError::Syntax {
                    token: "Country:".to_string(),
                    span: 0..8,
                },
                ValidationError::UnknownClass {
                    class: "Planet".to_string(),
                    span: 9..20,
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("Country:"));
        assert!(msg.contains("Planet"));
    }
}
