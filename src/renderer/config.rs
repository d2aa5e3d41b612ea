//! Configuration for address text rendering

use std::collections::HashSet;

use crate::schema::LangId;

use super::style::Style;

/// Configuration options for [`generate`](super::generate)
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Appended after every non-empty line except the last
    pub newline: String,

    /// Appended after every non-empty value within a line
    pub separator: String,

    /// Tokens left out of the output
    pub avoid: HashSet<String>,

    /// Per-token format strings
    pub style: Style,

    /// Language used for per-language values
    pub lang: LangId,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            newline: "\r\n".to_string(),
            separator: " ".to_string(),
            avoid: HashSet::new(),
            style: Style::default(),
            lang: 1,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line break
    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    /// Set the separator between values
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Leave a token out of the output
    pub fn with_avoid(mut self, token: impl Into<String>) -> Self {
        self.avoid.insert(token.into());
        self
    }

    /// Set the per-token style
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the language
    pub fn with_lang(mut self, lang: LangId) -> Self {
        self.lang = lang;
        self
    }

    pub fn is_avoided(&self, token: &str) -> bool {
        self.avoid.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.newline, "\r\n");
        assert_eq!(config.separator, " ");
        assert!(config.avoid.is_empty());
        assert!(config.style.is_empty());
        assert_eq!(config.lang, 1);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RenderConfig::new()
            .with_newline("<br />")
            .with_separator(", ")
            .with_avoid("Country:name")
            .with_lang(2);

        assert_eq!(config.newline, "<br />");
        assert_eq!(config.separator, ", ");
        assert!(config.is_avoided("Country:name"));
        assert!(!config.is_avoided("city"));
        assert_eq!(config.lang, 2);
    }
}
