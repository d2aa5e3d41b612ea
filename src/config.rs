//! Formatter configuration loaded from TOML
//!
//! ```toml
//! newline = "<br />"
//! separator = " "
//! avoid = ["phone"]
//! lang = 1
//!
//! [style]
//! lastname = "<strong>%s</strong>"
//!
//! [rules]
//! forbidden_classes = ["Manufacturer", "Supplier", "Warehouse"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::renderer::{RenderConfig, Style};
use crate::schema::{LangId, Rules};

/// TOML structure for deserializing a config file
#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlConfig {
    newline: Option<String>,
    separator: Option<String>,
    avoid: Vec<String>,
    lang: Option<LangId>,
    style: BTreeMap<String, String>,
    rules: Rules,
}

/// Render settings together with validation rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub render: RenderConfig,
    pub rules: Rules,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    ///
    /// Settings missing from the document keep their defaults.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;

        let mut render = RenderConfig::default().with_style(Style::from_map(parsed.style)?);
        if let Some(newline) = parsed.newline {
            render = render.with_newline(newline);
        }
        if let Some(separator) = parsed.separator {
            render = render.with_separator(separator);
        }
        if let Some(lang) = parsed.lang {
            render = render.with_lang(lang);
        }
        for token in parsed.avoid {
            render = render.with_avoid(token);
        }

        Ok(Config {
            render,
            rules: parsed.rules,
        })
    }
}
