//! Address text generation

use std::collections::BTreeMap;

use crate::parser::tokenize;
use crate::schema::{Entity, EntityKind};
use crate::store::EntityStore;
use crate::template::{ordered_fields, FieldView, TemplateStore};

use super::config::RenderConfig;
use super::resolve::RenderContext;

/// Render the formatted text of an address
///
/// The layout is the template of the address's country (or of the default
/// country). Returns the empty string when there is no address or the
/// entity is not an address.
pub fn generate<T, E>(templates: &T, entities: &E, address: Option<&Entity>, config: &RenderConfig) -> String
where
    T: TemplateStore + ?Sized,
    E: EntityStore + ?Sized,
{
    let Some(address) = address.filter(|a| a.kind == EntityKind::Address) else {
        tracing::debug!("no address to render");
        return String::new();
    };

    let country = address.reference(EntityKind::Country).unwrap_or(0);
    let lines = ordered_fields(templates, country, FieldView::Lines);
    let mut ctx = RenderContext::new(address, lines, entities, config.lang);
    let values = ctx.formatted_values();

    let text = render_lines(&ctx.lines, &values, config);
    tracing::debug!(
        address = address.id,
        country,
        lines = ctx.lines.len(),
        related = ctx.related().fetched_kinds(),
        "rendered address"
    );
    text
}

/// Join the composed values of each line into the final text
pub fn render_lines(lines: &[String], values: &BTreeMap<String, String>, config: &RenderConfig) -> String {
    let mut text = String::new();

    for line in lines {
        let mut line_text = String::new();
        for token in tokenize(line) {
            if config.is_avoided(token) {
                continue;
            }
            match values.get(token) {
                Some(value) if !value.is_empty() => {
                    line_text.push_str(&config.style.apply(token, value));
                    line_text.push_str(&config.separator);
                }
                _ => {}
            }
        }

        let line_text = trim_end_pattern(&line_text, &config.separator).trim();
        if !line_text.is_empty() {
            text.push_str(line_text);
            text.push_str(&config.newline);
        }
    }

    trim_output(&text, config).to_string()
}

/// Strip trailing newlines and separator characters until neither is left
fn trim_output<'a>(text: &'a str, config: &RenderConfig) -> &'a str {
    let mut text = text;
    loop {
        let trimmed = trim_end_pattern(text, &config.newline)
            .trim_end_matches(|c: char| config.separator.contains(c));
        if trimmed.len() == text.len() {
            return trimmed;
        }
        text = trimmed;
    }
}

/// Strip every trailing repetition of `pattern`
fn trim_end_pattern<'a>(text: &'a str, pattern: &str) -> &'a str {
    if pattern.is_empty() {
        text
    } else {
        text.trim_end_matches(pattern)
    }
}
