//! Per-country address layout templates
//!
//! Templates live in an external store keyed by country id. Lookups always
//! fall back to the default country's template, and an empty template is a
//! valid, empty layout.
//!
//! # Example
//!
//! ```rust
//! use address_format::store::MemoryStore;
//! use address_format::template::{ordered_fields, FieldView};
//!
//! let store = MemoryStore::new(8).with_format(8, "firstname lastname\n(postcode) city");
//!
//! // Country 21 has no format of its own and uses the default country's
//! let lines = ordered_fields(&store, 21, FieldView::CleanedLines);
//! assert_eq!(lines, vec!["firstname lastname", "postcode city"]);
//! ```

mod cache;

use crate::parser::{clean_line, tokenize};
use crate::schema::CountryId;

pub use cache::TemplateCache;

/// Read access to stored address formats
pub trait TemplateStore {
    /// Raw template text stored for a country, if any
    fn format(&self, country: CountryId) -> Option<String>;

    /// Country whose template is used when a country has none
    fn default_country_id(&self) -> CountryId;
}

/// Write access to stored address formats
pub trait TemplateWriter: TemplateStore {
    fn set_format(&mut self, country: CountryId, format: String);
}

impl<T: TemplateStore + ?Sized> TemplateStore for &T {
    fn format(&self, country: CountryId) -> Option<String> {
        (**self).format(country)
    }

    fn default_country_id(&self) -> CountryId {
        (**self).default_country_id()
    }
}

/// How [`ordered_fields`] presents a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldView {
    /// Each line, trimmed
    #[default]
    Lines,
    /// Each line reduced to its tokens joined by single spaces
    CleanedLines,
    /// Every space-separated word of every line, punctuation kept
    Words,
    /// Every token of every line
    Tokens,
}

impl FieldView {
    /// Pick a view from the split-all / cleaned flag pair
    pub fn from_flags(split_all: bool, cleaned: bool) -> Self {
        match (split_all, cleaned) {
            (false, false) => FieldView::Lines,
            (false, true) => FieldView::CleanedLines,
            (true, false) => FieldView::Words,
            (true, true) => FieldView::Tokens,
        }
    }
}

/// Stored format for a country, trimmed, with blank formats treated as absent
fn stored_format<S: TemplateStore + ?Sized>(store: &S, country: CountryId) -> Option<String> {
    store
        .format(country)
        .map(|format| format.trim().to_string())
        .filter(|format| !format.is_empty())
}

/// Template for a country, falling back to the default country's template
pub fn country_format<S: TemplateStore + ?Sized>(store: &S, country: CountryId) -> String {
    if let Some(format) = stored_format(store, country) {
        return format;
    }

    let default_country = store.default_country_id();
    tracing::debug!(country, default_country, "no address format stored, using default country");
    if default_country == country {
        return String::new();
    }
    stored_format(store, default_country).unwrap_or_default()
}

/// Template for a country split into ordered fields
pub fn ordered_fields<S: TemplateStore + ?Sized>(
    store: &S,
    country: CountryId,
    view: FieldView,
) -> Vec<String> {
    let format = country_format(store, country);
    let lines = format.lines().map(str::trim);

    match view {
        FieldView::Lines => lines.map(str::to_string).collect(),
        FieldView::CleanedLines => lines.map(clean_line).collect(),
        FieldView::Words => lines
            .flat_map(|line| line.split(' '))
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect(),
        FieldView::Tokens => lines.flat_map(tokenize).map(str::to_string).collect(),
    }
}
