//! Address Format - per-country postal address layouts
//!
//! This library validates address layout templates against a static entity
//! schema and renders addresses as text following the template of their
//! country.
//!
//! # Example
//!
//! ```rust
//! use address_format::{AddressFormatter, Entity, EntityKind, RenderConfig, Value};
//! use address_format::store::MemoryStore;
//!
//! let store = MemoryStore::new(8)
//!     .with_format(8, "firstname lastname\naddress1\ncity Country:name")
//!     .with_entity(Entity::new(EntityKind::Country, 8).with("name", Value::localized([(1, "France")])));
//!
//! let address = Entity::new(EntityKind::Address, 1)
//!     .with("firstname", "Presta")
//!     .with("lastname", "Shop")
//!     .with("address1", "1 Infinite Loop")
//!     .with("city", "Paris")
//!     .with("id_country", 8);
//!
//! let formatter = AddressFormatter::new(&store, &store);
//! let text = formatter.generate(Some(&address), &RenderConfig::default());
//! assert_eq!(text, "Presta Shop\r\n1 Infinite Loop\r\nParis France");
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod renderer;
pub mod schema;
pub mod store;
pub mod template;
pub mod validator;

use std::collections::BTreeMap;

pub use config::Config;
pub use error::{ConfigError, StoreError, UpdateError, ValidationError};
pub use renderer::{RenderConfig, Style};
pub use schema::{CountryId, Entity, EntityKind, LangId, Rules, Value};
pub use store::{EntityStore, MemoryStore};
pub use template::{FieldView, TemplateCache, TemplateStore, TemplateWriter};
pub use validator::Validator;

use renderer::RenderContext;

/// Everything an address form needs to lay out one address
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutData {
    /// Template lines of the address's country
    pub ordered: Vec<String>,
    /// Composed value of every token
    pub formatted: BTreeMap<String, String>,
    /// Raw public fields of the address
    pub object: BTreeMap<String, Value>,
}

/// Address formatting over a template store and an entity store
///
/// The two stores may be the same value; pass references to share one.
#[derive(Debug, Clone)]
pub struct AddressFormatter<T, E> {
    templates: T,
    entities: E,
    validator: Validator,
}

impl<T: TemplateStore, E: EntityStore> AddressFormatter<T, E> {
    /// Create a formatter with the default validation rules
    pub fn new(templates: T, entities: E) -> Self {
        Self {
            templates,
            entities,
            validator: Validator::new(),
        }
    }

    /// Replace the validation rules
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.validator = Validator::with_rules(rules);
        self
    }

    pub fn templates(&self) -> &T {
        &self.templates
    }

    pub fn entities(&self) -> &E {
        &self.entities
    }

    pub fn rules(&self) -> &Rules {
        self.validator.rules()
    }

    /// Render an address as text; `None` renders as the empty string
    pub fn generate(&self, address: Option<&Entity>, config: &RenderConfig) -> String {
        renderer::generate(&self.templates, &self.entities, address, config)
    }

    /// Check a template, returning every problem found
    pub fn validate(&self, format: &str) -> Vec<ValidationError> {
        self.validator.validate(format)
    }

    /// Template lines of a country, falling back to the default country
    pub fn ordered_fields(&self, country: CountryId, view: FieldView) -> Vec<String> {
        template::ordered_fields(&self.templates, country, view)
    }

    /// Resolve and compose every token of `lines` for an address
    pub fn formatted_values(&self, address: &Entity, lines: &[String], lang: LangId) -> BTreeMap<String, String> {
        RenderContext::new(address, lines.to_vec(), &self.entities, lang).formatted_values()
    }

    /// Lines, composed values and raw fields of an address
    ///
    /// Returns `None` when there is no address or the entity is not an
    /// address.
    pub fn layout_data(&self, address: Option<&Entity>, lang: LangId) -> Option<LayoutData> {
        let address = address.filter(|a| a.kind == EntityKind::Address)?;
        let country = address.reference(EntityKind::Country).unwrap_or(0);
        let ordered = self.ordered_fields(country, FieldView::Lines);
        let formatted = self.formatted_values(address, &ordered, lang);
        let object = address
            .fields
            .iter()
            .filter(|(name, _)| address.kind.has_field(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Some(LayoutData {
            ordered,
            formatted,
            object,
        })
    }

    /// Fields of `kind` that may be offered to template editors
    pub fn formattable_fields(&self, kind: EntityKind) -> Vec<&'static str> {
        self.rules().formattable_fields(kind)
    }

    /// Kinds a template may reference from `kind` with `Class:field`
    pub fn related_classes(&self, kind: EntityKind) -> Vec<EntityKind> {
        self.rules().related_classes(kind)
    }

    /// Fields an address form must ask for
    pub fn required_fields(&self) -> Vec<String> {
        self.rules().required_fields()
    }
}

impl<T: TemplateWriter, E: EntityStore> AddressFormatter<T, E> {
    /// Validate and store the template of a country
    ///
    /// An invalid template is rejected with every error found and the
    /// stored template is left as it was.
    pub fn update_format(&mut self, country: CountryId, format: &str) -> Result<(), UpdateError> {
        let errors = self.validate(format);
        if !errors.is_empty() {
            tracing::warn!(country, errors = errors.len(), "rejected address format");
            return Err(UpdateError { errors });
        }

        self.templates.set_format(country, format.to_string());
        tracing::debug!(country, "updated address format");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(8)
            .with_format(8, "firstname lastname\n(postcode) city\nCountry:name")
            .with_entity(Entity::new(EntityKind::Country, 8).with("name", Value::localized([(1, "France")])))
    }

    fn address() -> Entity {
        Entity::new(EntityKind::Address, 3)
            .with("firstname", "Presta")
            .with("lastname", "Shop")
            .with("postcode", "75008")
            .with("city", "Paris")
            .with("id_country", 8)
            .with("planet", "Earth")
    }

    #[test]
    fn test_generate_through_formatter() {
        let store = store();
        let formatter = AddressFormatter::new(&store, &store);
        assert_eq!(
            formatter.generate(Some(&address()), &RenderConfig::new().with_newline("\n")),
            "Presta Shop\n(75008) Paris\nFrance"
        );
    }

    #[test]
    fn test_layout_data() {
        let store = store();
        let formatter = AddressFormatter::new(&store, &store);
        let data = formatter.layout_data(Some(&address()), 1).expect("address has layout data");

        assert_eq!(data.ordered, vec!["firstname lastname", "(postcode) city", "Country:name"]);
        assert_eq!(data.formatted["postcode"], "(75008)");
        assert_eq!(data.formatted["Country:name"], "France");
        assert_eq!(data.object.get("city"), Some(&Value::from("Paris")));
        assert_eq!(data.object.get("id_country"), Some(&Value::from(8)));
        assert!(!data.object.contains_key("planet"));
    }

    #[test]
    fn test_layout_data_without_address() {
        let store = store();
        let formatter = AddressFormatter::new(&store, &store);
        assert_eq!(formatter.layout_data(None, 1), None);
        let country = Entity::new(EntityKind::Country, 8);
        assert_eq!(formatter.layout_data(Some(&country), 1), None);
    }

    #[test]
    fn test_update_format_accepts_valid_template() {
        let mut formatter = AddressFormatter::new(TemplateCache::new(store()), MemoryStore::new(8));
        assert_eq!(formatter.ordered_fields(21, FieldView::Tokens).len(), 5);

        formatter
            .update_format(21, "company\ncity")
            .expect("valid template is stored");
        assert_eq!(formatter.ordered_fields(21, FieldView::Lines), vec!["company", "city"]);
    }

    #[test]
    fn test_update_format_rejects_invalid_template() {
        let mut formatter = AddressFormatter::new(store(), MemoryStore::new(8));
        let err = formatter
            .update_format(8, "firstname\nfirstname planet")
            .expect_err("invalid template is rejected");

        assert_eq!(err.errors.len(), 2);
        assert_eq!(
            formatter.ordered_fields(8, FieldView::Lines),
            vec!["firstname lastname", "(postcode) city", "Country:name"]
        );
    }

    #[test]
    fn test_custom_rules_apply_to_validation() {
        let store = store();
        let formatter = AddressFormatter::new(&store, &store).with_rules(Rules::new().with_forbidden_property("company"));
        assert_eq!(formatter.validate("company").len(), 1);
        assert!(!formatter.formattable_fields(EntityKind::Address).contains(&"company"));
    }

    #[test]
    fn test_required_fields() {
        let store = store();
        let formatter = AddressFormatter::new(&store, &store).with_rules(Rules::new().with_required_field("phone"));
        assert_eq!(
            formatter.required_fields(),
            vec!["phone", "firstname", "lastname", "address1", "city", "Country:name"]
        );
    }
}
