//! Names that templates may never reference

use serde::Deserialize;

use super::EntityKind;

/// Properties excluded from templates regardless of the entity declaring them
pub const FORBIDDEN_PROPERTIES: &[&str] = &[
    "deleted",
    "date_add",
    "alias",
    "secure_key",
    "note",
    "newsletter",
    "ip_registration_newsletter",
    "newsletter_date_add",
    "optin",
    "passwd",
    "last_passwd_gen",
    "active",
    "is_guest",
    "date_upd",
    "country",
    "years",
    "days",
    "months",
    "description",
    "meta_description",
    "short_description",
    "link_rewrite",
    "meta_title",
    "meta_keywords",
    "display_tax_label",
    "need_zip_code",
    "contains_states",
    "call_prefixes",
    "show_public_prices",
    "max_payment",
    "max_payment_days",
    "geoloc_postcode",
    "logged",
    "account_number",
    "groupBox",
    "ape",
    "outstanding_allow_amount",
    "call_prefix",
    "definition",
    "debug_list",
];

/// Classes excluded from `Class:field` tokens
pub const FORBIDDEN_CLASSES: &[&str] = &["Manufacturer", "Supplier"];

/// Fields every address form asks for
pub const REQUIRED_FORM_FIELDS: &[&str] = &["firstname", "lastname", "address1", "city", "Country:name"];

/// Validation rules for templates
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Property names rejected in templates
    pub forbidden_properties: Vec<String>,
    /// Class names rejected in `Class:field` tokens (compared ignoring case)
    pub forbidden_classes: Vec<String>,
    /// Extra required address fields configured by the shop
    pub required_fields: Vec<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            forbidden_properties: FORBIDDEN_PROPERTIES.iter().map(|s| s.to_string()).collect(),
            forbidden_classes: FORBIDDEN_CLASSES.iter().map(|s| s.to_string()).collect(),
            required_fields: Vec::new(),
        }
    }
}

impl Rules {
    /// Create the default rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a forbidden property
    pub fn with_forbidden_property(mut self, name: impl Into<String>) -> Self {
        self.forbidden_properties.push(name.into());
        self
    }

    /// Add a forbidden class
    pub fn with_forbidden_class(mut self, name: impl Into<String>) -> Self {
        self.forbidden_classes.push(name.into());
        self
    }

    /// Add a shop-specific required field
    pub fn with_required_field(mut self, name: impl Into<String>) -> Self {
        self.required_fields.push(name.into());
        self
    }

    pub fn is_forbidden_property(&self, name: &str) -> bool {
        self.forbidden_properties.iter().any(|p| p == name)
    }

    pub fn is_forbidden_class(&self, name: &str) -> bool {
        self.forbidden_classes
            .iter()
            .any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Shop-specific required fields followed by the form defaults, without repeats
    pub fn required_fields(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let all = self
            .required_fields
            .iter()
            .map(String::as_str)
            .chain(REQUIRED_FORM_FIELDS.iter().copied());
        for name in all {
            if !out.iter().any(|seen| seen == name) {
                out.push(name.to_string());
            }
        }
        out
    }

    /// Fields of `kind` offered to template editors
    ///
    /// Skips forbidden properties and any name containing `id`.
    pub fn formattable_fields(&self, kind: EntityKind) -> Vec<&'static str> {
        kind.public_fields()
            .iter()
            .copied()
            .filter(|name| !self.is_forbidden_property(name) && !name.contains("id"))
            .collect()
    }

    /// Kinds reachable from `kind` through an `id_<class>` field
    pub fn related_classes(&self, kind: EntityKind) -> Vec<EntityKind> {
        let mut out = Vec::new();
        for name in kind.public_fields() {
            let Some(class) = name.strip_prefix("id_").filter(|c| !c.is_empty()) else {
                continue;
            };
            if self.is_forbidden_class(class) {
                continue;
            }
            if let Some(related) = EntityKind::from_class_name(class) {
                if !out.contains(&related) {
                    out.push(related);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = Rules::default();
        assert!(rules.is_forbidden_property("passwd"));
        assert!(!rules.is_forbidden_property("city"));
        assert!(rules.is_forbidden_class("Manufacturer"));
        assert!(rules.is_forbidden_class("SUPPLIER"));
        assert!(!rules.is_forbidden_class("Country"));
    }

    #[test]
    fn test_required_fields_deduplicated() {
        let rules = Rules::new()
            .with_required_field("postcode")
            .with_required_field("city");
        assert_eq!(
            rules.required_fields(),
            vec!["postcode", "city", "firstname", "lastname", "address1", "Country:name"]
        );
    }

    #[test]
    fn test_partial_rules_from_toml() {
        let rules: Rules = toml::from_str(r#"forbidden_classes = ["Warehouse"]"#).expect("Should parse");
        assert!(rules.is_forbidden_class("Warehouse"));
        assert!(!rules.is_forbidden_class("Supplier"));
        assert!(rules.is_forbidden_property("passwd"));
    }

    #[test]
    fn test_formattable_fields_skip_identifiers_and_forbidden() {
        let fields = Rules::default().formattable_fields(EntityKind::Address);
        assert!(fields.contains(&"firstname"));
        assert!(fields.contains(&"postcode"));
        assert!(!fields.contains(&"id_country"));
        assert!(!fields.contains(&"alias"));
        assert!(!fields.contains(&"deleted"));
    }

    #[test]
    fn test_related_classes_of_address() {
        let related = Rules::default().related_classes(EntityKind::Address);
        assert!(related.contains(&EntityKind::Country));
        assert!(related.contains(&EntityKind::State));
        assert!(related.contains(&EntityKind::Customer));
        assert!(!related.contains(&EntityKind::Manufacturer));
        assert!(!related.contains(&EntityKind::Supplier));
    }

    #[test]
    fn test_related_classes_respect_configured_rules() {
        let related = Rules::default()
            .with_forbidden_class("customer")
            .related_classes(EntityKind::Address);
        assert!(!related.contains(&EntityKind::Customer));
    }
}
