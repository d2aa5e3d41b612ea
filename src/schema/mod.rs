//! Static entity schema
//!
//! Every entity that can appear in an address layout is one variant of
//! [`EntityKind`], and each kind declares the public fields a template may
//! reference. Related entities are linked from the address through an
//! `id_<class>` field.

mod entity;
mod rules;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

pub use entity::{Entity, Value};
pub use rules::{Rules, FORBIDDEN_CLASSES, FORBIDDEN_PROPERTIES, REQUIRED_FORM_FIELDS};

/// Identifier of a country, the key of per-country templates
pub type CountryId = u64;

/// Language identifier used to select per-language values
pub type LangId = u32;

static IDENTIFIER_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bid\b|id_\w+|\bid[A-Z]\w+").expect("identifier pattern is valid"));

/// The closed set of entity types known to the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum EntityKind {
    Address,
    Country,
    State,
    Customer,
    Manufacturer,
    Supplier,
    Warehouse,
}

const ADDRESS_FIELDS: &[&str] = &[
    "id",
    "id_lang",
    "id_shop",
    "id_customer",
    "id_manufacturer",
    "id_supplier",
    "id_warehouse",
    "id_country",
    "id_state",
    "country",
    "alias",
    "company",
    "lastname",
    "firstname",
    "address1",
    "address2",
    "postcode",
    "city",
    "other",
    "phone",
    "phone_mobile",
    "vat_number",
    "dni",
    "date_add",
    "date_upd",
    "deleted",
];

const COUNTRY_FIELDS: &[&str] = &[
    "id",
    "id_lang",
    "id_zone",
    "id_currency",
    "iso_code",
    "call_prefix",
    "name",
    "contains_states",
    "need_identification_number",
    "need_zip_code",
    "zip_code_format",
    "display_tax_label",
    "active",
];

const STATE_FIELDS: &[&str] = &["id", "id_country", "id_zone", "iso_code", "name", "active"];

const CUSTOMER_FIELDS: &[&str] = &[
    "id",
    "id_lang",
    "id_shop",
    "id_shop_group",
    "id_gender",
    "id_default_group",
    "id_risk",
    "secure_key",
    "note",
    "lastname",
    "firstname",
    "birthday",
    "email",
    "newsletter",
    "ip_registration_newsletter",
    "newsletter_date_add",
    "optin",
    "website",
    "company",
    "siret",
    "ape",
    "outstanding_allow_amount",
    "show_public_prices",
    "max_payment_days",
    "passwd",
    "last_passwd_gen",
    "active",
    "is_guest",
    "deleted",
    "date_add",
    "date_upd",
    "years",
    "days",
    "months",
    "geoloc_postcode",
    "logged",
    "groupBox",
];

const MANUFACTURER_FIELDS: &[&str] = &[
    "id",
    "id_lang",
    "name",
    "description",
    "short_description",
    "date_add",
    "date_upd",
    "link_rewrite",
    "meta_title",
    "meta_keywords",
    "meta_description",
    "active",
];

const SUPPLIER_FIELDS: &[&str] = &[
    "id",
    "id_lang",
    "name",
    "description",
    "date_add",
    "date_upd",
    "link_rewrite",
    "meta_title",
    "meta_keywords",
    "meta_description",
    "active",
];

const WAREHOUSE_FIELDS: &[&str] = &[
    "id",
    "id_address",
    "id_employee",
    "id_currency",
    "reference",
    "name",
    "management_type",
    "deleted",
];

impl EntityKind {
    /// All kinds, in declaration order
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Address,
        EntityKind::Country,
        EntityKind::State,
        EntityKind::Customer,
        EntityKind::Manufacturer,
        EntityKind::Supplier,
        EntityKind::Warehouse,
    ];

    /// Look up a kind by class name, ignoring ASCII case
    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_name().eq_ignore_ascii_case(name))
    }

    /// Class name as written in `Class:field` tokens
    pub fn class_name(&self) -> &'static str {
        match self {
            EntityKind::Address => "Address",
            EntityKind::Country => "Country",
            EntityKind::State => "State",
            EntityKind::Customer => "Customer",
            EntityKind::Manufacturer => "Manufacturer",
            EntityKind::Supplier => "Supplier",
            EntityKind::Warehouse => "Warehouse",
        }
    }

    /// Name of the field that references this kind from another entity
    pub fn reference_field(&self) -> String {
        reference_field_for(self.class_name())
    }

    /// Public fields declared for this kind
    pub fn public_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Address => ADDRESS_FIELDS,
            EntityKind::Country => COUNTRY_FIELDS,
            EntityKind::State => STATE_FIELDS,
            EntityKind::Customer => CUSTOMER_FIELDS,
            EntityKind::Manufacturer => MANUFACTURER_FIELDS,
            EntityKind::Supplier => SUPPLIER_FIELDS,
            EntityKind::Warehouse => WAREHOUSE_FIELDS,
        }
    }

    /// Whether this kind declares `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.public_fields().contains(&field)
    }

    /// Whether `field` is declared and usable in a template
    ///
    /// Identifier-like fields only pass when `allow_identifiers` is set,
    /// which is the case for `id_<class>` reference lookups.
    pub fn has_template_field(&self, field: &str, allow_identifiers: bool) -> bool {
        self.has_field(field) && (allow_identifiers || !is_identifier_field(field))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// `id_<lowercased class>`
pub fn reference_field_for(class: &str) -> String {
    format!("id_{}", class.to_lowercase())
}

/// Whether a field name looks like an identifier (`id`, `id_country`, `idLang`)
pub fn is_identifier_field(name: &str) -> bool {
    IDENTIFIER_FIELD.is_match(name)
}
