//! Entity storage and an in-memory store loaded from TOML
//!
//! The data file holds the default country, per-country formats and the
//! entity records:
//!
//! ```toml
//! default_country = 8
//!
//! [[formats]]
//! country = 8
//! format = """
//! firstname lastname
//! address1
//! postcode city
//! Country:name"""
//!
//! [[entities]]
//! kind = "Country"
//! id = 8
//! fields = { iso_code = "FR", name = { 1 = "France" } }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::StoreError;
use crate::schema::{CountryId, Entity, EntityKind};
use crate::template::{TemplateStore, TemplateWriter};

/// Read access to entity records
pub trait EntityStore {
    /// Fetch an entity by kind and id
    fn fetch(&self, kind: EntityKind, id: u64) -> Option<Entity>;
}

impl<T: EntityStore + ?Sized> EntityStore for &T {
    fn fetch(&self, kind: EntityKind, id: u64) -> Option<Entity> {
        (**self).fetch(kind, id)
    }
}

/// TOML structure for deserializing a data file
#[derive(Deserialize)]
struct TomlStore {
    #[serde(default)]
    default_country: CountryId,
    #[serde(default)]
    formats: Vec<TomlFormat>,
    #[serde(default)]
    entities: Vec<Entity>,
}

#[derive(Deserialize)]
struct TomlFormat {
    country: CountryId,
    format: String,
}

/// Templates and entities held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    default_country: CountryId,
    formats: HashMap<CountryId, String>,
    entities: HashMap<(EntityKind, u64), Entity>,
}

impl MemoryStore {
    /// Create an empty store with the given default country
    pub fn new(default_country: CountryId) -> Self {
        Self {
            default_country,
            ..Self::default()
        }
    }

    /// Load a store from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a store from a TOML string
    pub fn from_str(content: &str) -> Result<Self, StoreError> {
        let parsed: TomlStore = toml::from_str(content)?;

        let mut store = MemoryStore::new(parsed.default_country);
        for format in parsed.formats {
            store.formats.insert(format.country, format.format);
        }
        for entity in parsed.entities {
            store.insert(entity);
        }
        Ok(store)
    }

    /// Add a format for a country
    pub fn with_format(mut self, country: CountryId, format: impl Into<String>) -> Self {
        self.formats.insert(country, format.into());
        self
    }

    /// Add an entity record
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.insert(entity);
        self
    }

    /// Insert or replace an entity record
    pub fn insert(&mut self, entity: Entity) {
        self.entities.insert((entity.kind, entity.id), entity);
    }

    /// Borrow an entity record
    pub fn entity(&self, kind: EntityKind, id: u64) -> Option<&Entity> {
        self.entities.get(&(kind, id))
    }

    /// Borrow an address record
    pub fn address(&self, id: u64) -> Option<&Entity> {
        self.entity(EntityKind::Address, id)
    }

    /// Countries that have a format of their own, sorted
    pub fn countries(&self) -> Vec<CountryId> {
        let mut countries: Vec<_> = self.formats.keys().copied().collect();
        countries.sort_unstable();
        countries
    }
}

impl TemplateStore for MemoryStore {
    fn format(&self, country: CountryId) -> Option<String> {
        self.formats.get(&country).cloned()
    }

    fn default_country_id(&self) -> CountryId {
        self.default_country
    }
}

impl TemplateWriter for MemoryStore {
    fn set_format(&mut self, country: CountryId, format: String) {
        self.formats.insert(country, format);
    }
}

impl EntityStore for MemoryStore {
    fn fetch(&self, kind: EntityKind, id: u64) -> Option<Entity> {
        self.entity(kind, id).cloned()
    }
}
