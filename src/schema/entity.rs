//! Entity records and their field values

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{EntityKind, LangId};

/// A field value as stored on an entity
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Text(String),
    /// Per-language values keyed by language id
    Localized(BTreeMap<String, String>),
}

impl Value {
    /// Build a per-language value
    pub fn localized<S: Into<String>>(values: impl IntoIterator<Item = (LangId, S)>) -> Self {
        Value::Localized(
            values
                .into_iter()
                .map(|(lang, text)| (lang.to_string(), text.into()))
                .collect(),
        )
    }

    /// String form of the value for a language
    ///
    /// `true` renders as `1` and `false` as the empty string; a missing
    /// translation renders as the empty string.
    pub fn render(&self, lang: LangId) -> String {
        match self {
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => String::new(),
            Value::Integer(n) => n.to_string(),
            Value::Text(s) => s.clone(),
            Value::Localized(values) => values.get(&lang.to_string()).cloned().unwrap_or_default(),
        }
    }

    /// Interpret the value as a positive entity id
    pub fn as_id(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => u64::try_from(*n).ok().filter(|id| *id > 0),
            Value::Text(s) => s.trim().parse::<u64>().ok().filter(|id| *id > 0),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A record of one entity kind
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Entity {
    /// Create an entity without field values
    pub fn new(kind: EntityKind, id: u64) -> Self {
        Self {
            kind,
            id,
            fields: BTreeMap::new(),
        }
    }

    /// Set a field value
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Raw value of a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Value of a field declared by the entity's schema
    pub fn public_value(&self, field: &str) -> Option<&Value> {
        if self.kind.has_field(field) {
            self.get(field)
        } else {
            None
        }
    }

    /// Id of the related entity of `kind`, read from `id_<kind>`
    pub fn reference(&self, kind: EntityKind) -> Option<u64> {
        self.get(&kind.reference_field()).and_then(Value::as_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_values() {
        assert_eq!(Value::from("Paris").render(1), "Paris");
        assert_eq!(Value::from(75008).render(1), "75008");
        assert_eq!(Value::from(true).render(1), "1");
        assert_eq!(Value::from(false).render(1), "");
    }

    #[test]
    fn test_render_localized_falls_back_to_empty() {
        let name = Value::localized([(1, "France"), (2, "Frankreich")]);
        assert_eq!(name.render(2), "Frankreich");
        assert_eq!(name.render(3), "");
    }

    #[test]
    fn test_reference() {
        let address = Entity::new(EntityKind::Address, 1)
            .with("id_country", 8)
            .with("id_state", 0);
        assert_eq!(address.reference(EntityKind::Country), Some(8));
        assert_eq!(address.reference(EntityKind::State), None);
        assert_eq!(address.reference(EntityKind::Customer), None);
    }

    #[test]
    fn test_public_value_ignores_undeclared_fields() {
        let address = Entity::new(EntityKind::Address, 1)
            .with("city", "Paris")
            .with("planet", "Earth");
        assert!(address.public_value("city").is_some());
        assert!(address.public_value("planet").is_none());
    }

    #[test]
    fn test_deserialize_entity() {
        let entity: Entity = toml::from_str(
            r#"
kind = "Country"
id = 8
[fields]
iso_code = "FR"
need_zip_code = true
name = { 1 = "France" }
"#,
        )
        .expect("Should parse");
        assert_eq!(entity.kind, EntityKind::Country);
        assert_eq!(entity.get("iso_code"), Some(&Value::from("FR")));
        assert_eq!(entity.get("need_zip_code"), Some(&Value::Bool(true)));
        assert_eq!(entity.get("name").map(|v| v.render(1)), Some("France".to_string()));
    }
}
