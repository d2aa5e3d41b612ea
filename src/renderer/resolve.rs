//! Field resolution - turns template tokens into values of one address

use std::collections::{BTreeMap, HashMap};

use crate::parser::{tokenize, FieldRef};
use crate::schema::{Entity, EntityKind, LangId};
use crate::store::EntityStore;

use super::compose::compose_line;

/// Related entities fetched during one render
///
/// Each kind is fetched at most once, and a failed fetch is remembered as
/// well so it is not retried within the same render.
pub struct RelatedEntities<'s, E: ?Sized> {
    store: &'s E,
    fetched: HashMap<EntityKind, Option<Entity>>,
}

impl<'s, E: EntityStore + ?Sized> RelatedEntities<'s, E> {
    pub fn new(store: &'s E) -> Self {
        Self {
            store,
            fetched: HashMap::new(),
        }
    }

    /// The entity of `kind` referenced by `address`
    pub fn get(&mut self, address: &Entity, kind: EntityKind) -> Option<&Entity> {
        let store = self.store;
        self.fetched
            .entry(kind)
            .or_insert_with(|| {
                let id = address.reference(kind)?;
                tracing::trace!(%kind, id, "fetching related entity");
                store.fetch(kind, id)
            })
            .as_ref()
    }

    /// Number of kinds looked up so far
    pub fn fetched_kinds(&self) -> usize {
        self.fetched.len()
    }
}

/// Resolve one token against an address
///
/// Never fails: anything that cannot be resolved becomes the empty string.
pub fn resolve<E: EntityStore + ?Sized>(
    token: &str,
    address: &Entity,
    related: &mut RelatedEntities<'_, E>,
    lang: LangId,
) -> String {
    let value = match FieldRef::parse(token) {
        Ok(FieldRef::Simple(field)) => address.public_value(field),
        Ok(FieldRef::Related { class, field }) => match EntityKind::from_class_name(class) {
            Some(kind) if kind.has_field(field) && address.kind.has_field(&kind.reference_field()) => {
                related.get(address, kind).and_then(|entity| entity.public_value(field))
            }
            _ => None,
        },
        Err(_) => None,
    };
    value.map(|v| v.render(lang)).unwrap_or_default()
}

/// Everything needed to render one address
pub struct RenderContext<'a, E: ?Sized> {
    pub address: &'a Entity,
    pub lines: Vec<String>,
    pub lang: LangId,
    related: RelatedEntities<'a, E>,
}

impl<'a, E: EntityStore + ?Sized> RenderContext<'a, E> {
    pub fn new(address: &'a Entity, lines: Vec<String>, store: &'a E, lang: LangId) -> Self {
        Self {
            address,
            lines,
            lang,
            related: RelatedEntities::new(store),
        }
    }

    /// Resolve and compose every token of every line
    ///
    /// The result maps each token to its final text. Tokens that share a
    /// word with an earlier token map to the empty string, the earlier token
    /// carrying the whole word.
    pub fn formatted_values(&mut self) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();
        for line in &self.lines {
            let tokens = tokenize(line);
            for token in &tokens {
                let value = resolve(token, self.address, &mut self.related, self.lang);
                values.insert(token.to_string(), value);
            }
            compose_line(&mut values, line, &tokens);
        }
        values
    }

    pub fn related(&self) -> &RelatedEntities<'a, E> {
        &self.related
    }
}
