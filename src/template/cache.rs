//! Read-through cache of per-country templates

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::schema::CountryId;

use super::{TemplateStore, TemplateWriter};

/// Memoizes template lookups of a wrapped store
///
/// Lookups take a shared lock and may run from several threads. Misses are
/// cached too, so a country without a format is only looked up once. Every
/// update through [`TemplateWriter::set_format`] drops the cached entry.
#[derive(Debug, Default)]
pub struct TemplateCache<S> {
    store: S,
    entries: RwLock<HashMap<CountryId, Option<String>>>,
}

impl<S> TemplateCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Unwrap the cache, returning the store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Forget the cached template of one country
    pub fn invalidate(&self, country: CountryId) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&country);
    }

    /// Forget every cached template
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached countries
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: TemplateStore> TemplateStore for TemplateCache<S> {
    fn format(&self, country: CountryId) -> Option<String> {
        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&country)
            .cloned();
        if let Some(format) = cached {
            return format;
        }

        let format = self.store.format(country);
        tracing::trace!(country, found = format.is_some(), "cached address format");
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(country, format.clone());
        format
    }

    fn default_country_id(&self) -> CountryId {
        self.store.default_country_id()
    }
}

impl<S: TemplateWriter> TemplateWriter for TemplateCache<S> {
    fn set_format(&mut self, country: CountryId, format: String) {
        self.store.set_format(country, format);
        self.invalidate(country);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Store counting how often it is asked for a format
    struct CountingStore {
        lookups: Cell<usize>,
    }

    impl TemplateStore for CountingStore {
        fn format(&self, country: CountryId) -> Option<String> {
            self.lookups.set(self.lookups.get() + 1);
            (country == 8).then(|| "firstname lastname".to_string())
        }

        fn default_country_id(&self) -> CountryId {
            8
        }
    }

    #[test]
    fn test_repeated_lookups_hit_cache() {
        let cache = TemplateCache::new(CountingStore { lookups: Cell::new(0) });
        assert_eq!(cache.format(8).as_deref(), Some("firstname lastname"));
        assert_eq!(cache.format(8).as_deref(), Some("firstname lastname"));
        assert_eq!(cache.format(3), None);
        assert_eq!(cache.format(3), None);
        assert_eq!(cache.inner().lookups.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalidate_refetches() {
        let cache = TemplateCache::new(CountingStore { lookups: Cell::new(0) });
        cache.format(8);
        cache.invalidate(8);
        cache.format(8);
        assert_eq!(cache.inner().lookups.get(), 2);
    }

    #[test]
    fn test_set_format_invalidates() {
        use crate::store::MemoryStore;

        let mut cache = TemplateCache::new(MemoryStore::new(8).with_format(8, "city"));
        assert_eq!(cache.format(8).as_deref(), Some("city"));
        cache.set_format(8, "postcode city".to_string());
        assert_eq!(cache.format(8).as_deref(), Some("postcode city"));
    }
}
