//! Cached list/detail views
//!
//! ```text
//! lists:   locale        → property list
//! details: (id, locale)  → property record
//! ```
//!
//! Entries are only dropped after the server has confirmed a save.

use dashmap::DashMap;
use shared::{FormMode, Locale, PropertyId, PropertyRecord};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct PropertyCache {
    lists: Arc<DashMap<Locale, Arc<Vec<PropertyRecord>>>>,
    details: Arc<DashMap<(PropertyId, Locale), Arc<PropertyRecord>>>,
}

impl PropertyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, locale: Locale) -> Option<Arc<Vec<PropertyRecord>>> {
        self.lists.get(&locale).map(|entry| entry.value().clone())
    }

    pub fn put_list(&self, locale: Locale, records: Vec<PropertyRecord>) -> Arc<Vec<PropertyRecord>> {
        let records = Arc::new(records);
        self.lists.insert(locale, records.clone());
        records
    }

    pub fn detail(&self, id: PropertyId, locale: Locale) -> Option<Arc<PropertyRecord>> {
        self.details.get(&(id, locale)).map(|entry| entry.value().clone())
    }

    pub fn put_detail(&self, id: PropertyId, locale: Locale, record: PropertyRecord) -> Arc<PropertyRecord> {
        let record = Arc::new(record);
        self.details.insert((id, locale), record.clone());
        record
    }

    /// Drop the views a confirmed save made stale.
    ///
    /// Create: the locale's list. Update: the list plus `(id, locale)`.
    pub fn invalidate_after_save(&self, mode: FormMode, locale: Locale) {
        self.lists.remove(&locale);
        if let FormMode::Edit(id) = mode {
            self.details.remove(&(id, locale));
        }
        tracing::debug!(%mode, %locale, "Property views invalidated");
    }

    pub fn clear(&self) {
        self.lists.clear();
        self.details.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty() && self.details.is_empty()
    }
}
