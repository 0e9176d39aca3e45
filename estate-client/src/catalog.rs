//! Option catalog loader
//!
//! Loads every reference category for a locale under one logical request:
//! the categories are fetched in parallel and the catalog is only published
//! when all of them succeed.
//!
//! ```text
//! select(locale) ──► cache hit? ──yes──► displayed = catalog
//!                       │ no
//!                       ▼
//!              pending[locale] (Shared future, one per locale)
//!                       │ resolves
//!                       ▼
//!      cache[locale] = catalog; displayed only if locale is still selected
//! ```

use crate::{ClientError, ClientResult, PropertyApi};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared, try_join_all};
use parking_lot::Mutex;
use shared::{Locale, OptionCatalog, OptionCategory};
use std::collections::HashMap;
use std::sync::Arc;

type CatalogFuture = Shared<BoxFuture<'static, Result<Arc<OptionCatalog>, String>>>;

/// Load state of the currently selected locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Idle,
    Pending,
    Ready,
    Failed(String),
}

struct LoaderState {
    cache: HashMap<Locale, Arc<OptionCatalog>>,
    pending: HashMap<Locale, CatalogFuture>,
    selected: Option<Locale>,
    displayed: Option<Arc<OptionCatalog>>,
    status: CatalogStatus,
}

/// Locale-scoped reference data loader with request de-duplication
pub struct OptionCatalogLoader {
    api: Arc<dyn PropertyApi>,
    state: Mutex<LoaderState>,
}

impl OptionCatalogLoader {
    pub fn new(api: Arc<dyn PropertyApi>) -> Self {
        Self {
            api,
            state: Mutex::new(LoaderState {
                cache: HashMap::new(),
                pending: HashMap::new(),
                selected: None,
                displayed: None,
                status: CatalogStatus::Idle,
            }),
        }
    }

    /// Load the catalog for `locale`.
    ///
    /// Served from cache when available. Concurrent loads of the same locale
    /// share one outstanding request set.
    pub async fn load(&self, locale: Locale) -> ClientResult<Arc<OptionCatalog>> {
        let future = {
            let mut state = self.state.lock();
            if let Some(catalog) = state.cache.get(&locale) {
                return Ok(catalog.clone());
            }
            state
                .pending
                .entry(locale)
                .or_insert_with(|| {
                    tracing::debug!(%locale, "Fetching option catalog");
                    fetch_catalog(self.api.clone(), locale)
                })
                .clone()
        };

        let result = future.clone().await;

        let mut state = self.state.lock();
        if state
            .pending
            .get(&locale)
            .is_some_and(|pending| pending.ptr_eq(&future))
        {
            state.pending.remove(&locale);
        }
        match result {
            Ok(catalog) => {
                state.cache.insert(locale, catalog.clone());
                Ok(catalog)
            }
            Err(message) => Err(ClientError::Catalog(message)),
        }
    }

    /// Make `locale` the displayed locale and load its catalog.
    ///
    /// Returns `Ok(None)` when another locale was selected before this load
    /// finished; the late result is cached but never displayed.
    pub async fn select(&self, locale: Locale) -> ClientResult<Option<Arc<OptionCatalog>>> {
        {
            let mut state = self.state.lock();
            state.selected = Some(locale);
            if let Some(catalog) = state.cache.get(&locale).cloned() {
                state.displayed = Some(catalog.clone());
                state.status = CatalogStatus::Ready;
                return Ok(Some(catalog));
            }
            state.displayed = None;
            state.status = CatalogStatus::Pending;
        }

        let result = self.load(locale).await;

        let mut state = self.state.lock();
        if state.selected != Some(locale) {
            tracing::debug!(%locale, "Discarding stale option catalog response");
            return Ok(None);
        }
        match result {
            Ok(catalog) => {
                tracing::info!(%locale, "Option catalog ready");
                state.displayed = Some(catalog.clone());
                state.status = CatalogStatus::Ready;
                Ok(Some(catalog))
            }
            Err(err) => {
                tracing::warn!(%locale, error = %err, "Option catalog load failed");
                state.displayed = None;
                state.status = CatalogStatus::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Catalog of the selected locale, once complete
    pub fn displayed(&self) -> Option<Arc<OptionCatalog>> {
        self.state.lock().displayed.clone()
    }

    pub fn selected(&self) -> Option<Locale> {
        self.state.lock().selected
    }

    pub fn status(&self) -> CatalogStatus {
        self.state.lock().status.clone()
    }

    /// Number of locales with a load outstanding
    pub fn in_flight(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Drop a cached catalog so the next load refetches it
    pub fn invalidate(&self, locale: Locale) {
        self.state.lock().cache.remove(&locale);
    }
}

fn fetch_catalog(api: Arc<dyn PropertyApi>, locale: Locale) -> CatalogFuture {
    async move {
        let api = &api;
        let parts = try_join_all(OptionCategory::ALL.iter().map(|&category| async move {
            api.fetch_options(category, locale)
                .await
                .map(|items| (category, items))
        }))
        .await
        .map_err(|e| e.to_string())?;

        let mut catalog = OptionCatalog::new(locale);
        for (category, items) in parts {
            catalog.insert(category, items);
        }
        Ok(Arc::new(catalog))
    }
    .boxed()
    .shared()
}
