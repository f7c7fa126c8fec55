//! Cached menu fetching.

use std::time::Duration;

use super::price::decorate;
use super::{
    FetchError,
    FileStore,
    HttpTransport,
    KeyValueStore,
    MemoryStore,
    MenuItem,
    ReqwestTransport,
    extract_meals,
};
use crate::config::{
    DEFAULT_CACHE_KEY,
    DEFAULT_MENU_ENDPOINT,
    MenuSettings,
};

/// Fetches the menu, prices it and optionally caches the result.
///
/// With a store, the first successful fetch is written under the cache key and
/// every later call returns that entry without touching the network. The entry
/// never expires.
#[derive(Debug)]
pub struct MenuFetcher<T, S> {
    /// HTTP client
    transport: T,
    /// `None` disables the cache entirely
    store: Option<S>,
    /// Recipe API URL
    endpoint: String,
    /// Store key of the cached list
    cache_key: String,
}

impl<T: HttpTransport> MenuFetcher<T, MemoryStore> {
    /// A fetcher that always goes to the network.
    #[must_use]
    pub fn without_cache(transport: T) -> Self {
        Self::new(transport, None)
    }
}

impl<T: HttpTransport, S: KeyValueStore> MenuFetcher<T, S> {
    /// A fetcher on the default endpoint and cache key; `None` disables the cache.
    #[must_use]
    pub fn new(transport: T, store: Option<S>) -> Self {
        Self {
            transport,
            store,
            endpoint: DEFAULT_MENU_ENDPOINT.to_string(),
            cache_key: DEFAULT_CACHE_KEY.to_string(),
        }
    }

    /// Fetch from `endpoint` instead.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Cache under `cache_key` instead.
    #[must_use]
    pub fn with_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = cache_key.into();
        self
    }

    /// True when a store is attached.
    #[must_use]
    pub const fn cache_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// URL requested on a cache miss.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the menu. Never fails: any error is logged and yields an empty
    /// list, so an empty result may also mean the call failed.
    pub async fn fetch_menu_items(&self) -> Vec<MenuItem> {
        match self.try_fetch_menu_items().await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Error fetching menu items: {e}");
                Vec::new()
            }
        }
    }

    /// Same as [`Self::fetch_menu_items`] but reports the failure.
    pub async fn try_fetch_menu_items(&self) -> Result<Vec<MenuItem>, FetchError> {
        if let Some(items) = self.read_cache() {
            return Ok(items);
        }

        let response = self.transport.get(&self.endpoint).await?;
        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        let items = decorate(extract_meals(&response.body)?, &mut rand::thread_rng());

        if let Some(store) = &self.store {
            let serialized = serde_json::to_string(&items).map_err(FetchError::Serialize)?;
            store.set_item(&self.cache_key, &serialized)?;
            tracing::debug!(key = %self.cache_key, count = items.len(), "Cached menu items");
        }

        Ok(items)
    }

    /// Cached items, if the cache is enabled and holds a readable entry.
    ///
    /// Unreadable entries count as a miss and get overwritten by the next
    /// successful fetch.
    fn read_cache(&self) -> Option<Vec<MenuItem>> {
        let store = self.store.as_ref()?;

        let cached = match store.get_item(&self.cache_key) {
            Ok(Some(cached)) if !cached.is_empty() => cached,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!(key = %self.cache_key, "Failed to read cache: {e}");
                return None;
            }
        };

        match serde_json::from_str::<Vec<MenuItem>>(&cached) {
            Ok(items) => {
                tracing::debug!(key = %self.cache_key, count = items.len(), "Serving cached menu");
                Some(items)
            }
            Err(e) => {
                tracing::warn!(key = %self.cache_key, "Ignoring unreadable cache entry: {e}");
                None
            }
        }
    }
}

impl MenuFetcher<ReqwestTransport, FileStore> {
    /// Build the production fetcher: `reqwest` plus a file-backed store when
    /// `cache_enabled` is set.
    pub fn from_settings(settings: &MenuSettings) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(
            Duration::from_secs(settings.timeout_secs),
            &settings.user_agent,
        )?;
        let store = settings.cache_enabled.then(|| FileStore::new(&settings.store_path));

        Ok(Self::new(transport, store)
            .with_endpoint(settings.endpoint.clone())
            .with_cache_key(settings.cache_key.clone()))
    }
}

/// Fetch the menu as configured by `settings`; empty on any failure.
pub async fn fetch_menu_items(settings: &MenuSettings) -> Vec<MenuItem> {
    match MenuFetcher::from_settings(settings) {
        Ok(fetcher) => fetcher.fetch_menu_items().await,
        Err(e) => {
            tracing::error!("Error fetching menu items: {e}");
            Vec::new()
        }
    }
}

/// Fetch the menu as configured by `settings`, reporting failures.
pub async fn try_fetch_menu_items(settings: &MenuSettings) -> Result<Vec<MenuItem>, FetchError> {
    MenuFetcher::from_settings(settings)?.try_fetch_menu_items().await
}
