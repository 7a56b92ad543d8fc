//! Catalog loading: listing → resolved URLs → ordered products/banners.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinSet;

use precocerto_core::{DomainError, ProductId};

use crate::banner::Banner;
use crate::price::PriceBook;
use crate::product::Product;
use crate::store::{ListError, ObjectStore, RemoteObjectRef, ResolutionError};

/// Catalog load failure.
///
/// A failed load never yields a partial catalog: callers show an empty/error
/// state and may retry with a fresh load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("listing failed: {0}")]
    Listing(#[from] ListError),

    #[error("entry {index} could not be resolved: {source}")]
    Resolution {
        index: usize,
        #[source]
        source: ResolutionError,
    },

    #[error("resolution task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Builds catalogs from object-store listings.
///
/// Holds the store handle explicitly; there is no process-wide store.
#[derive(Clone)]
pub struct CatalogLoader {
    store: Arc<dyn ObjectStore>,
    prices: PriceBook,
    resolve_timeout: Option<Duration>,
}

impl core::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("prices", &self.prices)
            .field("resolve_timeout", &self.resolve_timeout)
            .finish_non_exhaustive()
    }
}

impl CatalogLoader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            prices: PriceBook::default(),
            resolve_timeout: None,
        }
    }

    pub fn with_prices(mut self, prices: PriceBook) -> Self {
        self.prices = prices;
        self
    }

    /// Bound each URL resolution; `None` waits indefinitely.
    pub fn with_resolve_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    pub fn prices(&self) -> &PriceBook {
        &self.prices
    }

    /// Turn a listing into products, preserving listing order.
    ///
    /// Entry `i` becomes product `i + 1`. Fails fast: the first resolution
    /// error aborts the outstanding resolutions and the whole load.
    pub async fn load_catalog(&self, listing: Vec<RemoteObjectRef>) -> Result<Vec<Product>, LoadError> {
        let urls = self.resolve_all(listing).await?;

        let products = urls
            .into_iter()
            .enumerate()
            .map(|(index, url)| {
                ProductId::from_index(index).and_then(|id| Product::listed(index, url, self.prices.price_of(id)))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        tracing::info!(products = products.len(), "catalog loaded");
        Ok(products)
    }

    /// List `prefix` and load every object under it as a product.
    pub async fn load_products(&self, prefix: &str) -> Result<Vec<Product>, LoadError> {
        let listing = self.list(prefix).await?;
        self.load_catalog(listing).await
    }

    /// Turn a listing into banners, with the same ordering and fail-fast rules.
    pub async fn load_banner_listing(&self, listing: Vec<RemoteObjectRef>) -> Result<Vec<Banner>, LoadError> {
        let urls = self.resolve_all(listing).await?;

        let banners = urls
            .into_iter()
            .enumerate()
            .map(|(index, url)| Banner::listed(index, url))
            .collect::<Result<Vec<_>, DomainError>>()?;

        tracing::info!(banners = banners.len(), "banners loaded");
        Ok(banners)
    }

    /// List `prefix` and load every object under it as a banner.
    pub async fn load_banners(&self, prefix: &str) -> Result<Vec<Banner>, LoadError> {
        let listing = self.list(prefix).await?;
        self.load_banner_listing(listing).await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<RemoteObjectRef>, LoadError> {
        let listing = self.store.list_objects(prefix).await.map_err(|err| {
            tracing::error!(prefix, error = %err, "object listing failed");
            err
        })?;

        if listing.is_empty() {
            tracing::info!(prefix, "no objects found under prefix");
        }
        Ok(listing)
    }

    /// Resolve every reference concurrently, collecting URLs by listing index.
    async fn resolve_all(&self, listing: Vec<RemoteObjectRef>) -> Result<Vec<String>, LoadError> {
        let total = listing.len();
        let mut tasks = JoinSet::new();

        for (index, object) in listing.into_iter().enumerate() {
            let store = Arc::clone(&self.store);
            let timeout = self.resolve_timeout;
            tasks.spawn(async move { (index, resolve_one(store.as_ref(), &object, timeout).await) });
        }

        let mut urls: Vec<Option<String>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let (index, resolved) = joined.map_err(|err| LoadError::Task(err.to_string()))?;
            match resolved {
                Ok(url) => {
                    if let Some(slot) = urls.get_mut(index) {
                        *slot = Some(url);
                    }
                }
                Err(source) => {
                    tracing::error!(index, error = %source, "url resolution failed; aborting load");
                    // Dropping `tasks` aborts the resolutions still in flight.
                    return Err(LoadError::Resolution { index, source });
                }
            }
        }

        urls.into_iter()
            .enumerate()
            .map(|(index, url)| url.ok_or_else(|| LoadError::Task(format!("entry {index} was never resolved"))))
            .collect()
    }
}

async fn resolve_one(
    store: &dyn ObjectStore,
    object: &RemoteObjectRef,
    timeout: Option<Duration>,
) -> Result<String, ResolutionError> {
    let Some(limit) = timeout else {
        return store.resolve_url(object).await;
    };

    tokio::time::timeout(limit, store.resolve_url(object))
        .await
        .unwrap_or_else(|_| {
            Err(ResolutionError::TimedOut {
                path: object.path().to_string(),
                after_ms: limit.as_millis(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use precocerto_core::{Entity, Money};

    use crate::store::InMemoryObjectStore;

    /// Store whose resolutions complete in reverse listing order.
    struct ReversedLatencyStore {
        delays_ms: HashMap<String, u64>,
        failing: Option<String>,
    }

    impl ReversedLatencyStore {
        fn new(paths: &[&str]) -> Self {
            let count = paths.len() as u64;
            let delays_ms = paths
                .iter()
                .enumerate()
                .map(|(i, p)| (p.to_string(), (count - i as u64) * 15))
                .collect();
            Self {
                delays_ms,
                failing: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl ObjectStore for ReversedLatencyStore {
        async fn list_objects(&self, _prefix: &str) -> Result<Vec<RemoteObjectRef>, ListError> {
            Err(ListError::Unavailable("not used".to_string()))
        }

        async fn resolve_url(&self, object: &RemoteObjectRef) -> Result<String, ResolutionError> {
            let delay = self.delays_ms.get(object.path()).copied().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if self.failing.as_deref() == Some(object.path()) {
                return Err(ResolutionError::Unavailable {
                    path: object.path().to_string(),
                    reason: "boom".to_string(),
                });
            }
            Ok(format!("https://cdn/{}", object.path()))
        }
    }

    struct DownStore;

    #[async_trait::async_trait]
    impl ObjectStore for DownStore {
        async fn list_objects(&self, _prefix: &str) -> Result<Vec<RemoteObjectRef>, ListError> {
            Err(ListError::Unavailable("network unreachable".to_string()))
        }

        async fn resolve_url(&self, object: &RemoteObjectRef) -> Result<String, ResolutionError> {
            Err(ResolutionError::NotFound {
                path: object.path().to_string(),
            })
        }
    }

    fn refs(paths: &[&str]) -> Vec<RemoteObjectRef> {
        paths.iter().map(|p| RemoteObjectRef::new(*p)).collect()
    }

    #[tokio::test]
    async fn preserves_listing_order_when_resolutions_finish_out_of_order() {
        let paths = ["images/a.png", "images/b.png", "images/c.png", "images/d.png"];
        let loader = CatalogLoader::new(Arc::new(ReversedLatencyStore::new(&paths)));

        let products = loader.load_catalog(refs(&paths)).await.unwrap();

        assert_eq!(products.len(), 4);
        for (index, product) in products.iter().enumerate() {
            assert_eq!(product.id().get() as usize, index + 1);
            assert_eq!(product.description(), format!("Produto {}", index + 1));
            assert_eq!(product.image_url(), format!("https://cdn/{}", paths[index]));
        }
    }

    #[tokio::test]
    async fn empty_listing_is_an_empty_catalog() {
        let loader = CatalogLoader::new(Arc::new(InMemoryObjectStore::new()));
        assert!(loader.load_catalog(Vec::new()).await.unwrap().is_empty());
        assert!(loader.load_products("images/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn one_failed_resolution_fails_the_whole_load() {
        let paths = ["images/a.png", "images/b.png", "images/c.png"];
        let mut store = ReversedLatencyStore::new(&paths);
        store.failing = Some("images/b.png".to_string());
        let loader = CatalogLoader::new(Arc::new(store));

        let err = loader.load_catalog(refs(&paths)).await.unwrap_err();
        match err {
            LoadError::Resolution { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(source, ResolutionError::Unavailable { .. }));
            }
            other => panic!("expected resolution error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn listing_failure_is_a_load_error() {
        let loader = CatalogLoader::new(Arc::new(DownStore));
        let err = loader.load_products("images/").await.unwrap_err();
        assert!(matches!(err, LoadError::Listing(ListError::Unavailable(_))));
    }

    #[tokio::test]
    async fn slow_resolution_times_out_when_bounded() {
        let paths = ["images/a.png", "images/b.png"];
        let loader = CatalogLoader::new(Arc::new(ReversedLatencyStore::new(&paths)))
            .with_resolve_timeout(Some(Duration::from_millis(1)));

        let err = loader.load_catalog(refs(&paths)).await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::Resolution {
                source: ResolutionError::TimedOut { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn prices_come_from_the_price_book() {
        let store = InMemoryObjectStore::new()
            .with_object("images/1.png", "u1")
            .with_object("images/2.png", "u2");
        let prices = PriceBook::new(Money::from_cents(100))
            .with_price(ProductId::new(2).unwrap(), Money::from_cents(250));
        let loader = CatalogLoader::new(Arc::new(store)).with_prices(prices);

        let products = loader.load_products("images/").await.unwrap();
        let unit_prices: Vec<_> = products.iter().map(Product::unit_price).collect();
        assert_eq!(unit_prices, vec![Money::from_cents(100), Money::from_cents(250)]);
    }

    #[tokio::test]
    async fn banners_follow_listing_order() {
        let store = InMemoryObjectStore::new()
            .with_object("banners/promo-b.png", "ub")
            .with_object("banners/promo-a.png", "ua");
        let loader = CatalogLoader::new(Arc::new(store));

        let banners = loader.load_banners("banners/").await.unwrap();
        let urls: Vec<_> = banners.iter().map(Banner::image_url).collect();
        assert_eq!(urls, vec!["ua", "ub"]);
        assert_eq!(banners[0].id().get(), 1);
        assert_eq!(banners[1].id().get(), 2);
    }
}
