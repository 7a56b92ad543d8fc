use std::sync::Arc;

use precocerto_auth::{
    AccountService, IdentityProvider, InMemoryIdentityProvider, InMemoryRecordStore, RecordStore,
};
use precocerto_catalog::{CatalogLoader, InMemoryObjectStore, ObjectStore, PriceBook};
use precocerto_core::{Money, ProductId};

use crate::config::StorefrontConfig;

/// Collaborator handles shared by every screen of one app instance.
///
/// Built once at composition time and passed down explicitly; tests swap in
/// in-memory collaborators and several instances can coexist.
#[derive(Clone)]
pub struct Services {
    config: StorefrontConfig,
    identity: Arc<dyn IdentityProvider>,
    objects: Arc<dyn ObjectStore>,
    records: Arc<dyn RecordStore>,
}

impl core::fmt::Debug for Services {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Services")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Services {
    pub fn new(
        config: StorefrontConfig,
        identity: Arc<dyn IdentityProvider>,
        objects: Arc<dyn ObjectStore>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            config,
            identity,
            objects,
            records,
        }
    }

    /// In-memory wiring (dev/test) around an already-populated object store.
    pub fn in_memory(config: StorefrontConfig, objects: Arc<InMemoryObjectStore>) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryIdentityProvider::new()),
            objects,
            Arc::new(InMemoryRecordStore::new()),
        )
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(Arc::clone(&self.identity), Arc::clone(&self.records))
            .with_default_admin(self.config.default_admin)
    }

    /// Loader pricing products from `prices`, falling back to the configured
    /// default price.
    pub fn catalog_loader<I>(&self, prices: I) -> CatalogLoader
    where
        I: IntoIterator<Item = (ProductId, Money)>,
    {
        let book = prices
            .into_iter()
            .fold(PriceBook::new(self.config.default_price), |book, (id, price)| {
                book.with_price(id, price)
            });

        CatalogLoader::new(Arc::clone(&self.objects))
            .with_prices(book)
            .with_resolve_timeout(self.config.resolve_timeout)
    }
}
