//! Per-screen storefront state: catalog, search, banners and cart.

use precocerto_auth::Session;
use precocerto_cart::{CartLedger, CartView};
use precocerto_catalog::{filter, BannerCarousel, LoadError, Product};
use precocerto_core::{Money, ProductId};

use crate::services::Services;

/// Catalog load lifecycle as shown by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Load failed; the catalog is empty and a retry is offered.
    Failed(String),
}

/// State owned by one storefront screen.
///
/// Single-threaded: every operation runs to completion on the interaction
/// that triggered it, and every cart mutation returns the re-derived
/// [`CartView`].
#[derive(Debug, Default)]
pub struct StorefrontSession {
    user: Option<Session>,
    catalog: Vec<Product>,
    query: String,
    visible: Vec<Product>,
    carousel: BannerCarousel,
    cart: CartLedger,
    state: LoadState,
}

impl StorefrontSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session attributed to a signed-in user.
    pub fn for_user(session: Session) -> Self {
        Self {
            user: Some(session),
            ..Self::new()
        }
    }

    pub fn user(&self) -> Option<&Session> {
        self.user.as_ref()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Products matching the current query.
    pub fn visible(&self) -> &[Product] {
        &self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn carousel(&self) -> &BannerCarousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut BannerCarousel {
        &mut self.carousel
    }

    /// Load banners and products concurrently.
    ///
    /// Banner failures only leave the carousel empty. A product failure
    /// clears the catalog, marks the session `Failed` and returns the error;
    /// calling `load` again is the retry. The cart survives reloads: ids that
    /// no longer exist simply drop out of the cart view.
    pub async fn load<I>(&mut self, services: &Services, prices: I) -> Result<&[Product], LoadError>
    where
        I: IntoIterator<Item = (ProductId, Money)>,
    {
        self.state = LoadState::Loading;
        let config = services.config();
        let loader = services.catalog_loader(prices);

        let (banners, products) = tokio::join!(
            loader.load_banners(&config.banner_prefix),
            loader.load_products(&config.product_prefix),
        );

        match banners {
            Ok(banners) => {
                self.carousel = BannerCarousel::new(banners, config.banner_interval);
            }
            Err(err) => {
                tracing::warn!(error = %err, "banner load failed; carousel left empty");
                self.carousel = BannerCarousel::new(Vec::new(), config.banner_interval);
            }
        }

        match products {
            Ok(products) => {
                self.catalog = products;
                self.visible = filter(&self.catalog, &self.query).into_owned();
                self.state = LoadState::Ready;
                tracing::info!(
                    products = self.catalog.len(),
                    banners = self.carousel.banners().len(),
                    "storefront ready"
                );
                Ok(self.visible.as_slice())
            }
            Err(err) => {
                tracing::error!(error = %err, "catalog load failed");
                self.catalog.clear();
                self.visible.clear();
                self.state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Update the query and return the matching products.
    pub fn search(&mut self, query: &str) -> &[Product] {
        self.query = query.to_string();
        self.visible = filter(&self.catalog, query).into_owned();
        tracing::debug!(query, matches = self.visible.len(), "catalog filtered");
        &self.visible
    }

    pub fn add(&mut self, id: ProductId) -> CartView {
        self.cart.add(id);
        self.cart()
    }

    pub fn increment(&mut self, id: ProductId) -> CartView {
        self.cart.increment(id);
        self.cart()
    }

    pub fn decrement(&mut self, id: ProductId) -> CartView {
        self.cart.decrement(id);
        self.cart()
    }

    pub fn remove(&mut self, id: ProductId) -> CartView {
        self.cart.remove(id);
        self.cart()
    }

    /// Current cart derived against the loaded catalog.
    pub fn cart(&self) -> CartView {
        self.cart.view(&self.catalog)
    }

    pub fn ledger(&self) -> &CartLedger {
        &self.cart
    }
}
