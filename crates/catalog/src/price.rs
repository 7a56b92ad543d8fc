//! Unit prices supplied alongside the image listing.

use std::collections::HashMap;

use precocerto_core::{Money, ProductId};

/// Unit prices keyed by product id, with a fallback for unpriced products.
///
/// The object store only knows about images, so prices are handed to the
/// loader separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceBook {
    default_price: Money,
    prices: HashMap<ProductId, Money>,
}

impl PriceBook {
    pub fn new(default_price: Money) -> Self {
        Self {
            default_price,
            prices: HashMap::new(),
        }
    }

    pub fn with_price(mut self, id: ProductId, price: Money) -> Self {
        self.prices.insert(id, price);
        self
    }

    pub fn default_price(&self) -> Money {
        self.default_price
    }

    pub fn price_of(&self, id: ProductId) -> Money {
        self.prices.get(&id).copied().unwrap_or(self.default_price)
    }
}

impl FromIterator<(ProductId, Money)> for PriceBook {
    fn from_iter<I: IntoIterator<Item = (ProductId, Money)>>(iter: I) -> Self {
        Self {
            default_price: Money::ZERO,
            prices: iter.into_iter().collect(),
        }
    }
}
