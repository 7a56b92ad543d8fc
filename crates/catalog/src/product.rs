use serde::{Deserialize, Serialize};

use precocerto_core::{DomainError, Entity, Money, ProductId};

/// A product shown in the storefront.
///
/// Built by the catalog loader from one listing entry and never mutated
/// afterwards; a reload produces fresh `Product`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    description: String,
    image_url: String,
    unit_price: Money,
}

impl Product {
    pub fn new(
        id: ProductId,
        description: impl Into<String>,
        image_url: impl Into<String>,
        unit_price: Money,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            image_url: image_url.into(),
            unit_price,
        }
    }

    /// Product for the listing entry at 0-based `index`: id `index + 1` and
    /// the placeholder description `"Produto {id}"`.
    pub fn listed(index: usize, image_url: String, unit_price: Money) -> Result<Self, DomainError> {
        let id = ProductId::from_index(index)?;
        Ok(Self::new(id, format!("Produto {id}"), image_url, unit_price))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_product_uses_one_based_placeholder() {
        let product = Product::listed(2, "https://cdn/3.png".to_string(), Money::from_cents(300)).unwrap();
        assert_eq!(product.id().get(), 3);
        assert_eq!(product.description(), "Produto 3");
        assert_eq!(product.image_url(), "https://cdn/3.png");
        assert_eq!(product.unit_price(), Money::from_cents(300));
    }
}
