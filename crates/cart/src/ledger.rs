use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use precocerto_catalog::Product;
use precocerto_core::{Entity, Money, ProductId, Quantity};

/// A product in the cart together with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: Product,
    pub quantity: Quantity,
}

impl LineItem {
    pub fn subtotal(&self) -> Money {
        self.product.unit_price().times(self.quantity)
    }
}

/// Derived cart state handed to the presentation layer after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<LineItem>,
    pub total: Money,
    /// Sum of quantities over `lines`.
    pub item_count: u64,
}

/// In-memory cart: product id → quantity.
///
/// # Invariants
/// - A stored quantity is always ≥ 1; reaching zero removes the entry.
/// - Products are referenced by id only. Ids missing from the catalog passed
///   to [`line_items`](Self::line_items)/[`total`](Self::total) are skipped.
/// - No operation fails: unknown ids are a valid, silent state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLedger {
    quantities: BTreeMap<ProductId, Quantity>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the product in the cart with quantity 1; already present → unchanged.
    pub fn add(&mut self, id: ProductId) {
        self.quantities.entry(id).or_insert(Quantity::ONE);
    }

    /// One more unit, inserting at 1 when absent.
    pub fn increment(&mut self, id: ProductId) {
        self.quantities
            .entry(id)
            .and_modify(|q| *q = q.incremented())
            .or_insert(Quantity::ONE);
    }

    /// One fewer unit; the last unit removes the entry. Absent → no-op.
    pub fn decrement(&mut self, id: ProductId) {
        let Some(current) = self.quantities.get(&id).copied() else {
            return;
        };
        match current.decremented() {
            Some(q) => {
                self.quantities.insert(id, q);
            }
            None => {
                self.quantities.remove(&id);
            }
        }
    }

    /// Drop the entry regardless of quantity. Absent → no-op.
    pub fn remove(&mut self, id: ProductId) {
        self.quantities.remove(&id);
    }

    pub fn quantity(&self, id: ProductId) -> Option<Quantity> {
        self.quantities.get(&id).copied()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.quantities.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Raw entries in id order, including ids unknown to any catalog.
    pub fn entries(&self) -> impl Iterator<Item = (ProductId, Quantity)> + '_ {
        self.quantities.iter().map(|(id, q)| (*id, *q))
    }

    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    /// Line items for ids present both here and in `catalog`, in catalog order.
    pub fn line_items(&self, catalog: &[Product]) -> Vec<LineItem> {
        catalog
            .iter()
            .filter_map(|product| {
                self.quantity(product.id()).map(|quantity| LineItem {
                    product: product.clone(),
                    quantity,
                })
            })
            .collect()
    }

    /// Σ unit price × quantity over [`line_items`](Self::line_items).
    pub fn total(&self, catalog: &[Product]) -> Money {
        catalog
            .iter()
            .filter_map(|product| {
                self.quantity(product.id())
                    .map(|quantity| product.unit_price().times(quantity))
            })
            .sum()
    }

    /// Line items, total and item count in one pass.
    pub fn view(&self, catalog: &[Product]) -> CartView {
        let lines = self.line_items(catalog);
        let total = lines.iter().map(LineItem::subtotal).sum();
        let item_count = lines.iter().map(|line| u64::from(line.quantity.get())).sum();
        CartView {
            lines,
            total,
            item_count,
        }
    }
}
