//! Demo storefront run against in-memory collaborators.
//!
//! Seeds an in-memory object store with the product and banner images, then
//! walks through sign-up, sign-in, catalog load, search and a few cart
//! interactions, logging each derived state.

use std::sync::Arc;

use anyhow::Context;

use precocerto_app::{Services, StorefrontConfig, StorefrontSession};
use precocerto_catalog::InMemoryObjectStore;
use precocerto_core::{Money, ProductId};

const PRODUCT_IMAGES: u32 = 18;
const BANNER_IMAGES: u32 = 3;

fn seeded_store(config: &StorefrontConfig) -> InMemoryObjectStore {
    let store = InMemoryObjectStore::new();
    for n in 1..=PRODUCT_IMAGES {
        let path = format!("{}{n:02}.png", config.product_prefix);
        store.insert(path.clone(), format!("https://storage.local/{path}"));
    }
    for n in 1..=BANNER_IMAGES {
        let path = format!("{}banner-{n}.png", config.banner_prefix);
        store.insert(path.clone(), format!("https://storage.local/{path}"));
    }
    store
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env().context("invalid storefront configuration")?;
    precocerto_observability::tracing::init(config.log_format);

    let objects = Arc::new(seeded_store(&config));
    let services = Services::in_memory(config, objects);

    let accounts = services.accounts();
    accounts
        .register("cliente@precocerto.com.br", "segredo123", "segredo123")
        .await
        .context("sign-up failed")?;
    let user = accounts
        .sign_in("cliente@precocerto.com.br", "segredo123")
        .await
        .context("sign-in failed")?;

    let prices = (1..=PRODUCT_IMAGES)
        .map(|n| ProductId::new(n).map(|id| (id, Money::from_cents(u64::from(n) * 125))))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid price table")?;

    let mut session = StorefrontSession::for_user(user);
    let loaded = session.load(&services, prices).await.context("catalog load failed")?;
    tracing::info!(products = loaded.len(), "home screen populated");

    if let Some(banner) = session.carousel_mut().advance() {
        tracing::info!(banner = %banner.image_url(), "carousel advanced");
    }

    let matches = session.search("produto 1").len();
    tracing::info!(query = "produto 1", matches, "search");
    session.search("");

    let first = ProductId::new(1)?;
    let third = ProductId::new(3)?;
    session.add(first);
    session.increment(first);
    session.increment(third);
    let cart = session.decrement(first);

    for line in &cart.lines {
        tracing::info!(
            product = %line.product.description(),
            quantity = %line.quantity,
            subtotal = %line.subtotal(),
            "cart line"
        );
    }
    tracing::info!(items = cart.item_count, total = %cart.total, "cart total");

    Ok(())
}
