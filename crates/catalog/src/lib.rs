//! Catalog module: products and banners listed from a remote object store.
//!
//! The loader is the only part that talks to a collaborator (through the
//! [`ObjectStore`] port); products, banners and the search filter are plain
//! deterministic values and functions.

pub mod banner;
pub mod loader;
pub mod price;
pub mod product;
pub mod search;
pub mod store;

pub use banner::{Banner, BannerCarousel};
pub use loader::{CatalogLoader, LoadError};
pub use price::PriceBook;
pub use product::Product;
pub use search::filter;
pub use store::{InMemoryObjectStore, ListError, ObjectStore, RemoteObjectRef, ResolutionError};
