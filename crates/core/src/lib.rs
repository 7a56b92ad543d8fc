//! `precocerto-core`: storefront domain building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, cart
//! and auth crates (no IO, no async, no collaborators).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod quantity;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BannerId, ProductId, UserId};
pub use money::Money;
pub use quantity::Quantity;
pub use value_object::ValueObject;
