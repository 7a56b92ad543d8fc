//! `precocerto-app`: composition root for the storefront core.
//!
//! Wires configuration and the external collaborators into explicitly
//! constructed [`Services`], and exposes the per-screen
//! [`StorefrontSession`] the presentation layer drives.

pub mod config;
pub mod services;
pub mod session;

pub use config::{ConfigError, StorefrontConfig};
pub use services::Services;
pub use session::{LoadState, StorefrontSession};
