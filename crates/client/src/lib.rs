//! Liquid Luxury Client - Headless storefront client library.
//!
//! Everything the web storefront did, minus the rendering: session and auth
//! gating, the gateway to the backend API, cached reads, and per-screen state
//! for the catalog, cart, wishlist, orders, reviews, profile, and the admin
//! back-office.
//!
//! # Architecture
//!
//! - [`storage`] / [`session`] - token, cached user, theme, and liked-product
//!   persistence behind a pluggable backend
//! - [`gateway`] - the one HTTP path to the backend; every call resolves to a
//!   uniform `{status, data}` response, never an `Err`
//! - [`resource`] - cached reads with explicit invalidation on mutation
//! - [`mutation`] / [`poll`] - optimistic writes and lifetime-bound
//!   background refresh; foreground fetches cancel by dropping the future
//! - screen modules ([`catalog`], [`cart`], [`wishlist`], [`orders`],
//!   [`reviews`], [`profile`], [`admin`]) - one struct per view, holding the
//!   state a front-end renders
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use liquid_luxury_client::catalog::CatalogScreen;
//! use liquid_luxury_client::config::ClientConfig;
//! use liquid_luxury_client::gateway::ApiClient;
//! use liquid_luxury_client::resource::ResourceCache;
//! use liquid_luxury_client::session::Session;
//! use liquid_luxury_client::storage::MemoryStore;
//!
//! # async fn run() -> Result<(), liquid_luxury_client::error::ClientError> {
//! let config = ClientConfig::from_env()?;
//! let session = Session::new(Arc::new(MemoryStore::new()));
//! let resources = ResourceCache::new(ApiClient::new(&config, session)?);
//!
//! let mut catalog = CatalogScreen::new(resources);
//! catalog.load().await;
//! for product in catalog.visible_page() {
//!     println!("{} - {}", product.name, product.price);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mutation;
pub mod notice;
pub mod orders;
pub mod poll;
pub mod profile;
pub mod resource;
pub mod reviews;
pub mod session;
pub mod storage;
pub mod wishlist;

pub use config::ClientConfig;
pub use error::ClientError;
pub use gateway::{ApiClient, ApiResponse};
pub use resource::{ResourceCache, ResourceKey};
pub use session::Session;
