//! Liquid Luxury Core - Shared types library.
//!
//! This crate provides common types used across all Liquid Luxury components:
//! - `client` - Headless storefront client (session, catalog, cart, admin)
//! - `cli` - Terminal front-end driving the client library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every entity
//! here is owned and persisted by the backend; these are the client's transient,
//! derived copies of the wire shapes.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, category/status enums, and entity structs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
