//! SuperMart Core - Shared types library.
//!
//! This crate provides common types used across all SuperMart components:
//! - `storefront` - Catalog, cart, checkout, and store-locator logic
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, rupiah amounts, and ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
