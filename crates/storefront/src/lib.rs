//! SuperMart Storefront - client-side shop logic as a library.
//!
//! # Architecture
//!
//! - Products come from a public catalog API and are enriched with
//!   discounts and ratings at load time
//! - The cart and the recent-search list persist to a JSON key-value store
//!   after every mutation and are restored at startup
//! - Checkout is a two-step flow whose final output is a WhatsApp deep link
//! - The store locator resolves city names via a geocoding API (with a
//!   local fallback table) and picks the nearest of the fixed store sites
//!
//! All state lives in a single [`state::Storefront`] controller; every user
//! action maps to one method on it, returning a `Result` for the
//! presentation layer to render. No rendering happens in this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod geo;
pub mod recent;
pub mod state;
pub mod storage;
pub mod whatsapp;
