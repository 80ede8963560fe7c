//! Integration tests for SuperMart.
//!
//! The tests drive the full [`supermart_storefront::state::Storefront`]
//! controller over in-memory storage with a fixture catalog, so they need
//! no network and no files on disk.
//!
//! Run with: `cargo test -p supermart-integration-tests`

use std::rc::Rc;

use supermart_core::{ProductId, Rating, Rupiah};
use supermart_storefront::catalog::Product;
use supermart_storefront::config::StoreConfig;
use supermart_storefront::state::Storefront;
use supermart_storefront::storage::{MemoryStorage, Storage};

/// Build a catalog product with a rupiah price and optional discount.
#[must_use]
pub fn fixture_product(id: i64, title: &str, category: &str, price: i64, discount: u8) -> Product {
    let original_price = Rupiah::from_int(price);
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: format!("{title} description"),
        category: category.to_string(),
        image: format!("https://img.example/{id}.jpg"),
        price: original_price.discounted_by(discount),
        original_price,
        discount,
        rating: Rating::new(4.2, 120),
    }
}

/// A small fixed catalog covering two categories and a discounted item.
#[must_use]
pub fn fixture_catalog() -> Vec<Product> {
    vec![
        fixture_product(1, "Tas Ransel Kulit", "fashion", 150_000, 0),
        fixture_product(2, "Kaos Polos Hitam", "fashion", 45_000, 20),
        fixture_product(3, "Monitor 24 inci", "electronics", 1_800_000, 0),
        fixture_product(4, "Mouse Nirkabel", "electronics", 95_000, 15),
    ]
}

/// A storefront over fresh in-memory storage with the fixture catalog.
///
/// # Panics
///
/// Panics if the storefront cannot be built over empty storage.
#[must_use]
pub fn fixture_storefront() -> Storefront {
    fixture_storefront_on(Rc::new(MemoryStorage::new()))
}

/// A storefront over the given storage, for restart tests.
///
/// # Panics
///
/// Panics if the persisted state cannot be read.
#[must_use]
pub fn fixture_storefront_on(storage: Rc<dyn Storage>) -> Storefront {
    let mut store =
        Storefront::new(StoreConfig::default(), storage).expect("storefront over fixture storage");
    store.install_catalog(fixture_catalog());
    store
}
