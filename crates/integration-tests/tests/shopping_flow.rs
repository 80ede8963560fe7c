//! End-to-end shopping journey: browse, fill the cart, restart, check out.

use std::rc::Rc;

use supermart_core::{ProductId, Rupiah};
use supermart_integration_tests::{fixture_storefront, fixture_storefront_on};
use supermart_storefront::catalog::{CatalogQuery, CategoryFilter, SortKey};
use supermart_storefront::checkout::{CheckoutStep, ShippingForm};
use supermart_storefront::storage::{MemoryStorage, Storage};

fn shipping_form() -> ShippingForm {
    ShippingForm {
        full_name: "Budi Santoso".to_string(),
        email: "budi@example.com".to_string(),
        whatsapp: "6281234567890".to_string(),
        city: "Jakarta".to_string(),
        address: "Jl. Thamrin No. 10".to_string(),
        notes: "Kirim siang hari".to_string(),
    }
}

#[test]
fn browse_filter_and_sort() {
    let store = fixture_storefront();
    assert_eq!(store.categories(), ["fashion", "electronics"]);

    let electronics = store.query(&CatalogQuery {
        category: CategoryFilter::Category("electronics".to_string()),
        ..CatalogQuery::default()
    });
    assert_eq!(electronics.len(), 2);

    let by_price = store.query(&CatalogQuery {
        sort: SortKey::PriceAsc,
        ..CatalogQuery::default()
    });
    let prices: Vec<_> = by_price.iter().map(|p| p.price).collect();
    let mut sorted = prices.clone();
    sorted.sort();
    assert_eq!(prices, sorted);

    let search = store.query(&CatalogQuery {
        search: "ranSEL".to_string(),
        ..CatalogQuery::default()
    });
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].title, "Tas Ransel Kulit");
}

#[test]
fn cart_survives_a_restart() {
    let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());

    let mut store = fixture_storefront_on(Rc::clone(&storage));
    store.add_to_cart(ProductId::new(1), 1).expect("add");
    store.add_to_cart(ProductId::new(2), 3).expect("add");
    store.update_quantity(ProductId::new(2), -1).expect("update");
    drop(store);

    let restarted = fixture_storefront_on(storage);
    assert_eq!(restarted.item_count(), 3);
    assert_eq!(restarted.cart_items()[1].quantity, 2);
}

#[test]
fn full_checkout_journey() {
    let mut store = fixture_storefront();

    // 150.000 + 2 x 36.000 = 222.000 subtotal, above the free-shipping bar
    store.add_to_cart(ProductId::new(1), 1).expect("add");
    store.add_to_cart(ProductId::new(2), 2).expect("add");

    let totals = store.totals();
    assert_eq!(totals.subtotal, Rupiah::from_int(222_000));
    assert_eq!(totals.discount_total, Rupiah::from_int(18_000));
    assert_eq!(totals.shipping, Rupiah::ZERO);
    assert_eq!(totals.grand_total, Rupiah::from_int(204_000));

    store.open_checkout().expect("open");

    // An invalid number keeps the flow at the shipping step
    let mut bad_form = shipping_form();
    bad_form.whatsapp = "0812345678".to_string();
    assert!(store.submit_shipping(&bad_form).is_err());
    assert_eq!(store.checkout_step(), Some(CheckoutStep::ShippingInfo));

    store.submit_shipping(&shipping_form()).expect("shipping");
    let handoff = store.confirm_order().expect("confirm");

    assert!(handoff.message.contains("1. Tas Ransel Kulit"));
    assert!(handoff.message.contains("2. Kaos Polos Hitam"));
    assert!(handoff.message.contains("Subtotal: Rp 222.000"));
    assert!(handoff.message.contains("Diskon: -Rp 18.000"));
    assert!(handoff.message.contains("Ongkos Kirim: Gratis"));
    assert!(handoff.message.contains("*Total: Rp 204.000*"));
    assert!(handoff.message.contains("Catatan: Kirim siang hari"));
    assert_eq!(handoff.url.host_str(), Some("wa.me"));
    assert_eq!(handoff.url.path(), "/6283120940458");

    // The order emptied the cart and closed the flow
    assert_eq!(store.item_count(), 0);
    assert_eq!(store.checkout_step(), None);
    assert!(store.open_checkout().is_err());
}

#[test]
fn flat_fee_applies_below_the_threshold() {
    let mut store = fixture_storefront();
    // 150.000 + 36.000 = 186.000, below the free-shipping bar
    store.add_to_cart(ProductId::new(1), 1).expect("add");
    store.add_to_cart(ProductId::new(2), 1).expect("add");

    let totals = store.totals();
    assert_eq!(totals.subtotal, Rupiah::from_int(186_000));
    assert_eq!(totals.shipping, Rupiah::from_int(15_000));
}

#[test]
fn quick_inquiry_leaves_the_cart_alone() {
    let mut store = fixture_storefront();
    assert!(store.quick_inquiry().is_err());

    store.add_to_cart(ProductId::new(3), 1).expect("add");
    let handoff = store.quick_inquiry().expect("inquiry");

    assert!(handoff.message.contains("bertanya tentang produk"));
    assert!(handoff.message.contains("1. Monitor 24 inci"));
    assert!(!handoff.message.contains("DATA PENGIRIMAN"));
    assert_eq!(store.item_count(), 1);
}
