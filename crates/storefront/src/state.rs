//! The storefront controller.
//!
//! [`Storefront`] owns all application state: the loaded catalog, the cart,
//! the in-flight checkout, the store locator, and the recent-search list.
//! Every cart and recent-search mutation is written through to storage
//! immediately, so a restarted session picks up where the last one stopped.

use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use supermart_core::ProductId;

use crate::cart::{CartLedger, CartMutation, CartTotals, LineItem};
use crate::catalog::{self, CatalogClient, CatalogError, CatalogQuery, CatalogStore, Product};
use crate::checkout::{self, CheckoutError, CheckoutFlow, CheckoutStep, ShippingForm};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::geo::{GeoSource, Geocoder, NearestStore, nearest_store};
use crate::recent::RecentSearches;
use crate::storage::Storage;
use crate::whatsapp;

/// A composed outbound message and the `wa.me` link that carries it.
#[derive(Debug, Clone)]
pub struct OrderHandoff {
    pub message: String,
    pub url: url::Url,
}

/// Outcome of a city search: the resolved place and the closest outlet.
#[derive(Debug, Clone)]
pub struct CityReport {
    pub display_name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub source: GeoSource,
    pub nearest: NearestStore,
}

/// Application state and the operations over it.
pub struct Storefront {
    config: StoreConfig,
    storage: Rc<dyn Storage>,
    catalog: CatalogStore,
    cart: CartLedger,
    checkout: Option<CheckoutFlow>,
    geocoder: Geocoder,
    recent: RecentSearches,
}

impl Storefront {
    /// Build a storefront over the given storage, restoring the persisted
    /// cart and recent searches. The catalog starts empty; call
    /// [`Self::load_catalog`] or [`Self::install_catalog`] next.
    ///
    /// # Errors
    ///
    /// Returns an error if persisted state cannot be read.
    pub fn new(config: StoreConfig, storage: Rc<dyn Storage>) -> Result<Self> {
        let cart = CartLedger::load(storage.as_ref())?;
        let recent = RecentSearches::load(storage.as_ref())?;
        let geocoder = Geocoder::new(
            config.geocoding_url.clone(),
            config.geocoding_api_key.clone(),
        );
        Ok(Self {
            config,
            storage,
            catalog: CatalogStore::default(),
            cart,
            checkout: None,
            geocoder,
            recent,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the remote catalog and enrich it with display pricing and
    /// synthetic ratings. Enrichment is deterministic when a seed is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    pub async fn load_catalog(&mut self) -> Result<usize> {
        let raw = CatalogClient::new(self.config.catalog_url.clone()).fetch().await?;
        let products = match self.config.catalog_seed {
            Some(seed) => catalog::enrich(raw, self.config.exchange_rate, &mut StdRng::seed_from_u64(seed)),
            None => catalog::enrich(raw, self.config.exchange_rate, &mut rand::rng()),
        };
        Ok(self.install_catalog(products))
    }

    /// Install an already-enriched product list, replacing whatever was
    /// loaded before. Returns the product count.
    pub fn install_catalog(&mut self, products: Vec<Product>) -> usize {
        self.catalog = CatalogStore::from_products(products);
        let count = self.catalog.products().len();
        info!(count, "Catalog ready");
        count
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.catalog.categories()
    }

    /// Run a filter/search/sort query over the loaded catalog.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        self.catalog.query(query)
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.product(id)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    #[must_use]
    pub fn cart_items(&self) -> &[LineItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(&self.config.shipping)
    }

    /// Add `quantity` of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownProduct` for an id not in the catalog.
    pub fn add_to_cart(&mut self, id: ProductId, quantity: u32) -> Result<()> {
        let product = self
            .catalog
            .product(id)
            .ok_or(CatalogError::UnknownProduct(id))?
            .clone();
        self.cart.add(product, quantity);
        self.cart.persist(self.storage.as_ref())?;
        Ok(())
    }

    /// Apply a signed quantity delta to a line item.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> Result<CartMutation> {
        let mutation = self.cart.update_quantity(id, delta);
        if mutation != CartMutation::NotFound {
            self.cart.persist(self.storage.as_ref())?;
        }
        Ok(mutation)
    }

    /// Drop a line item entirely. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<bool> {
        let removed = self.cart.remove(id);
        if removed {
            self.cart.persist(self.storage.as_ref())?;
        }
        Ok(removed)
    }

    /// Empty the cart and abandon any open checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn clear_cart(&mut self) -> Result<()> {
        self.cart.clear();
        self.checkout = None;
        self.cart.persist(self.storage.as_ref())?;
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// The current checkout step, if a flow is open.
    #[must_use]
    pub fn checkout_step(&self) -> Option<CheckoutStep> {
        self.checkout.as_ref().map(CheckoutFlow::step)
    }

    /// Open a fresh checkout flow at the shipping-info step. Any previous
    /// flow is discarded.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` when the cart is empty.
    pub fn open_checkout(&mut self) -> Result<()> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }
        self.checkout = Some(CheckoutFlow::new());
        Ok(())
    }

    /// Validate shipping info and move to the confirmation step.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotOpen` without an open flow, or the first
    /// validation failure.
    pub fn submit_shipping(&mut self, form: &ShippingForm) -> Result<()> {
        let flow = self.checkout.as_mut().ok_or(CheckoutError::NotOpen)?;
        flow.advance(form)?;
        Ok(())
    }

    /// Return from confirmation to the shipping-info step.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotOpen` without an open flow.
    pub fn back_to_shipping(&mut self) -> Result<()> {
        let flow = self.checkout.as_mut().ok_or(CheckoutError::NotOpen)?;
        flow.retreat();
        Ok(())
    }

    /// Finalize the order: compose the order message and link, then clear
    /// the cart and close the flow.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotConfirmed` unless the flow reached the
    /// confirmation step.
    pub fn confirm_order(&mut self) -> Result<OrderHandoff> {
        let flow = self.checkout.as_ref().ok_or(CheckoutError::NotOpen)?;
        if flow.step() != CheckoutStep::Confirmation {
            return Err(CheckoutError::NotConfirmed.into());
        }
        let shipping = flow.shipping().ok_or(CheckoutError::NotConfirmed)?;

        let totals = self.totals();
        let message = checkout::order_message(
            &self.config.store_name,
            self.cart.items(),
            &totals,
            shipping,
        );
        let url = whatsapp::chat_link(&self.config.whatsapp_number, &message)?;

        info!(
            items = self.cart.items().len(),
            total = %totals.grand_total,
            "Order handed off to WhatsApp"
        );

        self.cart.clear();
        self.cart.persist(self.storage.as_ref())?;
        self.checkout = None;

        Ok(OrderHandoff { message, url })
    }

    /// Compose a stock/price inquiry for the current cart. The cart is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` when the cart is empty.
    pub fn quick_inquiry(&self) -> Result<OrderHandoff> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }
        let message = checkout::inquiry_message(&self.config.store_name, self.cart.items());
        let url = whatsapp::chat_link(&self.config.whatsapp_number, &message)?;
        Ok(OrderHandoff { message, url })
    }

    // =========================================================================
    // Store Locator
    // =========================================================================

    /// Resolve a city, record it as a recent search, and report the nearest
    /// outlet.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank or unknown city.
    pub async fn locate_city(&mut self, query: &str) -> Result<CityReport> {
        let resolved = self.geocoder.resolve(query).await?;
        let display_name = resolved.location.display_name();

        self.recent.record(&display_name);
        self.recent.persist(self.storage.as_ref())?;

        let nearest = nearest_store(resolved.location.lat, resolved.location.lon);
        info!(
            city = %display_name,
            store = nearest.store.name,
            distance = %nearest.distance_text(),
            "City located"
        );

        Ok(CityReport {
            display_name,
            country: resolved.location.country,
            lat: resolved.location.lat,
            lon: resolved.location.lon,
            source: resolved.source,
            nearest,
        })
    }

    /// The most recent searches, newest first, at most `limit`.
    #[must_use]
    pub fn recent_searches(&self, limit: usize) -> &[String] {
        self.recent.list(limit)
    }
}

#[cfg(test)]
mod tests {
    use supermart_core::{Rating, Rupiah};

    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: i64, price: i64, discount: u8) -> Product {
        let original_price = Rupiah::from_int(price);
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: "test".to_string(),
            category: "test".to_string(),
            image: String::new(),
            price: original_price.discounted_by(discount),
            original_price,
            discount,
            rating: Rating::new(4.0, 10),
        }
    }

    fn storefront() -> Storefront {
        let mut store =
            Storefront::new(StoreConfig::default(), Rc::new(MemoryStorage::new())).expect("new");
        store.install_catalog(vec![product(1, 50_000, 0), product(2, 120_000, 10)]);
        store
    }

    fn valid_form() -> ShippingForm {
        ShippingForm {
            full_name: "Budi Santoso".to_string(),
            email: "budi@example.com".to_string(),
            whatsapp: "6281234567890".to_string(),
            city: "Jakarta".to_string(),
            address: "Jl. Thamrin No. 10".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_add_to_cart_requires_known_product() {
        let mut store = storefront();
        assert!(store.add_to_cart(ProductId::new(99), 1).is_err());
        store.add_to_cart(ProductId::new(1), 2).expect("add");
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_cart_survives_restart_on_shared_storage() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        let mut store =
            Storefront::new(StoreConfig::default(), Rc::clone(&storage)).expect("new");
        store.install_catalog(vec![product(1, 50_000, 0)]);
        store.add_to_cart(ProductId::new(1), 3).expect("add");
        drop(store);

        let restarted = Storefront::new(StoreConfig::default(), storage).expect("new");
        assert_eq!(restarted.item_count(), 3);
    }

    #[test]
    fn test_checkout_requires_items() {
        let mut store = storefront();
        assert!(store.open_checkout().is_err());
        store.add_to_cart(ProductId::new(1), 1).expect("add");
        store.open_checkout().expect("open");
        assert_eq!(store.checkout_step(), Some(CheckoutStep::ShippingInfo));
    }

    #[test]
    fn test_confirm_before_shipping_is_rejected() {
        let mut store = storefront();
        store.add_to_cart(ProductId::new(1), 1).expect("add");
        store.open_checkout().expect("open");
        assert!(store.confirm_order().is_err());
    }

    #[test]
    fn test_full_checkout_clears_cart_and_flow() {
        let mut store = storefront();
        store.add_to_cart(ProductId::new(1), 2).expect("add");
        store.open_checkout().expect("open");
        store.submit_shipping(&valid_form()).expect("shipping");
        assert_eq!(store.checkout_step(), Some(CheckoutStep::Confirmation));

        let handoff = store.confirm_order().expect("confirm");
        assert!(handoff.message.contains("Product 1"));
        assert!(handoff.message.contains("Jumlah: 2"));
        assert!(handoff.message.contains("Rp 100.000"));
        assert_eq!(handoff.url.host_str(), Some("wa.me"));

        assert_eq!(store.item_count(), 0);
        assert_eq!(store.checkout_step(), None);
    }

    #[test]
    fn test_back_to_shipping_keeps_flow_open() {
        let mut store = storefront();
        store.add_to_cart(ProductId::new(1), 1).expect("add");
        store.open_checkout().expect("open");
        store.submit_shipping(&valid_form()).expect("shipping");
        store.back_to_shipping().expect("back");
        assert_eq!(store.checkout_step(), Some(CheckoutStep::ShippingInfo));
    }

    #[test]
    fn test_quick_inquiry_keeps_cart() {
        let mut store = storefront();
        assert!(store.quick_inquiry().is_err());
        store.add_to_cart(ProductId::new(2), 1).expect("add");

        let handoff = store.quick_inquiry().expect("inquiry");
        assert!(handoff.message.contains("bertanya tentang produk"));
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_totals_use_configured_rates() {
        let mut config = StoreConfig::default();
        config.shipping.free_threshold = Rupiah::from_int(40_000);

        let mut store = Storefront::new(config, Rc::new(MemoryStorage::new())).expect("new");
        store.install_catalog(vec![product(1, 50_000, 0)]);
        store.add_to_cart(ProductId::new(1), 1).expect("add");

        assert_eq!(store.totals().shipping, Rupiah::ZERO);
    }

    #[tokio::test]
    async fn test_locate_city_records_recent_search() {
        let mut store = storefront();
        let report = store.locate_city("bandung").await.expect("locate");

        assert_eq!(report.display_name, "Bandung");
        assert_eq!(report.source, GeoSource::LocalFallback);
        assert_eq!(report.nearest.store.name, "Bandung");
        assert_eq!(store.recent_searches(5), ["Bandung"]);
    }

    #[tokio::test]
    async fn test_locate_unknown_city_is_error_and_not_recorded() {
        let mut store = storefront();
        assert!(store.locate_city("atlantis").await.is_err());
        assert!(store.recent_searches(5).is_empty());
    }
}
