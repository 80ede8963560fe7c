//! Shopping cart ledger.
//!
//! An ordered sequence of line items in insertion order, one per product id.
//! The ledger itself is pure in-memory state; the controller persists it
//! through [`crate::storage`] after every mutation and restores it at
//! startup.

use serde::{Deserialize, Serialize};
use supermart_core::{ProductId, Rupiah};

use crate::catalog::Product;
use crate::storage::{self, Storage, StorageError, keys};

/// Free-shipping threshold and flat fee.
///
/// Configuration values, not hardcoded logic: see [`crate::config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingRates {
    /// Shipping is free when the subtotal is strictly above this.
    pub free_threshold: Rupiah,
    /// Flat fee charged at or below the threshold.
    pub flat_fee: Rupiah,
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self {
            free_threshold: Rupiah::from_int(200_000),
            flat_fee: Rupiah::from_int(15_000),
        }
    }
}

/// One cart entry: a product snapshot plus a positive quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    /// Display price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Rupiah {
        self.product.price * self.quantity
    }
}

/// Derived cart totals. `grand_total = subtotal - discount_total + shipping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Rupiah,
    pub discount_total: Rupiah,
    pub shipping: Rupiah,
    pub grand_total: Rupiah,
}

/// Outcome of a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMutation {
    /// Quantity changed and stayed positive.
    Updated,
    /// Quantity reached zero or below; the line item was removed.
    Removed,
    /// No line item for the product id; nothing happened.
    NotFound,
}

/// The cart: line items in insertion order, one per product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartLedger {
    items: Vec<LineItem>,
}

impl CartLedger {
    /// Restore the ledger from durable storage (empty when nothing stored).
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be read.
    pub fn load(storage: &dyn Storage) -> Result<Self, StorageError> {
        let items = storage::read_value(storage, keys::CART)?.unwrap_or_default();
        Ok(Self { items })
    }

    /// Write the ledger to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn persist(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        storage::write_value(storage, keys::CART, &self.items)
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// True when the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all line items (the cart badge number).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Add `quantity` of a product. Re-adding an existing product increments
    /// its line item instead of duplicating it. Adding zero is a no-op, so a
    /// line item always holds a positive quantity.
    pub fn add(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.product.id == product.id) {
            item.quantity += quantity;
        } else {
            self.items.push(LineItem { product, quantity });
        }
    }

    /// Apply a signed quantity delta. A result of zero or below removes the
    /// line item entirely; an unknown id is a silent no-op.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> CartMutation {
        let Some((index, item)) = self
            .items
            .iter_mut()
            .enumerate()
            .find(|(_, item)| item.product.id == id)
        else {
            return CartMutation::NotFound;
        };
        let updated = i64::from(item.quantity) + delta;
        if updated <= 0 {
            self.items.remove(index);
            CartMutation::Removed
        } else {
            item.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
            CartMutation::Updated
        }
    }

    /// Delete the line item for a product. Returns whether anything was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != id);
        self.items.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Derived totals over the current line items.
    ///
    /// Shipping is free only when the subtotal is strictly above the
    /// threshold; a subtotal exactly at the threshold still pays the fee.
    #[must_use]
    pub fn totals(&self, rates: &ShippingRates) -> CartTotals {
        let subtotal: Rupiah = self.items.iter().map(LineItem::line_total).sum();
        let discount_total: Rupiah = self
            .items
            .iter()
            .filter(|item| item.product.discount > 0)
            .map(|item| (item.product.original_price - item.product.price) * item.quantity)
            .sum();
        let shipping = if subtotal > rates.free_threshold {
            Rupiah::ZERO
        } else {
            rates.flat_fee
        };
        CartTotals {
            subtotal,
            discount_total,
            shipping,
            grand_total: subtotal - discount_total + shipping,
        }
    }
}
