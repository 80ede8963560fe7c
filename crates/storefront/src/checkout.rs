//! Two-step checkout flow and order message formatting.
//!
//! Step 1 collects and validates shipping info; step 2 confirms and hands
//! the order off as a WhatsApp message. The flow is transient: it is reset
//! every time checkout opens and destroyed on submit.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use supermart_core::Rupiah;
use thiserror::Error;

use crate::cart::{CartTotals, LineItem};

/// Indonesian mobile number: country code 62, mobile prefix 8, a non-zero
/// digit, then 7-11 further digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^628[1-9][0-9]{7,11}$").expect("Invalid regex"));

/// Shipping-info field names, used to report the first failing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingField {
    FullName,
    Email,
    Whatsapp,
    City,
    Address,
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FullName => "full name",
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
            Self::City => "city",
            Self::Address => "address",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout or quick inquiry attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A shipping-info field is missing or malformed.
    #[error("invalid {field}: {message}")]
    Validation {
        field: ShippingField,
        message: String,
    },

    /// No checkout flow is in progress.
    #[error("checkout is not open")]
    NotOpen,

    /// Submit attempted before the confirmation step.
    #[error("order not yet confirmed")]
    NotConfirmed,
}

/// Raw shipping-info fields as collected by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct ShippingForm {
    pub full_name: String,
    pub email: String,
    pub whatsapp: String,
    pub city: String,
    pub address: String,
    pub notes: String,
}

/// Validated shipping info, stored after step 1 succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub whatsapp: String,
    pub city: String,
    pub address: String,
    pub notes: Option<String>,
}

/// The two sequential checkout stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    ShippingInfo,
    Confirmation,
}

/// The checkout state machine. Lives only while checkout is open.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    shipping: Option<ShippingDetails>,
}

impl CheckoutFlow {
    /// Open a fresh flow at the shipping-info step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: CheckoutStep::ShippingInfo,
            shipping: None,
        }
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The shipping record, once step 1 has succeeded.
    #[must_use]
    pub const fn shipping(&self) -> Option<&ShippingDetails> {
        self.shipping.as_ref()
    }

    /// Validate the form and move to confirmation. On validation failure the
    /// flow stays at the shipping-info step and the first failing field is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Validation` for the first offending field.
    pub fn advance(&mut self, form: &ShippingForm) -> Result<(), CheckoutError> {
        let details = validate_shipping(form)?;
        self.shipping = Some(details);
        self.step = CheckoutStep::Confirmation;
        Ok(())
    }

    /// Go back to the shipping-info step; the record stays editable.
    pub const fn retreat(&mut self) {
        self.step = CheckoutStep::ShippingInfo;
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate shipping info in form order, reporting the first failure.
///
/// Phone numbers must match the local WhatsApp pattern; email only has to be
/// present (format strictness is a UI concern).
///
/// # Errors
///
/// Returns `CheckoutError::Validation` for the first offending field.
pub fn validate_shipping(form: &ShippingForm) -> Result<ShippingDetails, CheckoutError> {
    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Err(validation(ShippingField::FullName, "Harap masukkan nama lengkap"));
    }

    let email = form.email.trim();
    if email.is_empty() {
        return Err(validation(ShippingField::Email, "Harap masukkan email"));
    }

    let whatsapp = form.whatsapp.trim();
    if whatsapp.is_empty() {
        return Err(validation(ShippingField::Whatsapp, "Harap masukkan nomor WhatsApp"));
    }
    if !PHONE_RE.is_match(whatsapp) {
        return Err(validation(
            ShippingField::Whatsapp,
            "Format nomor WhatsApp tidak valid. Contoh: 6281234567890",
        ));
    }

    let city = form.city.trim();
    if city.is_empty() {
        return Err(validation(ShippingField::City, "Harap pilih kota"));
    }

    let address = form.address.trim();
    if address.is_empty() {
        return Err(validation(ShippingField::Address, "Harap masukkan alamat lengkap"));
    }

    let notes = form.notes.trim();
    Ok(ShippingDetails {
        full_name: full_name.to_string(),
        email: email.to_string(),
        whatsapp: whatsapp.to_string(),
        city: city.to_string(),
        address: address.to_string(),
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    })
}

fn validation(field: ShippingField, message: &str) -> CheckoutError {
    CheckoutError::Validation {
        field,
        message: message.to_string(),
    }
}

// =============================================================================
// Order Messages
// =============================================================================

/// Build the full order message: greeting, item lines, order summary,
/// shipping block, closing prompt.
#[must_use]
pub fn order_message(
    store_name: &str,
    items: &[LineItem],
    totals: &CartTotals,
    shipping: &ShippingDetails,
) -> String {
    let mut message = format!("Halo {store_name}! Saya ingin memesan produk berikut:\n\n");

    for (index, item) in items.iter().enumerate() {
        message.push_str(&format!("{}. {}\n", index + 1, item.product.title));
        message.push_str(&format!("   Jumlah: {}\n", item.quantity));
        message.push_str(&format!("   Harga: {}\n\n", item.line_total()));
    }

    message.push_str("*RINGKASAN PESANAN:*\n");
    message.push_str(&format!("Subtotal: {}\n", totals.subtotal));
    if totals.discount_total > Rupiah::ZERO {
        message.push_str(&format!("Diskon: -{}\n", totals.discount_total));
    }
    if totals.shipping == Rupiah::ZERO {
        message.push_str("Ongkos Kirim: Gratis\n");
    } else {
        message.push_str(&format!("Ongkos Kirim: {}\n", totals.shipping));
    }
    message.push_str(&format!("*Total: {}*\n\n", totals.grand_total));

    message.push_str("*DATA PENGIRIMAN:*\n");
    message.push_str(&format!("Nama: {}\n", shipping.full_name));
    message.push_str(&format!("Email: {}\n", shipping.email));
    message.push_str(&format!("WhatsApp: {}\n", shipping.whatsapp));
    message.push_str(&format!("Kota: {}\n", shipping.city));
    message.push_str(&format!("Alamat: {}\n", shipping.address));
    if let Some(notes) = &shipping.notes {
        message.push_str(&format!("Catatan: {notes}\n"));
    }

    message.push_str("\nSilakan konfirmasi ketersediaan stock dan total pembayaran. Terima kasih!");
    message
}

/// Build the short inquiry message: greeting, item name/quantity lines,
/// closing prompt. No shipping info.
#[must_use]
pub fn inquiry_message(store_name: &str, items: &[LineItem]) -> String {
    let mut message = format!("Halo {store_name}! Saya ingin bertanya tentang produk berikut:\n\n");

    for (index, item) in items.iter().enumerate() {
        message.push_str(&format!("{}. {}\n", index + 1, item.product.title));
        message.push_str(&format!("   Jumlah: {}\n\n", item.quantity));
    }

    message.push_str("Silakan berikan informasi stock dan harga terbaru. Terima kasih!");
    message
}
