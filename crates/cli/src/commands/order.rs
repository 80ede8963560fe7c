//! Checkout and order handoff commands.

use supermart_storefront::checkout::ShippingForm;
use supermart_storefront::error::Result;

use super::open_session;

/// Run the whole checkout flow over the persisted cart and print the
/// composed order with its WhatsApp link.
pub fn checkout(
    name: String,
    email: String,
    whatsapp: String,
    city: String,
    address: String,
    notes: Option<String>,
) -> Result<()> {
    let mut store = open_session()?;
    let form = ShippingForm {
        full_name: name,
        email,
        whatsapp,
        city,
        address,
        notes: notes.unwrap_or_default(),
    };

    store.open_checkout()?;
    store.submit_shipping(&form)?;
    let handoff = store.confirm_order()?;

    println!("{}", handoff.message);
    println!();
    println!("Kirim pesanan Anda: {}", handoff.url);
    Ok(())
}

/// Print a stock/price inquiry for the cart with its WhatsApp link. The
/// cart stays as it is.
pub fn inquiry() -> Result<()> {
    let store = open_session()?;
    let handoff = store.quick_inquiry()?;

    println!("{}", handoff.message);
    println!();
    println!("Kirim pertanyaan Anda: {}", handoff.url);
    Ok(())
}
