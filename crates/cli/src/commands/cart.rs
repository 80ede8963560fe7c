//! Cart management commands.

use supermart_core::{ProductId, Rupiah};
use supermart_storefront::cart::CartMutation;
use supermart_storefront::error::Result;

use super::{open_session, open_session_with_catalog};

/// Print the cart contents and totals.
pub fn show() -> Result<()> {
    let store = open_session()?;
    if store.cart_items().is_empty() {
        println!("Keranjang belanja kosong");
        return Ok(());
    }

    for item in store.cart_items() {
        println!(
            "[{}] {} x{} = {}",
            item.product.id,
            item.product.title,
            item.quantity,
            item.line_total()
        );
    }

    let totals = store.totals();
    println!();
    println!("Subtotal:     {}", totals.subtotal);
    if totals.discount_total > Rupiah::ZERO {
        println!("Diskon:       -{}", totals.discount_total);
    }
    if totals.shipping == Rupiah::ZERO {
        println!("Ongkos Kirim: Gratis");
    } else {
        println!("Ongkos Kirim: {}", totals.shipping);
    }
    println!("Total:        {}", totals.grand_total);
    Ok(())
}

/// Add a catalog product to the cart.
pub async fn add(id: ProductId, quantity: u32) -> Result<()> {
    let mut store = open_session_with_catalog().await?;
    store.add_to_cart(id, quantity)?;
    println!("Produk ditambahkan ke keranjang! ({} item)", store.item_count());
    Ok(())
}

/// Apply a signed quantity delta to a line item.
pub fn update(id: ProductId, delta: i64) -> Result<()> {
    let mut store = open_session()?;
    match store.update_quantity(id, delta)? {
        CartMutation::Updated => println!("Jumlah diperbarui ({} item)", store.item_count()),
        CartMutation::Removed => println!("Produk dihapus dari keranjang"),
        CartMutation::NotFound => println!("Produk tidak ada di keranjang"),
    }
    Ok(())
}

/// Remove a line item.
pub fn remove(id: ProductId) -> Result<()> {
    let mut store = open_session()?;
    if store.remove_from_cart(id)? {
        println!("Produk dihapus dari keranjang");
    } else {
        println!("Produk tidak ada di keranjang");
    }
    Ok(())
}

/// Empty the cart.
pub fn clear() -> Result<()> {
    let mut store = open_session()?;
    store.clear_cart()?;
    println!("Keranjang dikosongkan");
    Ok(())
}
