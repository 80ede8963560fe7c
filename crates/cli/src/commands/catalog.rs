//! Catalog browsing commands.

use supermart_storefront::catalog::{CatalogQuery, CategoryFilter, SortKey};
use supermart_storefront::error::Result;

use super::open_session_with_catalog;

/// List products matching the given filter, search, and sort.
pub async fn products(
    category: Option<String>,
    search: Option<String>,
    sort: SortKey,
) -> Result<()> {
    let store = open_session_with_catalog().await?;
    let query = CatalogQuery {
        category: category.map_or(CategoryFilter::All, CategoryFilter::Category),
        search: search.unwrap_or_default(),
        sort,
    };

    let results = store.query(&query);
    if results.is_empty() {
        println!("Tidak ada produk yang ditemukan");
        return Ok(());
    }

    for product in results {
        if product.discount > 0 {
            println!(
                "[{}] {} - {} (dari {}, -{}%)",
                product.id, product.title, product.price, product.original_price, product.discount
            );
        } else {
            println!("[{}] {} - {}", product.id, product.title, product.price);
        }
        println!(
            "     {} | rating {:.1} ({} ulasan)",
            product.category, product.rating.rate, product.rating.count
        );
    }
    Ok(())
}

/// List the categories present in the catalog, in first-seen order.
pub async fn categories() -> Result<()> {
    let store = open_session_with_catalog().await?;
    for category in store.categories() {
        println!("{category}");
    }
    Ok(())
}
