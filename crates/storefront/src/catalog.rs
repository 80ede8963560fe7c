//! Product catalog: fetch, enrichment, and the filter/sort/search pipeline.
//!
//! Products come from a public catalog API in USD. At load time each one is
//! enriched exactly once: prices are converted to rupiah, roughly 30% of
//! products receive a 10-39% discount, and missing ratings are synthesized.
//! The enrichment is stable for the life of the catalog and reproducible
//! under a fixed RNG seed.

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use supermart_core::{ProductId, Rating, Rupiah};
use thiserror::Error;
use tracing::info;

/// Errors that can occur loading or using the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog endpoint returned a non-success status.
    #[error("catalog API returned status {0}")]
    Status(u16),

    /// A requested product is not in the loaded catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// A catalog product after enrichment.
///
/// `price` is what the customer pays; `original_price` is the pre-discount
/// price. `price <= original_price` and `discount` is in `[0, 100)` by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    /// Display price in rupiah, discount already applied.
    pub price: Rupiah,
    /// Pre-discount price in rupiah.
    pub original_price: Rupiah,
    /// Discount percent, 0 when none.
    pub discount: u8,
    pub rating: Rating,
}

/// Raw product as served by the catalog API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    /// USD price.
    pub price: Decimal,
    pub image: String,
    #[serde(default)]
    pub rating: Option<RawRating>,
}

/// Raw rating as served by the catalog API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRating {
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub count: Option<u32>,
}

/// HTTP client for the product catalog source.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    url: String,
}

impl CatalogClient {
    /// Create a client for the given catalog endpoint.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Fetch the raw product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Status` on a non-success response and
    /// `CatalogError::Http` on transport failure.
    pub async fn fetch(&self) -> Result<Vec<RawProduct>, CatalogError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }
        let raw: Vec<RawProduct> = response.json().await?;
        info!(count = raw.len(), "catalog fetched");
        Ok(raw)
    }
}

/// Enrich raw products: convert USD to rupiah, assign discounts, and
/// synthesize missing ratings.
///
/// The assignment happens once per load; passing a seeded RNG makes it
/// reproducible.
pub fn enrich<R: Rng>(raw: Vec<RawProduct>, exchange_rate: Decimal, rng: &mut R) -> Vec<Product> {
    raw.into_iter()
        .map(|p| {
            let discount: u8 = if rng.random_bool(0.3) {
                rng.random_range(10..40)
            } else {
                0
            };
            let original_price = Rupiah::new(p.price * exchange_rate);
            // Only synthesize what the source did not supply
            let rate = match p.rating.as_ref().and_then(|r| r.rate) {
                Some(rate) => rate,
                None => (rng.random_range(3.0_f64..5.0) * 10.0).round() / 10.0,
            };
            let count = match p.rating.as_ref().and_then(|r| r.count) {
                Some(count) => count,
                None => rng.random_range(50..550),
            };
            Product {
                id: ProductId::new(p.id),
                title: p.title,
                description: p.description,
                category: p.category,
                image: p.image,
                price: original_price.discounted_by(discount),
                original_price,
                discount,
                rating: Rating::new(rate, count),
            }
        })
        .collect()
}

/// Category filter for catalog queries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Match every category.
    #[default]
    All,
    /// Exact category match.
    Category(String),
}

/// Sort order for catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Insertion order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    Title,
    Rating,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "" => Ok(Self::Default),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name" => Ok(Self::Title),
            "rating" => Ok(Self::Rating),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// The active filter/sort/search query.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    pub search: String,
    pub sort: SortKey,
}

/// Holds the loaded products and answers queries over them.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    /// Create a store from already-enriched products.
    #[must_use]
    pub const fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All loaded products, in load order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// True when no catalog has been loaded (or the load failed).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Unique category names, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for p in &self.products {
            if !seen.contains(&p.category.as_str()) {
                seen.push(p.category.as_str());
            }
        }
        seen
    }

    /// Filter by category, then by case-insensitive substring search over
    /// title/description/category, then sort. Pure: identical inputs yield
    /// identical output ordering.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        let term = query.search.to_lowercase();
        let mut matched: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| match &query.category {
                CategoryFilter::All => true,
                CategoryFilter::Category(c) => &p.category == c,
            })
            .filter(|p| {
                term.is_empty()
                    || p.title.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
                    || p.category.to_lowercase().contains(&term)
            })
            .collect();

        match query.sort {
            SortKey::Default => {}
            SortKey::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
            SortKey::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::Title => matched.sort_by(|a, b| a.title.cmp(&b.title)),
            SortKey::Rating => {
                matched.sort_by(|a, b| b.rating.rate.total_cmp(&a.rating.rate));
            }
        }
        matched
    }
}
