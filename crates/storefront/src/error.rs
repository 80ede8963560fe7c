//! Unified error handling.
//!
//! Provides a unified `StoreError` type covering every subsystem. State
//! transitions in [`crate::state`] return `Result<T, StoreError>`; the
//! presentation layer turns errors into user notifications via
//! [`StoreError::notification`].

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::geo::GeoError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Catalog fetch or lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout flow rejected an operation.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Store locator failed.
    #[error("Geo error: {0}")]
    Geo(#[from] GeoError),

    /// Durable storage read or write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A generated link was not a valid URL.
    #[error("Invalid link: {0}")]
    Link(#[from] url::ParseError),
}

impl StoreError {
    /// The Indonesian toast text shown for this error. Internal failure
    /// detail stays in the logs, not in the notification.
    #[must_use]
    pub fn notification(&self) -> String {
        match self {
            Self::Catalog(CatalogError::UnknownProduct(_)) => {
                "Produk tidak ditemukan".to_string()
            }
            Self::Catalog(_) => {
                "Gagal memuat produk. Periksa koneksi internet Anda.".to_string()
            }
            Self::Checkout(CheckoutError::EmptyCart) => "Keranjang belanja kosong!".to_string(),
            Self::Checkout(error) => match error {
                CheckoutError::Validation { message, .. } => message.clone(),
                _ => "Checkout belum siap. Coba ulangi dari awal.".to_string(),
            },
            Self::Geo(error @ (GeoError::EmptyQuery | GeoError::NotFound)) => error.to_string(),
            Self::Geo(GeoError::Http(_)) => {
                "Gagal menemukan lokasi. Periksa koneksi internet atau coba kota lain.".to_string()
            }
            Self::Storage(_) | Self::Config(_) | Self::Link(_) => {
                "Terjadi kesalahan. Coba lagi.".to_string()
            }
        }
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::ShippingField;

    #[test]
    fn test_validation_notification_passes_message_through() {
        let error = StoreError::from(CheckoutError::Validation {
            field: ShippingField::City,
            message: "Harap pilih kota".to_string(),
        });
        assert_eq!(error.notification(), "Harap pilih kota");
    }

    #[test]
    fn test_empty_cart_notification() {
        let error = StoreError::from(CheckoutError::EmptyCart);
        assert_eq!(error.notification(), "Keranjang belanja kosong!");
    }

    #[test]
    fn test_geo_not_found_notification_uses_error_text() {
        let error = StoreError::from(GeoError::NotFound);
        assert_eq!(
            error.notification(),
            "Kota tidak ditemukan. Coba nama kota yang berbeda."
        );
    }
}
