//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod locate;
pub mod order;

use std::rc::Rc;

use supermart_storefront::config::StoreConfig;
use supermart_storefront::error::Result;
use supermart_storefront::state::Storefront;
use supermart_storefront::storage::JsonFileStorage;

/// Open a storefront session over the configured JSON storage file,
/// restoring the persisted cart and recent searches.
pub fn open_session() -> Result<Storefront> {
    let config = StoreConfig::from_env()?;
    let storage = Rc::new(JsonFileStorage::new(config.storage_path.clone()));
    Storefront::new(config, storage)
}

/// Open a session and load the remote catalog.
pub async fn open_session_with_catalog() -> Result<Storefront> {
    let mut store = open_session()?;
    store.load_catalog().await?;
    Ok(store)
}
