//! Store locator commands.

use supermart_storefront::error::Result;
use supermart_storefront::geo::GeoSource;
use supermart_storefront::recent::DISPLAY_LIMIT;

use super::open_session;

/// Resolve a city and print the nearest outlet.
pub async fn city(query: &str) -> Result<()> {
    let mut store = open_session()?;
    let report = store.locate_city(query).await?;

    match report.source {
        GeoSource::Api => println!("Lokasi {} berhasil ditemukan!", report.display_name),
        GeoSource::LocalFallback => {
            println!("Lokasi {} ditemukan (data lokal)", report.display_name);
        }
    }
    println!("{}, {} ({:.4}, {:.4})", report.display_name, report.country, report.lat, report.lon);
    println!(
        "Toko terdekat: {} {} ({}) - {}",
        store.config().store_name,
        report.nearest.store.name,
        report.nearest.distance_text(),
        report.nearest.store.address
    );
    Ok(())
}

/// Print the most recent city searches.
pub fn recent() -> Result<()> {
    let store = open_session()?;
    let searches = store.recent_searches(DISPLAY_LIMIT);
    if searches.is_empty() {
        println!("Belum ada pencarian");
        return Ok(());
    }
    for city in searches {
        println!("{city}");
    }
    Ok(())
}
