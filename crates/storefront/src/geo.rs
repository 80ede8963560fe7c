//! Store locator: city geocoding and nearest-store lookup.
//!
//! City names resolve through the OpenWeatherMap geocoding API when a key is
//! configured, with a small table of major Indonesian cities as an offline
//! fallback. Distances use the haversine formula over a spherical Earth.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, warn};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Errors from the store locator.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The search query was empty after trimming.
    #[error("Masukkan nama kota terlebih dahulu!")]
    EmptyQuery,

    /// The city matched neither the API nor the local table.
    #[error("Kota tidak ditemukan. Coba nama kota yang berbeda.")]
    NotFound,

    /// Transport failure talking to the geocoding API.
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A resolved place: coordinates plus naming metadata.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl GeoLocation {
    /// "Name, State" when the API reports a state, plain name otherwise.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}", self.name, state),
            None => self.name.clone(),
        }
    }
}

/// Where a resolved location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoSource {
    /// The remote geocoding API.
    Api,
    /// The built-in table of major Indonesian cities.
    LocalFallback,
}

/// A geocoding result together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub location: GeoLocation,
    pub source: GeoSource,
}

/// A physical SuperMart outlet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreLocation {
    pub name: &'static str,
    pub address: &'static str,
    pub lat: f64,
    pub lon: f64,
}

/// All physical outlets, in fixed order. Ties in distance resolve to the
/// earliest entry.
pub const STORE_LOCATIONS: [StoreLocation; 4] = [
    StoreLocation {
        name: "Jakarta Pusat",
        address: "Jl. Thamrin No. 10",
        lat: -6.2088,
        lon: 106.8456,
    },
    StoreLocation {
        name: "Bandung",
        address: "Jl. Asia Afrika No. 100",
        lat: -6.9175,
        lon: 107.6191,
    },
    StoreLocation {
        name: "Surabaya",
        address: "Jl. Tunjungan No. 50",
        lat: -7.2504,
        lon: 112.7688,
    },
    StoreLocation {
        name: "Jakarta Selatan",
        address: "Jl. Sudirman Kav. 25",
        lat: -6.2299,
        lon: 106.8282,
    },
];

/// Offline city table used when the geocoding API is unreachable or returns
/// nothing. Keys are matched case-insensitively.
const LOCAL_CITIES: [(&str, f64, f64, &str); 8] = [
    ("jakarta", -6.2088, 106.8456, "Jakarta"),
    ("bandung", -6.9175, 107.6191, "Bandung"),
    ("surabaya", -7.2504, 112.7688, "Surabaya"),
    ("yogyakarta", -7.7956, 110.3695, "Yogyakarta"),
    ("bali", -8.4095, 115.1889, "Denpasar"),
    ("semarang", -6.9667, 110.4167, "Semarang"),
    ("medan", 3.5952, 98.6722, "Medan"),
    ("makassar", -5.1477, 119.4327, "Makassar"),
];

/// Look a city up in the offline table.
#[must_use]
pub fn local_city(query: &str) -> Option<GeoLocation> {
    let key = query.trim().to_lowercase();
    LOCAL_CITIES
        .iter()
        .find(|(name, _, _, _)| *name == key)
        .map(|&(_, lat, lon, display)| GeoLocation {
            lat,
            lon,
            name: display.to_string(),
            country: "Indonesia".to_string(),
            state: None,
        })
}

/// Great-circle distance between two coordinates in kilometres.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// The outlet nearest to a coordinate, with its distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestStore {
    pub store: StoreLocation,
    pub distance_km: f64,
}

impl NearestStore {
    /// Distance rendered the way the locator shows it: metres below one
    /// kilometre, one decimal of kilometres otherwise.
    #[must_use]
    pub fn distance_text(&self) -> String {
        if self.distance_km < 1.0 {
            format!("{} meter", (self.distance_km * 1000.0).round() as i64)
        } else {
            format!("{:.1} km", self.distance_km)
        }
    }
}

/// Find the outlet with the smallest haversine distance to a coordinate.
/// On a tie the earlier entry in [`STORE_LOCATIONS`] wins.
#[must_use]
pub fn nearest_store(lat: f64, lon: f64) -> NearestStore {
    let mut best = NearestStore {
        store: STORE_LOCATIONS[0],
        distance_km: haversine_km(lat, lon, STORE_LOCATIONS[0].lat, STORE_LOCATIONS[0].lon),
    };
    for store in &STORE_LOCATIONS[1..] {
        let distance_km = haversine_km(lat, lon, store.lat, store.lon);
        if distance_km < best.distance_km {
            best = NearestStore {
                store: *store,
                distance_km,
            };
        }
    }
    best
}

/// Client for the OpenWeatherMap direct geocoding endpoint.
///
/// Without an API key the client skips the network entirely and resolves
/// from the local table only.
pub struct Geocoder {
    client: reqwest::Client,
    url: String,
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for Geocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geocoder")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl Geocoder {
    #[must_use]
    pub fn new(url: String, api_key: Option<SecretString>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            api_key,
        }
    }

    /// Resolve a city name to coordinates.
    ///
    /// Tries the API first, then falls back to the local table when the API
    /// is unconfigured, unreachable, or finds nothing.
    ///
    /// # Errors
    ///
    /// Returns `GeoError::EmptyQuery` for a blank query and
    /// `GeoError::NotFound` when neither source knows the city.
    pub async fn resolve(&self, query: &str) -> Result<ResolvedLocation, GeoError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeoError::EmptyQuery);
        }

        if let Some(api_key) = &self.api_key {
            match self.resolve_remote(query, api_key).await {
                Ok(Some(location)) => {
                    debug!(city = %location.name, lat = location.lat, lon = location.lon, "Geocoded via API");
                    return Ok(ResolvedLocation {
                        location,
                        source: GeoSource::Api,
                    });
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(%error, "Geocoding API failed, trying local data");
                }
            }
        }

        local_city(query)
            .map(|location| ResolvedLocation {
                location,
                source: GeoSource::LocalFallback,
            })
            .ok_or(GeoError::NotFound)
    }

    async fn resolve_remote(
        &self,
        query: &str,
        api_key: &SecretString,
    ) -> Result<Option<GeoLocation>, GeoError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("q", query), ("limit", "1"), ("appid", api_key.expose_secret())])
            .send()
            .await?
            .error_for_status()?;

        let mut places: Vec<GeoLocation> = response.json().await?;
        Ok(if places.is_empty() {
            None
        } else {
            Some(places.remove(0))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_city_is_case_insensitive() {
        let jakarta = local_city("  JaKaRtA ").expect("known city");
        assert_eq!(jakarta.name, "Jakarta");
        assert_eq!(jakarta.country, "Indonesia");
        assert!((jakarta.lat - (-6.2088)).abs() < 1e-9);
        assert!((jakarta.lon - 106.8456).abs() < 1e-9);
    }

    #[test]
    fn test_local_city_bali_maps_to_denpasar() {
        let bali = local_city("bali").expect("known city");
        assert_eq!(bali.name, "Denpasar");
    }

    #[test]
    fn test_local_city_unknown() {
        assert!(local_city("atlantis").is_none());
    }

    #[test]
    fn test_display_name_with_and_without_state() {
        let mut place = GeoLocation {
            lat: 0.0,
            lon: 0.0,
            name: "Yogyakarta".to_string(),
            country: "ID".to_string(),
            state: Some("Special Region of Yogyakarta".to_string()),
        };
        assert_eq!(place.display_name(), "Yogyakarta, Special Region of Yogyakarta");
        place.state = None;
        assert_eq!(place.display_name(), "Yogyakarta");
    }

    #[test]
    fn test_haversine_zero_distance() {
        assert!(haversine_km(-6.2088, 106.8456, -6.2088, 106.8456) < 1e-9);
    }

    #[test]
    fn test_haversine_jakarta_bandung() {
        // Jakarta to Bandung is roughly 120 km as the crow flies.
        let d = haversine_km(-6.2088, 106.8456, -6.9175, 107.6191);
        assert!((d - 118.0).abs() < 10.0, "unexpected distance {d}");
    }

    #[test]
    fn test_nearest_store_from_each_city() {
        let from_bandung = nearest_store(-6.9175, 107.6191);
        assert_eq!(from_bandung.store.name, "Bandung");
        assert!(from_bandung.distance_km < 1e-6);

        let from_surabaya = nearest_store(-7.2504, 112.7688);
        assert_eq!(from_surabaya.store.name, "Surabaya");

        let from_medan = nearest_store(3.5952, 98.6722);
        // Jakarta Pusat is marginally closer to Medan than Jakarta Selatan.
        assert_eq!(from_medan.store.name, "Jakarta Pusat");
    }

    #[test]
    fn test_nearest_store_tie_prefers_earlier_entry() {
        // Exactly at the Jakarta Pusat outlet, distance zero; no other store
        // can beat it with a strictly smaller distance.
        let at_store = nearest_store(STORE_LOCATIONS[0].lat, STORE_LOCATIONS[0].lon);
        assert_eq!(at_store.store.name, "Jakarta Pusat");
    }

    #[test]
    fn test_distance_text_units() {
        let near = NearestStore {
            store: STORE_LOCATIONS[0],
            distance_km: 0.4321,
        };
        assert_eq!(near.distance_text(), "432 meter");

        let far = NearestStore {
            store: STORE_LOCATIONS[0],
            distance_km: 12.34,
        };
        assert_eq!(far.distance_text(), "12.3 km");
    }

    #[tokio::test]
    async fn test_resolve_without_api_key_uses_local_table() {
        let geocoder = Geocoder::new("http://localhost:0/geo".to_string(), None);
        let resolved = geocoder.resolve("jakarta").await.expect("local hit");
        assert_eq!(resolved.source, GeoSource::LocalFallback);
        assert_eq!(resolved.location.name, "Jakarta");
    }

    #[tokio::test]
    async fn test_resolve_rejects_blank_query() {
        let geocoder = Geocoder::new("http://localhost:0/geo".to_string(), None);
        assert!(matches!(geocoder.resolve("   ").await, Err(GeoError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_resolve_unknown_city_without_key() {
        let geocoder = Geocoder::new("http://localhost:0/geo".to_string(), None);
        assert!(matches!(geocoder.resolve("atlantis").await, Err(GeoError::NotFound)));
    }
}
