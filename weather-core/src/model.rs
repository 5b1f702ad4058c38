use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One entry of a city-name search, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCandidate {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub url: String,
}

impl CityCandidate {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// Current conditions for one location, as produced by a single fetch.
///
/// `id` is unique per fetch and is not a city identity: two fetches of the
/// same city yield different ids. Recent searches deduplicate on `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub id: String,
    pub name: String,
    pub country: String,
    pub coord: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Degrees Celsius.
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Percent, 0-100.
    pub humidity: f64,
    /// Meters per second.
    pub wind_speed: f64,
    /// Degrees, 0-360.
    pub wind_direction: f64,
    pub weather_code: i64,
    pub is_day: bool,
    pub description: String,
    /// Provider-local observation time, e.g. "2024-01-01 12:00".
    pub timestamp: String,
}
