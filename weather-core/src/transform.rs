//! Mapping of validated WeatherAPI.com payloads into [`WeatherSnapshot`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::{CityCandidate, Coordinates, WeatherSnapshot};

const KPH_PER_MPS: f64 = 3.6;

/// Condition code used when the payload carries a non-integral code.
const UNKNOWN_CONDITION_CODE: i64 = 0;

/// `current.json` success payload. Every field listed here is required;
/// deserializing into it is the structural validation step. Numeric fields
/// accept any JSON number, so `is_day: 1.0` or `code: 1003.0` still parse.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrentResponse {
    pub location: RawLocation,
    pub current: RawCurrent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: String,
    pub localtime_epoch: f64,
    pub localtime: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    pub text: String,
    pub icon: String,
    pub code: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrent {
    pub last_updated_epoch: f64,
    pub last_updated: String,
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub is_day: f64,
    pub condition: RawCondition,
    pub wind_kph: f64,
    pub wind_degree: f64,
    pub humidity: f64,
}

/// One element of the `search.json` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCity {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub url: String,
}

impl From<RawCity> for CityCandidate {
    fn from(raw: RawCity) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            region: raw.region,
            country: raw.country,
            lat: raw.lat,
            lon: raw.lon,
            url: raw.url,
        }
    }
}

/// Build a snapshot from a validated payload.
///
/// `fetched_at` only feeds the snapshot id. The current-conditions endpoint
/// has no min/max, so both are the current reading.
pub fn transform(raw: RawCurrentResponse, fetched_at: DateTime<Utc>) -> WeatherSnapshot {
    let RawCurrentResponse { location, current } = raw;

    WeatherSnapshot {
        id: format!("{}-{}-{}", location.lat, location.lon, fetched_at.timestamp_millis()),
        name: location.name,
        country: location.country,
        coord: Coordinates::new(location.lat, location.lon),
        icon_url: Some(normalize_icon_url(&current.condition.icon)),
        temperature: current.temp_c,
        feels_like: current.feelslike_c,
        temp_min: current.temp_c,
        temp_max: current.temp_c,
        humidity: current.humidity,
        wind_speed: current.wind_kph / KPH_PER_MPS,
        wind_direction: current.wind_degree,
        weather_code: condition_code(current.condition.code),
        is_day: current.is_day == 1.0,
        description: current.condition.text,
        timestamp: current.last_updated,
    }
}

/// Integral codes map to themselves (saturating at the `i64` bounds); anything
/// else becomes [`UNKNOWN_CONDITION_CODE`], which no theme bucket claims.
fn condition_code(raw: f64) -> i64 {
    if raw.fract() == 0.0 { raw as i64 } else { UNKNOWN_CONDITION_CODE }
}

/// Turn a protocol-relative URL (`//host/path`) into `https://host/path`.
/// Anything else is returned unchanged.
pub fn normalize_icon_url(icon: &str) -> String {
    match icon.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => icon.to_string(),
    }
}
