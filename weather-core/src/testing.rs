//! Test doubles shared by the unit tests.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Mutex};

use crate::{
    WeatherError, WeatherProvider,
    model::{CityCandidate, Coordinates, WeatherSnapshot},
    storage::KeyValueStore,
};

pub fn snapshot(name: &str, lat: f64, lon: f64, temperature: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        id: format!("{lat}-{lon}-0"),
        name: name.into(),
        country: "Testland".into(),
        coord: Coordinates::new(lat, lon),
        icon_url: Some("https://cdn.weatherapi.com/weather/64x64/day/113.png".into()),
        temperature,
        feels_like: temperature - 1.0,
        temp_min: temperature,
        temp_max: temperature,
        humidity: 60.0,
        wind_speed: 4.0,
        wind_direction: 270.0,
        weather_code: 1000,
        is_day: true,
        description: "Sunny".into(),
        timestamp: "2024-01-01 12:00".into(),
    }
}

pub fn city(name: &str, lat: f64, lon: f64) -> CityCandidate {
    CityCandidate {
        id: 7,
        name: name.into(),
        region: "Region".into(),
        country: "Testland".into(),
        lat,
        lon,
        url: format!("{}-testland", name.to_lowercase()),
    }
}

/// Answers `current_weather` from a query -> snapshot table and
/// `search_cities` by case-insensitive prefix. Records every call.
#[derive(Debug, Default)]
pub struct FakeProvider {
    snapshots: HashMap<String, WeatherSnapshot>,
    cities: Vec<CityCandidate>,
    current_calls: Mutex<Vec<String>>,
    search_calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn with_snapshot(mut self, query: &str, snapshot: WeatherSnapshot) -> Self {
        self.snapshots.insert(query.to_string(), snapshot);
        self
    }

    pub fn with_city(mut self, city: CityCandidate) -> Self {
        self.cities.push(city);
        self
    }

    pub fn current_calls(&self) -> Vec<String> {
        self.current_calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current_weather(&self, query: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.current_calls.lock().unwrap().push(query.to_string());
        self.snapshots
            .get(query)
            .cloned()
            .ok_or_else(|| WeatherError::provider(Some(1006), "No matching location found."))
    }

    async fn search_cities(&self, query: &str) -> Result<Vec<CityCandidate>, WeatherError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        let needle = query.trim().to_lowercase();
        Ok(self
            .cities
            .iter()
            .filter(|c| c.name.to_lowercase().starts_with(&needle))
            .cloned()
            .collect())
    }
}

/// Reads nothing back and refuses every write.
#[derive(Debug, Default)]
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, key: &str, _: &str) -> Result<()> {
        bail!("cannot write {key}: store is read-only")
    }

    fn clear(&self, key: &str) -> Result<()> {
        bail!("cannot clear {key}: store is read-only")
    }
}
