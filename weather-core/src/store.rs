//! Recent searches plus the current city/location selection, persisted as one
//! record on every mutation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    model::{CityCandidate, WeatherSnapshot},
    selection::SelectionState,
    storage::KeyValueStore,
};

pub const MAX_RECENT_SEARCHES: usize = 3;

pub const RECENT_SEARCHES_KEY: &str = "weather-storage";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentSearchRecord {
    #[serde(default)]
    searches: Vec<WeatherSnapshot>,
    #[serde(flatten)]
    selection: SelectionState,
}

#[derive(Debug)]
pub struct RecentSearchStore {
    record: RecentSearchRecord,
    storage: Arc<dyn KeyValueStore>,
}

impl RecentSearchStore {
    /// Rehydrate from `storage`. A missing record starts empty in location
    /// mode; an unreadable one is discarded with a warning.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let record = match storage.get(RECENT_SEARCHES_KEY)? {
            None => RecentSearchRecord::default(),
            Some(raw) => match serde_json::from_str::<RecentSearchRecord>(&raw) {
                Ok(record) => normalize(record),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable recent-search record");
                    RecentSearchRecord::default()
                }
            },
        };

        Ok(Self { record, storage })
    }

    /// Most recent first.
    pub fn searches(&self) -> &[WeatherSnapshot] {
        &self.record.searches
    }

    pub fn selection(&self) -> &SelectionState {
        &self.record.selection
    }

    pub fn selected_city(&self) -> Option<&CityCandidate> {
        self.record.selection.selected_city.as_ref()
    }

    pub fn use_current_location(&self) -> bool {
        self.record.selection.use_current_location
    }

    /// Put `snapshot` at the front, replacing any entry with the same name and
    /// dropping whatever falls past [`MAX_RECENT_SEARCHES`].
    pub fn add_search(&mut self, snapshot: WeatherSnapshot) -> Result<()> {
        tracing::info!(name = %snapshot.name, "recording recent search");
        push_recent(&mut self.record.searches, snapshot);
        self.persist()
    }

    pub fn clear_searches(&mut self) -> Result<()> {
        self.record.searches.clear();
        self.persist()
    }

    pub fn set_selected_city(&mut self, city: Option<CityCandidate>) -> Result<()> {
        tracing::info!(city = ?city.as_ref().map(|c| c.name.as_str()), "selecting city");
        self.record.selection.set_selected_city(city);
        self.persist()
    }

    pub fn set_use_current_location(&mut self, use_current_location: bool) -> Result<()> {
        tracing::info!(use_current_location, "switching location mode");
        self.record.selection.set_use_current_location(use_current_location);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.record)
            .context("Failed to serialize recent searches")?;
        self.storage.set(RECENT_SEARCHES_KEY, &json)
    }
}

fn push_recent(searches: &mut Vec<WeatherSnapshot>, snapshot: WeatherSnapshot) {
    searches.retain(|s| s.name != snapshot.name);
    searches.insert(0, snapshot);
    searches.truncate(MAX_RECENT_SEARCHES);
}

fn normalize(mut record: RecentSearchRecord) -> RecentSearchRecord {
    let mut searches: Vec<WeatherSnapshot> = Vec::with_capacity(MAX_RECENT_SEARCHES);
    for snapshot in record.searches {
        if !searches.iter().any(|s| s.name == snapshot.name) {
            searches.push(snapshot);
        }
    }
    searches.truncate(MAX_RECENT_SEARCHES);
    record.searches = searches;

    if record.selection.use_current_location {
        record.selection.selected_city = None;
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Coordinates, storage::MemoryStore};

    fn snap(name: &str, temperature: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            id: format!("{name}-{temperature}"),
            name: name.into(),
            country: "Somewhere".into(),
            coord: Coordinates::new(10.0, 20.0),
            icon_url: None,
            temperature,
            feels_like: temperature,
            temp_min: temperature,
            temp_max: temperature,
            humidity: 50.0,
            wind_speed: 3.0,
            wind_direction: 90.0,
            weather_code: 1000,
            is_day: true,
            description: "Sunny".into(),
            timestamp: "2024-01-01 12:00".into(),
        }
    }

    fn city(name: &str) -> CityCandidate {
        CityCandidate {
            id: 42,
            name: name.into(),
            region: "Region".into(),
            country: "Country".into(),
            lat: 1.5,
            lon: -2.5,
            url: "url".into(),
        }
    }

    fn empty_store() -> (Arc<MemoryStore>, RecentSearchStore) {
        let storage = Arc::new(MemoryStore::new());
        let store = RecentSearchStore::load(storage.clone()).unwrap();
        (storage, store)
    }

    fn names(store: &RecentSearchStore) -> Vec<&str> {
        store.searches().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn readding_a_city_moves_it_to_front_with_new_data() {
        let (_, mut store) = empty_store();
        store.add_search(snap("London", 15.0)).unwrap();
        store.add_search(snap("Paris", 10.0)).unwrap();
        store.add_search(snap("London", 20.0)).unwrap();

        assert_eq!(names(&store), ["London", "Paris"]);
        assert_eq!(store.searches()[0].temperature, 20.0);
        assert_eq!(store.searches()[1].temperature, 10.0);
    }

    #[test]
    fn oldest_entry_is_evicted() {
        let (_, mut store) = empty_store();
        for name in ["Berlin", "Madrid", "Rome", "Vienna"] {
            store.add_search(snap(name, 1.0)).unwrap();
        }

        assert_eq!(names(&store), ["Vienna", "Rome", "Madrid"]);
    }

    #[test]
    fn bound_and_uniqueness_hold_for_long_sequences() {
        let (_, mut store) = empty_store();
        let sequence = ["A", "B", "A", "C", "D", "B", "B", "E", "a", "A"];

        for (i, name) in sequence.iter().enumerate() {
            store.add_search(snap(name, i as f64)).unwrap();

            assert!(store.searches().len() <= MAX_RECENT_SEARCHES);
            assert_eq!(store.searches()[0].name, *name);
            let mut seen = names(&store);
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), store.searches().len());
        }

        assert_eq!(names(&store), ["A", "a", "E"]);
    }

    #[test]
    fn dedup_is_by_name_not_id() {
        let (_, mut store) = empty_store();
        let mut first = snap("London", 1.0);
        first.id = "same".into();
        let mut second = snap("Londres", 2.0);
        second.id = "same".into();

        store.add_search(first).unwrap();
        store.add_search(second).unwrap();

        assert_eq!(store.searches().len(), 2);
    }

    #[test]
    fn clear_is_idempotent() {
        let (_, mut store) = empty_store();
        store.add_search(snap("London", 1.0)).unwrap();
        store.clear_searches().unwrap();
        store.clear_searches().unwrap();

        assert!(store.searches().is_empty());
    }

    #[test]
    fn every_mutation_is_persisted_and_rehydrated() {
        let (storage, mut store) = empty_store();
        store.add_search(snap("London", 15.0)).unwrap();
        store.set_selected_city(Some(city("Paris"))).unwrap();

        let reloaded = RecentSearchStore::load(storage.clone()).unwrap();
        assert_eq!(names(&reloaded), ["London"]);
        assert_eq!(reloaded.selected_city(), Some(&city("Paris")));
        assert!(!reloaded.use_current_location());

        store.set_use_current_location(true).unwrap();
        let reloaded = RecentSearchStore::load(storage).unwrap();
        assert!(reloaded.selected_city().is_none());
        assert!(reloaded.use_current_location());
    }

    #[test]
    fn persisted_record_uses_camel_case_keys() {
        let (storage, mut store) = empty_store();
        store.add_search(snap("London", 15.0)).unwrap();

        let raw = storage.get(RECENT_SEARCHES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["searches"][0]["feelsLike"].is_number());
        assert!(value["selectedCity"].is_null());
        assert_eq!(value["useCurrentLocation"], true);
    }

    #[test]
    fn corrupt_record_falls_back_to_defaults() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(RECENT_SEARCHES_KEY, "{not json").unwrap();

        let store = RecentSearchStore::load(storage).unwrap();
        assert!(store.searches().is_empty());
        assert!(store.use_current_location());
    }

    #[test]
    fn rehydrated_list_is_normalized() {
        let storage = Arc::new(MemoryStore::new());
        let record = RecentSearchRecord {
            searches: vec![
                snap("A", 1.0),
                snap("A", 2.0),
                snap("B", 3.0),
                snap("C", 4.0),
                snap("D", 5.0),
            ],
            selection: SelectionState::default(),
        };
        storage
            .set(RECENT_SEARCHES_KEY, &serde_json::to_string(&record).unwrap())
            .unwrap();

        let store = RecentSearchStore::load(storage).unwrap();
        assert_eq!(names(&store), ["A", "B", "C"]);
        assert_eq!(store.searches()[0].temperature, 1.0);
    }
}
