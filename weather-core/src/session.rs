//! Wires query resolution, the provider and the two stores together.

use anyhow::Result;
use std::sync::Arc;

use crate::{
    WeatherProvider,
    location::{LocationSource, LocationState, request_location},
    model::{CityCandidate, Coordinates, WeatherSnapshot},
    query::build_query,
    storage::KeyValueStore,
    store::RecentSearchStore,
};

#[derive(Debug)]
pub struct Session {
    provider: Arc<dyn WeatherProvider>,
    searches: RecentSearchStore,
    location: LocationState,
}

impl Session {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        searches: RecentSearchStore,
        location: LocationState,
    ) -> Self {
        Self { provider, searches, location }
    }

    /// Rehydrate both stores from the same key-value backend.
    pub fn load(
        provider: Arc<dyn WeatherProvider>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let searches = RecentSearchStore::load(Arc::clone(&storage))?;
        let location = LocationState::load(storage)?;
        Ok(Self::new(provider, searches, location))
    }

    pub fn provider(&self) -> Arc<dyn WeatherProvider> {
        Arc::clone(&self.provider)
    }

    pub fn searches(&self) -> &RecentSearchStore {
        &self.searches
    }

    pub fn location(&self) -> &LocationState {
        &self.location
    }

    /// The query the next [`Session::refresh`] would send.
    pub fn query(&self) -> String {
        build_query(self.searches.selected_city(), self.location.coords())
    }

    /// Fetch current weather for the resolved query.
    ///
    /// Returns `Ok(None)` without any request when there is nothing to ask
    /// for. Only fetches driven by a selected city are added to recent
    /// searches; device-location fetches never are. Failing to persist the
    /// recent list is logged and does not discard the snapshot.
    pub async fn refresh(&mut self) -> Result<Option<WeatherSnapshot>> {
        let query = self.query();
        if query.is_empty() {
            tracing::debug!("no city selected and no device location; skipping fetch");
            return Ok(None);
        }

        let snapshot = self.provider.current_weather(&query).await?;

        if self.searches.selected_city().is_some() {
            if let Err(err) = self.searches.add_search(snapshot.clone()) {
                tracing::warn!(error = %err, "failed to persist recent searches");
            }
        }

        Ok(Some(snapshot))
    }

    pub fn select_city(&mut self, city: CityCandidate) -> Result<()> {
        self.searches.set_selected_city(Some(city))
    }

    pub fn use_current_location(&mut self) -> Result<()> {
        self.searches.set_use_current_location(true)
    }

    /// Re-select a city from a recent-search entry. Only name, country and
    /// coordinates are known at this point.
    pub fn select_recent(&mut self, snapshot: &WeatherSnapshot) -> Result<()> {
        self.select_city(CityCandidate {
            id: 0,
            name: snapshot.name.clone(),
            region: String::new(),
            country: snapshot.country.clone(),
            lat: snapshot.coord.lat,
            lon: snapshot.coord.lon,
            url: String::new(),
        })
    }

    pub fn clear_searches(&mut self) -> Result<()> {
        self.searches.clear_searches()
    }

    /// Request the device position and, if it arrives, switch to location mode.
    pub async fn locate(&mut self, source: &dyn LocationSource) -> Result<Coordinates> {
        let coords = request_location(source, &mut self.location).await?;
        self.searches.set_use_current_location(true)?;
        Ok(coords)
    }
}
