use std::{sync::Arc, time::Duration};
use tokio::sync::watch;

use crate::{WeatherError, WeatherProvider, debounce::Debouncer, model::CityCandidate};

/// Queries shorter than this (after trimming) are not sent.
pub const MIN_CITY_SEARCH_LEN: usize = 2;

/// City-name autocomplete: raw input goes through a [`Debouncer`] and only the
/// settled text reaches the provider.
#[derive(Debug)]
pub struct CitySearch {
    provider: Arc<dyn WeatherProvider>,
    input: Debouncer<String>,
    settled: watch::Receiver<String>,
}

impl CitySearch {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        initial: impl Into<String>,
        delay: Duration,
    ) -> Self {
        let input = Debouncer::new(initial.into(), delay);
        let settled = input.subscribe();
        Self { provider, input, settled }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input.set(text.into());
    }

    pub fn debounced_query(&self) -> String {
        self.input.current()
    }

    /// Candidates for the current debounced query.
    pub async fn results(&self) -> Result<Vec<CityCandidate>, WeatherError> {
        let query = self.debounced_query();
        if query.trim().chars().count() < MIN_CITY_SEARCH_LEN {
            return Ok(Vec::new());
        }

        self.provider.search_cities(query.trim()).await
    }

    /// Wait for the input to settle on a new value, then search for it.
    pub async fn next_results(&mut self) -> Result<Vec<CityCandidate>, WeatherError> {
        if self.settled.changed().await.is_err() {
            return Ok(Vec::new());
        }

        self.results().await
    }
}
