use crate::{
    Config, WeatherError,
    model::{CityCandidate, WeatherSnapshot},
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a location query (`"lat,lon"` or a place name).
    async fn current_weather(&self, query: &str) -> Result<WeatherSnapshot, WeatherError>;

    /// Cities matching a partial name. A blank query yields no candidates and
    /// makes no request.
    async fn search_cities(&self, query: &str) -> Result<Vec<CityCandidate>, WeatherError>;
}

/// Construct the WeatherAPI.com provider from config.
///
/// A missing API key is not an error here; it surfaces as
/// [`WeatherError::ApiKeyMissing`] on the first request.
pub fn provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    provider_with_key(config, config.api_key())
}

fn provider_with_key(config: &Config, api_key: Option<String>) -> Arc<dyn WeatherProvider> {
    let mut provider = WeatherApiProvider::new(api_key);
    if let Some(base_url) = config.base_url.as_deref() {
        provider = provider.with_base_url(base_url);
    }

    Arc::new(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_deferred_to_fetch() {
        let cfg = Config::default();
        let provider = provider_with_key(&cfg, cfg.resolve_api_key(None));

        let err = provider.current_weather("London").await.unwrap_err();
        assert!(matches!(err, WeatherError::ApiKeyMissing));
    }

    #[tokio::test]
    async fn blank_city_search_needs_no_key() {
        let provider = provider_from_config(&Config::default());
        let cities = provider.search_cities("   ").await.unwrap();
        assert!(cities.is_empty());
    }
}
