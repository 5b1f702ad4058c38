use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    WeatherError,
    model::{CityCandidate, WeatherSnapshot},
    transform::{RawCity, RawCurrentResponse, transform},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: i64,
    message: String,
}

impl WeatherApiProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherError::ApiKeyMissing)
    }

    /// GET `{base}/{endpoint}?q=..&key=..` and return the JSON payload of a
    /// successful response. Failures are mapped onto [`WeatherError`].
    async fn get_json(&self, endpoint: &str, query: &str) -> Result<Value, WeatherError> {
        let api_key = self.api_key()?;
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, query, "requesting WeatherAPI.com");

        let res = self.http.get(&url).query(&[("q", query), ("key", api_key)]).send().await?;

        let status = res.status();
        let body = res.text().await?;
        let payload: Option<Value> = serde_json::from_str(&body).ok();

        let reports_error = payload
            .as_ref()
            .and_then(|v| v.get("error"))
            .is_some_and(|e| !e.is_null());

        if !status.is_success() || reports_error {
            tracing::debug!(
                %status,
                body = %truncate_body(&body),
                "WeatherAPI.com rejected request"
            );

            let envelope = payload.and_then(|v| serde_json::from_value::<ErrorEnvelope>(v).ok());
            return Err(match envelope {
                Some(ErrorEnvelope { error }) => {
                    WeatherError::provider(Some(error.code), error.message)
                }
                None => WeatherError::provider(
                    None,
                    status.canonical_reason().unwrap_or(status.as_str()),
                ),
            });
        }

        payload.ok_or_else(|| {
            WeatherError::MalformedResponse(format!(
                "{endpoint} returned a non-JSON body: {}",
                truncate_body(&body)
            ))
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current_weather(&self, query: &str) -> Result<WeatherSnapshot, WeatherError> {
        if query.trim().is_empty() {
            return Err(WeatherError::InvalidQuery);
        }

        let payload = self.get_json("current.json", query).await?;
        let raw: RawCurrentResponse = serde_json::from_value(payload)
            .map_err(|e| WeatherError::MalformedResponse(format!("current.json: {e}")))?;

        Ok(transform(raw, Utc::now()))
    }

    async fn search_cities(&self, query: &str) -> Result<Vec<CityCandidate>, WeatherError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let payload = self.get_json("search.json", query).await?;
        let items = match payload {
            Value::Array(items) if !items.is_empty() => items,
            _ => return Ok(Vec::new()),
        };

        let raw: Vec<RawCity> = serde_json::from_value(Value::Array(items))
            .map_err(|e| WeatherError::MalformedResponse(format!("search.json: {e}")))?;

        Ok(raw.into_iter().map(CityCandidate::from).collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
