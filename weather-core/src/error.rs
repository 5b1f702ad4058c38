/// Failures surfaced by a [`crate::WeatherProvider`].
///
/// None of these are retried by the core; retry is left to whoever drives the
/// provider (usually the user, by asking again).
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("A location query is required")]
    InvalidQuery,

    #[error(
        "No weather API key configured.\n\
         Hint: run `weather configure` or set the WEATHER_API_KEY environment variable."
    )]
    ApiKeyMissing,

    #[error("Weather API error {}: {message}", code_label(.code))]
    Provider { code: Option<i64>, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed weather API response: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    pub fn provider(code: Option<i64>, message: impl Into<String>) -> Self {
        Self::Provider { code, message: message.into() }
    }
}

fn code_label(code: &Option<i64>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

/// Failures of a one-shot geolocation request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
    #[error("Location request timed out")]
    Timeout,
}
