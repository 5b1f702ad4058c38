//! Device location: the persisted coordinate state and the one-shot request
//! that fills it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{error::LocationError, model::Coordinates, storage::KeyValueStore};

pub const LOCATION_KEY: &str = "location-storage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Prompt,
    Denied,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Platform geolocation.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    fn is_supported(&self) -> bool {
        true
    }

    /// Platforms without a permission query report `Prompt`.
    async fn permission(&self) -> PermissionState {
        PermissionState::Prompt
    }

    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, LocationError>;
}

/// Coordinates known up front, e.g. given on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationSource(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocationSource {
    async fn permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    async fn current_position(&self, _: &PositionOptions) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// A device with no geolocation at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocationSource;

#[async_trait]
impl LocationSource for NoLocationSource {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self, _: &PositionOptions) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct LocationRecord {
    coords: Option<Coordinates>,
}

/// Last known device coordinates plus the transient request status. Only
/// `coords` survives a restart.
#[derive(Debug)]
pub struct LocationState {
    coords: Option<Coordinates>,
    is_loading: bool,
    error: Option<String>,
    storage: Arc<dyn KeyValueStore>,
}

impl LocationState {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let coords = match storage.get(LOCATION_KEY)? {
            None => None,
            Some(raw) => match serde_json::from_str::<LocationRecord>(&raw) {
                Ok(record) => record.coords,
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable location record");
                    None
                }
            },
        };

        Ok(Self { coords, is_loading: false, error: None, storage })
    }

    pub fn coords(&self) -> Option<Coordinates> {
        self.coords
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_coords(&mut self, coords: Option<Coordinates>) -> Result<()> {
        self.coords = coords;
        self.persist()
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn clear_location(&mut self) -> Result<()> {
        self.error = None;
        self.set_coords(None)
    }

    fn persist(&self) -> Result<()> {
        let record = LocationRecord { coords: self.coords };
        let json = serde_json::to_string(&record).context("Failed to serialize location")?;
        self.storage.set(LOCATION_KEY, &json)
    }
}

/// Ask `source` for the device position once and record the outcome in
/// `state`. A denied permission is reported without asking. No retry.
///
/// Geolocation failures come back as a [`LocationError`] inside the
/// `anyhow::Error` and are mirrored into `state.error()`.
pub async fn request_location(
    source: &dyn LocationSource,
    state: &mut LocationState,
) -> Result<Coordinates> {
    if !source.is_supported() {
        state.set_error(Some("Geolocation is not supported on this device".to_string()));
        state.set_loading(false);
        return Err(LocationError::Unsupported.into());
    }

    if source.permission().await == PermissionState::Denied {
        state.set_error(Some(
            "Location permission was denied. Enable it in your system settings and try again."
                .to_string(),
        ));
        state.set_loading(false);
        return Err(LocationError::PermissionDenied.into());
    }

    state.set_loading(true);
    state.set_error(None);

    let options = PositionOptions::default();
    let position = tokio::time::timeout(options.timeout, source.current_position(&options));
    let outcome = match position.await {
        Ok(outcome) => outcome,
        Err(_) => Err(LocationError::Timeout),
    };

    state.set_loading(false);
    match outcome {
        Ok(coords) => {
            tracing::info!(lat = coords.lat, lon = coords.lon, "device location acquired");
            state.set_coords(Some(coords))?;
            state.set_error(None);
            Ok(coords)
        }
        Err(err) => {
            tracing::warn!(error = %err, "device location request failed");
            let message = match &err {
                LocationError::PermissionDenied => {
                    "Location permission denied. Enable it in your system settings."
                }
                _ => "Location unavailable",
            };
            state.set_error(Some(message.to_string()));
            if let Err(storage_err) = state.set_coords(None) {
                tracing::warn!(error = %storage_err, "failed to persist cleared location");
            }
            Err(err.into())
        }
    }
}
