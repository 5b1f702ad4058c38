//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client and the mapping of its payloads
//! - Query resolution between a selected city and the device location
//! - Recent searches and location state, persisted through a key-value store
//! - Theme derivation and a debounce primitive for city search
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod debounce;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod query;
pub mod search;
pub mod selection;
pub mod session;
pub mod storage;
pub mod store;
pub mod theme;
pub mod transform;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use debounce::Debouncer;
pub use error::{LocationError, WeatherError};
pub use location::{FixedLocationSource, LocationSource, LocationState, NoLocationSource};
pub use model::{CityCandidate, Coordinates, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use query::build_query;
pub use search::CitySearch;
pub use selection::SelectionState;
pub use session::Session;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{MAX_RECENT_SEARCHES, RecentSearchStore};
pub use theme::{Theme, theme_for};
