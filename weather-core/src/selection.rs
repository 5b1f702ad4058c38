use serde::{Deserialize, Serialize};

use crate::model::CityCandidate;

/// Which location drives the weather query: an explicitly chosen city, or the
/// device's current location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionState {
    pub selected_city: Option<CityCandidate>,
    pub use_current_location: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self { selected_city: None, use_current_location: true }
    }
}

impl SelectionState {
    /// `Some` switches to city mode, `None` falls back to location mode.
    pub fn set_selected_city(&mut self, city: Option<CityCandidate>) {
        self.use_current_location = city.is_none();
        self.selected_city = city;
    }

    /// Turning location mode on always drops the selected city. Turning it off
    /// leaves the city as it was; callers pick one with `set_selected_city`.
    pub fn set_use_current_location(&mut self, use_current_location: bool) {
        self.use_current_location = use_current_location;
        if use_current_location {
            self.selected_city = None;
        }
    }

    pub fn is_city_mode(&self) -> bool {
        self.selected_city.is_some()
    }
}
