use crate::model::{CityCandidate, Coordinates};

/// Resolve the single `"lat,lon"` query sent to the provider.
///
/// A selected city always wins over device coordinates. An empty string means
/// there is nothing to ask for and no fetch should be issued.
pub fn build_query(selected_city: Option<&CityCandidate>, coords: Option<Coordinates>) -> String {
    selected_city
        .map(CityCandidate::coordinates)
        .or(coords)
        .map(|c| format!("{},{}", c.lat, c.lon))
        .unwrap_or_default()
}
