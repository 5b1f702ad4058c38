//! Plain-text rendering of snapshots and search results.

use weather_core::{CityCandidate, WeatherSnapshot};

fn whole(value: f64) -> i64 {
    value.round() as i64
}

pub fn render_snapshot(snapshot: &WeatherSnapshot) -> String {
    let theme = snapshot.theme();
    let place = if snapshot.country.is_empty() {
        snapshot.name.clone()
    } else {
        format!("{}, {}", snapshot.name, snapshot.country)
    };

    [
        place,
        format!("  {}°C  {}", whole(snapshot.temperature), snapshot.description),
        format!("  Feels like: {}°C", whole(snapshot.feels_like)),
        format!("  Humidity:   {}%", whole(snapshot.humidity)),
        format!(
            "  Wind:       {} m/s from {}°",
            whole(snapshot.wind_speed),
            whole(snapshot.wind_direction)
        ),
        format!("  Theme:      {} ({})", theme.label(), theme),
        format!("  Updated:    {}", snapshot.timestamp),
    ]
    .join("\n")
}

pub fn render_recent(searches: &[WeatherSnapshot]) -> String {
    if searches.is_empty() {
        return "No recent searches.".to_string();
    }

    searches
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!("{}. {:<20} {:>4}°C  {}", i + 1, s.name, whole(s.temperature), s.description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per candidate, also used as the picker label.
pub fn candidate_label(city: &CityCandidate) -> String {
    if city.region.is_empty() {
        format!("{} ({})", city.name, city.country)
    } else {
        format!("{} ({}, {})", city.name, city.country, city.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::Coordinates;

    fn london() -> WeatherSnapshot {
        WeatherSnapshot {
            id: "51.5074--0.1278-0".into(),
            name: "London".into(),
            country: "United Kingdom".into(),
            coord: Coordinates::new(51.5074, -0.1278),
            icon_url: None,
            temperature: 15.5,
            feels_like: -0.4,
            temp_min: 15.5,
            temp_max: 15.5,
            humidity: 65.0,
            wind_speed: 16.9 / 3.6,
            wind_direction: 180.0,
            weather_code: 1003,
            is_day: true,
            description: "Partly cloudy".into(),
            timestamp: "2024-01-01 12:00".into(),
        }
    }

    #[test]
    fn snapshot_is_rounded_and_themed() {
        let text = render_snapshot(&london());

        assert!(text.starts_with("London, United Kingdom\n"));
        assert!(text.contains("16°C  Partly cloudy"));
        assert!(text.contains("Feels like: 0°C"));
        assert!(text.contains("Wind:       5 m/s from 180°"));
        assert!(text.contains("Partly cloudy day (partly-cloudy-day)"));
    }

    #[test]
    fn snapshot_renders_every_line_in_order() {
        let mut snap = london();
        snap.country.clear();

        let lines: Vec<_> = render_snapshot(&snap).lines().map(str::to_string).collect();

        assert_eq!(
            lines,
            [
                "London",
                "  16°C  Partly cloudy",
                "  Feels like: 0°C",
                "  Humidity:   65%",
                "  Wind:       5 m/s from 180°",
                "  Theme:      Partly cloudy day (partly-cloudy-day)",
                "  Updated:    2024-01-01 12:00",
            ]
        );
    }

    #[test]
    fn empty_recent_list_says_so() {
        assert_eq!(render_recent(&[]), "No recent searches.");
    }

    #[test]
    fn recent_entries_are_numbered() {
        let text = render_recent(&[london()]);
        assert!(text.starts_with("1. London"));
    }

    #[test]
    fn candidate_label_skips_empty_region() {
        let mut city = CityCandidate {
            id: 1,
            name: "Paris".into(),
            region: "Ile-de-France".into(),
            country: "France".into(),
            lat: 48.87,
            lon: 2.33,
            url: String::new(),
        };
        assert_eq!(candidate_label(&city), "Paris (France, Ile-de-France)");

        city.region.clear();
        assert_eq!(candidate_label(&city), "Paris (France)");
    }
}
