//! Presentation theme derived from a WeatherAPI.com condition code.
//!
//! Condition codes: <https://www.weatherapi.com/docs/weather_conditions.json>

use serde::{Deserialize, Serialize};

use crate::model::WeatherSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Default,
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Sleet,
}

/// Condition buckets before the day/night split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Sleet,
}

fn bucket(code: i64) -> Option<Bucket> {
    let bucket = match code {
        1000 => Bucket::Clear,
        1003 => Bucket::PartlyCloudy,
        1006 | 1009 => Bucket::Cloudy,
        1030 | 1135 | 1147 => Bucket::Fog,
        1063 | 1150 | 1153 | 1180 | 1183 | 1186 | 1189 | 1192 | 1195 | 1240 | 1243 | 1246 => {
            Bucket::Rain
        }
        1066 | 1114 | 1117 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 | 1255 | 1258 => {
            Bucket::Snow
        }
        1087 | 1273 | 1276 | 1279 | 1282 => Bucket::Thunderstorm,
        // freezing drizzle/rain, sleet and ice pellets
        1069 | 1072 | 1168 | 1171 | 1198 | 1201 | 1204 | 1207 | 1237 | 1249 | 1252 | 1261
        | 1264 => Bucket::Sleet,
        _ => return None,
    };

    Some(bucket)
}

/// Theme for a condition code and day flag. Total: missing input or an
/// unknown code gives [`Theme::Default`].
pub fn theme_for(weather_code: Option<i64>, is_day: Option<bool>) -> Theme {
    let (Some(code), Some(is_day)) = (weather_code, is_day) else {
        return Theme::Default;
    };

    match bucket(code) {
        None => Theme::Default,
        Some(Bucket::Clear) if is_day => Theme::ClearDay,
        Some(Bucket::Clear) => Theme::ClearNight,
        Some(Bucket::PartlyCloudy) if is_day => Theme::PartlyCloudyDay,
        Some(Bucket::PartlyCloudy) => Theme::PartlyCloudyNight,
        Some(Bucket::Cloudy) => Theme::Cloudy,
        Some(Bucket::Fog) => Theme::Fog,
        Some(Bucket::Rain) => Theme::Rain,
        Some(Bucket::Snow) => Theme::Snow,
        Some(Bucket::Thunderstorm) => Theme::Thunderstorm,
        Some(Bucket::Sleet) => Theme::Sleet,
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::ClearDay => "clear-day",
            Self::ClearNight => "clear-night",
            Self::PartlyCloudyDay => "partly-cloudy-day",
            Self::PartlyCloudyNight => "partly-cloudy-night",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
            Self::Sleet => "sleet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::ClearDay => "Clear day",
            Self::ClearNight => "Clear night",
            Self::PartlyCloudyDay => "Partly cloudy day",
            Self::PartlyCloudyNight => "Partly cloudy night",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Sleet => "Sleet",
        }
    }
}

impl WeatherSnapshot {
    pub fn theme(&self) -> Theme {
        theme_for(Some(self.weather_code), Some(self.is_day))
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
