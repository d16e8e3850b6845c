use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::location::Location;
use crate::models::IqAirData;
use crate::provider::ProviderError;

/// Flattened air-quality view served to the front end.
#[derive(Debug, Clone, Serialize)]
pub struct AqiReport {
    pub aqi: Value,
    pub city: String,
    pub lat: Value,
    pub lon: Value,
    pub timestamp: String,
    pub pollutants: Map<String, Value>,
    pub weather: Map<String, Value>,
    pub temperature: Value,
    pub humidity: Value,
}

impl AqiReport {
    /// Fails with `Decode` when the provider omits `current.pollution`.
    pub fn from_provider(location: &Location, data: &IqAirData) -> Result<Self, ProviderError> {
        if data.current.pollution.is_none() {
            return Err(ProviderError::Decode(
                "response has no current.pollution".to_string(),
            ));
        }
        Ok(Self {
            aqi: data.pollution_field("aqius"),
            city: resolve_city(location, data),
            lat: data.lat(),
            lon: data.lon(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            pollutants: data.current.pollution.clone().unwrap_or_default(),
            weather: data.current.weather.clone().unwrap_or_default(),
            temperature: data.weather_field("tp"),
            humidity: data.weather_field("hu"),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub temperature: Value,
    pub humidity: Value,
    pub description: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Value>,
}

impl WeatherReport {
    pub fn from_provider(location: &Location, data: &IqAirData) -> Self {
        Self {
            temperature: data.weather_field("tp"),
            humidity: data.weather_field("hu"),
            description: "Weather data from IQAir API".to_string(),
            // IQAir icon codes are not mapped; the front end gets a fixed clear-sky icon.
            icon: "01d".to_string(),
            city: Some(resolve_city(location, data)),
            lat: Some(data.lat()),
            lon: Some(data.lon()),
            wind_speed: Some(data.weather_field("ws")),
            pressure: Some(data.weather_field("pr")),
        }
    }

    /// Served when the request names no location at all.
    pub fn placeholder() -> Self {
        Self {
            temperature: Value::from(22),
            humidity: Value::from(65),
            description: "Partly cloudy".to_string(),
            icon: "02d".to_string(),
            city: None,
            lat: None,
            lon: None,
            wind_speed: None,
            pressure: None,
        }
    }
}

fn resolve_city(location: &Location, data: &IqAirData) -> String {
    location
        .city()
        .map(str::to_owned)
        .or_else(|| data.city.clone().filter(|c| !c.is_empty()))
        .unwrap_or_else(|| "Unknown".to_string())
}
