use serde::Deserialize;
use serde_json::{Map, Value};

/// IQAir v2 response envelope for `city` and `nearest_city`.
#[derive(Debug, Clone, Deserialize)]
pub struct IqAirEnvelope {
    pub status: String,
    pub data: Option<Value>,
}

/// The parts of `data` the reports read. Numbers stay as raw JSON so the
/// provider's values pass through untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IqAirData {
    pub city: Option<String>,
    pub location: Option<IqAirLocation>,
    #[serde(default)]
    pub current: IqAirCurrent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IqAirLocation {
    /// GeoJSON order: `[lon, lat]`.
    #[serde(default)]
    pub coordinates: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IqAirCurrent {
    pub pollution: Option<Map<String, Value>>,
    pub weather: Option<Map<String, Value>>,
}

impl IqAirData {
    pub fn lat(&self) -> Value {
        self.coordinate(1)
    }

    pub fn lon(&self) -> Value {
        self.coordinate(0)
    }

    fn coordinate(&self, index: usize) -> Value {
        self.location
            .as_ref()
            .and_then(|l| l.coordinates.get(index))
            .cloned()
            .unwrap_or(Value::Null)
    }

    pub fn pollution_field(&self, key: &str) -> Value {
        field(self.current.pollution.as_ref(), key)
    }

    pub fn weather_field(&self, key: &str) -> Value {
        field(self.current.weather.as_ref(), key)
    }
}

fn field(map: Option<&Map<String, Value>>, key: &str) -> Value {
    map.and_then(|m| m.get(key)).cloned().unwrap_or(Value::Null)
}
