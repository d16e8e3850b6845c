use serde::Deserialize;

/// Raw location query parameters as they arrive on the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates { lat: String, lon: String },
}

impl Location {
    /// `city` wins over coordinates; `lat` and `lon` only count together.
    /// Blank values are treated as absent.
    pub fn from_query(query: &LocationQuery) -> Option<Self> {
        if let Some(city) = non_blank(&query.city) {
            return Some(Self::City(city));
        }
        match (non_blank(&query.lat), non_blank(&query.lon)) {
            (Some(lat), Some(lon)) => Some(Self::Coordinates { lat, lon }),
            _ => None,
        }
    }

    pub fn city(&self) -> Option<&str> {
        match self {
            Self::City(name) => Some(name),
            Self::Coordinates { .. } => None,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
