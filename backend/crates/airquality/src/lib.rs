pub mod client;
pub mod location;
pub mod models;
pub mod provider;
pub mod report;

pub use client::{IqAirClient, IqAirClientConfig};
pub use location::Location;
pub use provider::{AirQualityProvider, ProviderError};
pub use report::{AqiReport, WeatherReport};
