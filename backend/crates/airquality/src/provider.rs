use async_trait::async_trait;
use breezo_common::types::Readiness;

use crate::location::Location;
use crate::models::IqAirData;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered but reported no usable data.
    #[error("provider returned no data: {0}")]
    NoData(String),

    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("provider not ready: {0}")]
    NotReady(String),
}

/// Current environmental conditions for a location.
#[async_trait]
pub trait AirQualityProvider: Send + Sync {
    fn readiness(&self) -> Readiness;

    async fn current_conditions(&self, location: &Location) -> Result<IqAirData, ProviderError>;
}
