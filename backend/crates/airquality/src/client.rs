use std::time::Duration;

use async_trait::async_trait;
use breezo_common::types::Readiness;
use reqwest::Client;

use crate::location::Location;
use crate::models::{IqAirData, IqAirEnvelope};
use crate::provider::{AirQualityProvider, ProviderError};

#[derive(Debug, Clone)]
pub struct IqAirClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Clone)]
pub struct IqAirClient {
    client: Client,
    config: IqAirClientConfig,
}

impl IqAirClient {
    pub fn new(config: IqAirClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn url_for(&self, location: &Location) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let key = urlencoding::encode(&self.config.api_key);
        match location {
            Location::City(city) => format!(
                "{base}/v2/city?city={}&state=&country=&key={key}",
                urlencoding::encode(city)
            ),
            Location::Coordinates { lat, lon } => format!(
                "{base}/v2/nearest_city?lat={}&lon={}&key={key}",
                urlencoding::encode(lat),
                urlencoding::encode(lon)
            ),
        }
    }

    /// One upstream call, no retries.
    async fn fetch(&self, location: &Location) -> Result<IqAirData, ProviderError> {
        let url = self.url_for(location);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "iqair returned non-success status");
            return Err(ProviderError::NoData(format!("{status}: {body}")));
        }

        let envelope = response
            .json::<IqAirEnvelope>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        if envelope.status != "success" {
            return Err(ProviderError::NoData(format!(
                "status={}",
                envelope.status
            )));
        }

        let data = match envelope.data {
            Some(data) if !data.is_null() => data,
            _ => return Err(ProviderError::NoData("missing data".to_string())),
        };

        let parsed: IqAirData =
            serde_json::from_value(data).map_err(|e| ProviderError::Decode(e.to_string()))?;

        tracing::debug!(
            city = ?parsed.city,
            aqi = %parsed.pollution_field("aqius"),
            temperature = %parsed.weather_field("tp"),
            humidity = %parsed.weather_field("hu"),
            "iqair conditions received"
        );

        Ok(parsed)
    }
}

#[async_trait]
impl AirQualityProvider for IqAirClient {
    fn readiness(&self) -> Readiness {
        if self.config.api_key.trim().is_empty() {
            Readiness::NotReady("IQAIR_API_KEY is not configured".to_string())
        } else {
            Readiness::Ready
        }
    }

    async fn current_conditions(&self, location: &Location) -> Result<IqAirData, ProviderError> {
        if let Readiness::NotReady(reason) = self.readiness() {
            return Err(ProviderError::NotReady(reason));
        }
        self.fetch(location).await
    }
}
