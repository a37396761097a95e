//! Client for the GB Carbon Intensity generation-mix endpoint.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, trace};

use super::DataSource;
use crate::error::FetchError;
use crate::mix::calendar::{format_iso_millis, parse_api_instant};
use crate::mix::{Fuel, FuelMixRecord, GenerationMix, QueryRange};

/// Public Carbon Intensity API root.
pub const DEFAULT_BASE_URL: &str = "https://api.carbonintensity.org.uk";

/// Fetches `GET {base_url}/generation/{from}/{to}`.
#[derive(Debug, Clone)]
pub struct CarbonIntensitySource {
    client: Client,
    base_url: String,
}

impl CarbonIntensitySource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full request URL for `range`, timestamps in ISO millisecond form.
    pub fn generation_url(&self, range: QueryRange) -> String {
        format!(
            "{}/generation/{}/{}",
            self.base_url,
            format_iso_millis(range.from),
            format_iso_millis(range.to)
        )
    }
}

impl Default for CarbonIntensitySource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl DataSource for CarbonIntensitySource {
    async fn fetch_generation(&self, range: QueryRange) -> Result<Vec<FuelMixRecord>, FetchError> {
        let url = self.generation_url(range);
        debug!(%url, "fetching generation mix");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
        parse_generation_body(&body)
    }

    fn name(&self) -> &'static str {
        "carbon_intensity"
    }
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    data: Vec<GenerationPeriod>,
}

#[derive(Debug, Deserialize)]
struct GenerationPeriod {
    from: String,
    to: String,
    generationmix: Vec<FuelShare>,
}

#[derive(Debug, Deserialize)]
struct FuelShare {
    fuel: String,
    perc: f64,
}

impl TryFrom<GenerationPeriod> for FuelMixRecord {
    type Error = FetchError;

    fn try_from(period: GenerationPeriod) -> Result<Self, Self::Error> {
        let from = parse_timestamp(&period.from)?;
        let to = parse_timestamp(&period.to)?;
        let mix: GenerationMix = period
            .generationmix
            .into_iter()
            .filter_map(|share| match Fuel::from_name(&share.fuel) {
                Some(fuel) => Some((fuel, share.perc)),
                None => {
                    trace!(fuel = %share.fuel, "ignoring unknown fuel category");
                    None
                }
            })
            .collect();
        Ok(FuelMixRecord::new(from, to, mix))
    }
}

fn parse_timestamp(value: &str) -> Result<chrono::DateTime<chrono::Utc>, FetchError> {
    parse_api_instant(value).map_err(|source| FetchError::Timestamp {
        value: value.to_string(),
        source,
    })
}

/// Decodes a `/generation` response body into records, preserving order.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] for malformed JSON and
/// [`FetchError::Timestamp`] for unparseable interval bounds.
pub fn parse_generation_body(body: &str) -> Result<Vec<FuelMixRecord>, FetchError> {
    let parsed: GenerationResponse = serde_json::from_str(body)?;
    parsed.data.into_iter().map(FuelMixRecord::try_from).collect()
}
