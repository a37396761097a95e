//! Data sources that supply half-hourly generation-mix records.

pub mod carbon_intensity;
pub mod sample;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{ConfigError, SourceConfig};
use crate::error::FetchError;
use crate::mix::{FuelMixRecord, QueryRange};

pub use carbon_intensity::CarbonIntensitySource;
pub use sample::SampleSource;

/// A provider of generation-mix records for a time range.
///
/// Implementations return records ordered by start time. A failure is a single
/// uniform [`FetchError`]; partial data is never returned.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches every record the source holds for `range`.
    async fn fetch_generation(&self, range: QueryRange) -> Result<Vec<FuelMixRecord>, FetchError>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

/// Builds the data source selected by `config.kind`.
///
/// # Errors
///
/// Returns a `ConfigError` for an unknown source kind.
pub fn from_config(config: &SourceConfig) -> Result<Arc<dyn DataSource>, ConfigError> {
    match config.kind.as_str() {
        "carbon_intensity" => Ok(Arc::new(CarbonIntensitySource::new(&config.base_url))),
        "sample" => Ok(Arc::new(SampleSource::new(config.seed))),
        other => Err(ConfigError {
            field: "source.kind".into(),
            message: format!("must be \"carbon_intensity\" or \"sample\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_each_known_kind() {
        let mut cfg = SourceConfig::default();
        assert_eq!(from_config(&cfg).map(|s| s.name()).ok(), Some("carbon_intensity"));

        cfg.kind = "sample".to_string();
        assert_eq!(from_config(&cfg).map(|s| s.name()).ok(), Some("sample"));
    }

    #[test]
    fn rejects_unknown_kind() {
        let cfg = SourceConfig {
            kind: "elexon".to_string(),
            ..SourceConfig::default()
        };
        let err = from_config(&cfg).err();
        assert_eq!(err.map(|e| e.field), Some("source.kind".to_string()));
    }
}
