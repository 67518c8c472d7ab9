use crate::config::toml_config::{DisplayConfig, RateSourceConfig, TomlConfig};
use crate::domain::model::{MonthlyRateConversion, CDB_PERCENT_DEFAULT};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_rate, Validate};
use std::time::Duration;

/// Effective settings of one run: file values with command-line overrides applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub rate_source: RateSourceConfig,
    pub conversion: MonthlyRateConversion,
    pub cdb_percent: u32,
    pub display: DisplayConfig,
    /// When set, the rate is not fetched.
    pub benchmark_rate: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(TomlConfig::default())
    }
}

impl From<TomlConfig> for Settings {
    fn from(config: TomlConfig) -> Self {
        Self {
            rate_source: config.rate_source,
            conversion: config.simulation.conversion,
            cdb_percent: config.simulation.cdb_percent.unwrap_or(CDB_PERCENT_DEFAULT),
            display: config.display,
            benchmark_rate: None,
        }
    }
}

impl ConfigProvider for Settings {
    fn rate_endpoint(&self) -> &str {
        &self.rate_source.endpoint
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.rate_source.timeout_seconds)
    }

    fn rate_field(&self) -> &str {
        &self.rate_source.value_field
    }

    fn date_field(&self) -> &str {
        &self.rate_source.date_field
    }

    fn fallback_rate(&self) -> f64 {
        self.rate_source.fallback_rate
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        // Reuse the file checks on the merged values.
        TomlConfig {
            rate_source: self.rate_source.clone(),
            simulation: crate::config::toml_config::SimulationConfig {
                conversion: self.conversion,
                cdb_percent: Some(self.cdb_percent),
            },
            display: self.display.clone(),
        }
        .validate()?;

        if let Some(rate) = self.benchmark_rate {
            validate_rate("benchmark_rate", rate)?;
        }
        Ok(())
    }
}
