use crate::adapters::http::{
    DEFAULT_DATE_FIELD, DEFAULT_FALLBACK_RATE, DEFAULT_RATE_ENDPOINT, DEFAULT_RATE_FIELD,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::domain::model::{MonthlyRateConversion, CDB_PERCENT_MAX, CDB_PERCENT_MIN};
use crate::utils::error::{Result, SimError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_rate,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";
pub const DEFAULT_CHART_WIDTH: usize = 60;
pub const DEFAULT_CHART_HEIGHT: usize = 15;

/// Optional settings file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub rate_source: RateSourceConfig,
    pub simulation: SimulationConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSourceConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub value_field: String,
    pub date_field: String,
    pub fallback_rate: f64,
}

impl Default for RateSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RATE_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            value_field: DEFAULT_RATE_FIELD.to_string(),
            date_field: DEFAULT_DATE_FIELD.to_string(),
            fallback_rate: DEFAULT_FALLBACK_RATE,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub conversion: MonthlyRateConversion,
    pub cdb_percent: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub chart_width: usize,
    pub chart_height: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SimError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SimError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("rate_source.endpoint", &self.rate_source.endpoint)?;
        validate_positive_number(
            "rate_source.timeout_seconds",
            self.rate_source.timeout_seconds,
            1,
        )?;
        validate_non_empty_string("rate_source.value_field", &self.rate_source.value_field)?;
        validate_rate("rate_source.fallback_rate", self.rate_source.fallback_rate)?;

        if let Some(percent) = self.simulation.cdb_percent {
            validate_range(
                "simulation.cdb_percent",
                percent,
                CDB_PERCENT_MIN,
                CDB_PERCENT_MAX,
            )?;
        }

        validate_range("display.chart_width", self.display.chart_width, 10, 200)?;
        validate_range("display.chart_height", self.display.chart_height, 4, 60)?;

        Ok(())
    }
}
