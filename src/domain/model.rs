use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::Result;
use crate::utils::validation::{validate_amount, validate_input_range};

pub const MONTHS_PER_YEAR: u32 = 12;
/// Longest projection accepted: one hundred years.
pub const MAX_PERIOD_COUNT: u32 = 100 * MONTHS_PER_YEAR;

/// Where the benchmark rate of a run came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateSource {
    Fetched,
    Fixed,
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRate {
    /// Annual rate as a decimal fraction (0.10 == 10% a.a.).
    pub annual_rate: f64,
    pub source: RateSource,
    pub reference_date: Option<NaiveDate>,
}

impl BenchmarkRate {
    pub fn fetched(annual_rate: f64, reference_date: Option<NaiveDate>) -> Self {
        Self {
            annual_rate,
            source: RateSource::Fetched,
            reference_date,
        }
    }

    pub fn fixed(annual_rate: f64) -> Self {
        Self {
            annual_rate,
            source: RateSource::Fixed,
            reference_date: None,
        }
    }

    pub fn fallback(annual_rate: f64, reason: impl Into<String>) -> Self {
        Self {
            annual_rate,
            source: RateSource::Fallback {
                reason: reason.into(),
            },
            reference_date: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, RateSource::Fallback { .. })
    }

    pub fn warning(&self) -> Option<&str> {
        match &self.source {
            RateSource::Fallback { reason } => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentVariant {
    pub name: String,
    pub description: String,
    pub annual_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthlyRateConversion {
    /// annual / 12
    Linear,
    /// (1 + annual)^(1/12) - 1
    #[default]
    Compound,
}

impl fmt::Display for MonthlyRateConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthlyRateConversion::Linear => write!(f, "linear"),
            MonthlyRateConversion::Compound => write!(f, "compound"),
        }
    }
}

impl FromStr for MonthlyRateConversion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(MonthlyRateConversion::Linear),
            "compound" => Ok(MonthlyRateConversion::Compound),
            other => Err(format!(
                "unknown conversion '{}', expected 'linear' or 'compound'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizonUnit {
    #[default]
    Months,
    Years,
}

impl FromStr for HorizonUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "months" | "month" | "m" => Ok(HorizonUnit::Months),
            "years" | "year" | "y" => Ok(HorizonUnit::Years),
            other => Err(format!(
                "unknown unit '{}', expected 'months' or 'years'",
                other
            )),
        }
    }
}

/// User-supplied amounts and horizon. Only built through the validating
/// constructors, so a value of this type is always projectable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationInput {
    initial_balance: f64,
    monthly_contribution: f64,
    period_count: u32,
}

impl SimulationInput {
    pub fn new(initial_balance: f64, monthly_contribution: f64, period_count: u32) -> Result<Self> {
        validate_amount("initial_balance", initial_balance)?;
        validate_amount("monthly_contribution", monthly_contribution)?;
        validate_input_range("period_count", period_count, 1, MAX_PERIOD_COUNT)?;

        Ok(Self {
            initial_balance,
            monthly_contribution,
            period_count,
        })
    }

    pub fn from_horizon(
        initial_balance: f64,
        monthly_contribution: f64,
        horizon: u32,
        unit: HorizonUnit,
    ) -> Result<Self> {
        let period_count = match unit {
            HorizonUnit::Months => horizon,
            HorizonUnit::Years => {
                validate_input_range("horizon", horizon, 1, MAX_PERIOD_COUNT / MONTHS_PER_YEAR)?;
                horizon * MONTHS_PER_YEAR
            }
        };
        Self::new(initial_balance, monthly_contribution, period_count)
    }

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }

    pub fn monthly_contribution(&self) -> f64 {
        self.monthly_contribution
    }

    pub fn period_count(&self) -> u32 {
        self.period_count
    }

    pub fn years(&self) -> f64 {
        self.period_count as f64 / MONTHS_PER_YEAR as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub variant_name: String,
    pub description: String,
    pub annual_rate: f64,
    pub monthly_rate: f64,
    /// Balance after each period; index 0 is the initial balance.
    pub trajectory: Vec<f64>,
    pub total_contributed: f64,
    pub final_balance: f64,
    pub net_gain: f64,
}

/// Everything one run needs. A run never reads ambient state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRequest {
    pub input: SimulationInput,
    pub cdb_percent: u32,
    pub conversion: MonthlyRateConversion,
}

pub const CDB_PERCENT_MIN: u32 = 80;
pub const CDB_PERCENT_MAX: u32 = 130;
pub const CDB_PERCENT_DEFAULT: u32 = 100;

impl SimulationRequest {
    pub fn new(
        input: SimulationInput,
        cdb_percent: u32,
        conversion: MonthlyRateConversion,
    ) -> Result<Self> {
        validate_input_range("cdb_percent", cdb_percent, CDB_PERCENT_MIN, CDB_PERCENT_MAX)?;
        Ok(Self {
            input,
            cdb_percent,
            conversion,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub benchmark: BenchmarkRate,
    pub conversion: MonthlyRateConversion,
    pub cdb_percent: u32,
    pub input: SimulationInput,
    /// Ranked by final balance, best first.
    pub results: Vec<ProjectionResult>,
}

impl SimulationReport {
    pub fn best(&self) -> Option<&ProjectionResult> {
        self.results.first()
    }

    pub fn warning(&self) -> Option<&str> {
        self.benchmark.warning()
    }
}
