//! Presentation of a [`SimulationReport`](crate::domain::model::SimulationReport).
//! Nothing here feeds back into the projection.

pub mod chart;
pub mod export;
pub mod table;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Ranked table followed by the terminal chart.
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown format '{}', expected 'table', 'csv' or 'json'",
                other
            )),
        }
    }
}

/// `R$ 12,345.67`; negative values get a leading minus.
pub fn format_currency(symbol: &str, value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{} {}.{:02}", sign, symbol, grouped, cents % 100)
}

pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}
