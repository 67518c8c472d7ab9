use crate::domain::model::{InvestmentVariant, ProjectionResult};

/// Savings accounts pay 70% of the benchmark.
pub const SAVINGS_MULTIPLIER: f64 = 0.70;
pub const TREASURY_MULTIPLIER: f64 = 1.00;

pub const SAVINGS_NAME: &str = "Poupança";
pub const CDB_NAME: &str = "CDB";
pub const TREASURY_NAME: &str = "Tesouro Selic";

/// The three products of a run, in a fixed order that ranking ties fall back to.
pub fn derive_variants(benchmark_rate: f64, cdb_percent: u32) -> Vec<InvestmentVariant> {
    vec![
        InvestmentVariant {
            name: SAVINGS_NAME.to_string(),
            description: "Low risk • Daily liquidity".to_string(),
            annual_rate: benchmark_rate * SAVINGS_MULTIPLIER,
        },
        InvestmentVariant {
            name: CDB_NAME.to_string(),
            description: format!("{}% of CDI • Covered by FGC", cdb_percent),
            annual_rate: benchmark_rate * (cdb_percent as f64 / 100.0),
        },
        InvestmentVariant {
            name: TREASURY_NAME.to_string(),
            description: "Very low risk • Government bond".to_string(),
            annual_rate: benchmark_rate * TREASURY_MULTIPLIER,
        },
    ]
}

/// Best final balance first. `sort_by` is stable, so ties keep input order.
pub fn rank(mut results: Vec<ProjectionResult>) -> Vec<ProjectionResult> {
    results.sort_by(|a, b| b.final_balance.total_cmp(&a.final_balance));
    results
}
