use crate::domain::model::BenchmarkRate;
use crate::domain::ports::RateProvider;
use async_trait::async_trait;

/// Serves a rate chosen up front. Used for offline runs and as the
/// deterministic stand-in for the HTTP provider.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateProvider {
    annual_rate: f64,
}

impl FixedRateProvider {
    pub fn new(annual_rate: f64) -> Self {
        Self { annual_rate }
    }
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    async fn fetch_rate(&self) -> BenchmarkRate {
        tracing::debug!("Using fixed benchmark rate {}", self.annual_rate);
        BenchmarkRate::fixed(self.annual_rate)
    }
}
