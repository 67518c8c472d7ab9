use crate::core::projection::ProjectionEngine;
use crate::core::variants::{derive_variants, rank};
use crate::domain::model::{BenchmarkRate, SimulationReport, SimulationRequest};
use crate::domain::ports::RateProvider;

/// Runs one simulation per call: fetch the benchmark, derive the products,
/// project and rank them. Holds no state between runs.
pub struct SimulationEngine<R: RateProvider> {
    provider: R,
}

impl<R: RateProvider> SimulationEngine<R> {
    pub fn new(provider: R) -> Self {
        Self { provider }
    }

    pub async fn run(&self, request: &SimulationRequest) -> SimulationReport {
        tracing::info!("📡 Fetching benchmark rate...");
        let benchmark = self.provider.fetch_rate().await;

        if let Some(reason) = benchmark.warning() {
            tracing::warn!(
                "⚠️ Using fallback benchmark rate {:.2}% a.a. ({})",
                benchmark.annual_rate * 100.0,
                reason
            );
        } else {
            tracing::info!(
                "📌 Benchmark rate: {:.2}% a.a. ({:?})",
                benchmark.annual_rate * 100.0,
                benchmark.source
            );
        }

        simulate(benchmark, request)
    }
}

/// The pure part of a run, for callers that already hold a benchmark rate.
pub fn simulate(benchmark: BenchmarkRate, request: &SimulationRequest) -> SimulationReport {
    let variants = derive_variants(benchmark.annual_rate, request.cdb_percent);
    tracing::debug!("Derived {} variants", variants.len());

    let engine = ProjectionEngine::new(request.conversion);
    tracing::info!(
        "🧮 Projecting {} months with {} monthly conversion",
        request.input.period_count(),
        request.conversion
    );
    let results = rank(engine.project_all(&variants, &request.input));

    if let Some(best) = results.first() {
        tracing::info!(
            "🏆 Best performer: {} ({:.2})",
            best.variant_name,
            best.final_balance
        );
    }

    SimulationReport {
        benchmark,
        conversion: request.conversion,
        cdb_percent: request.cdb_percent,
        input: request.input,
        results,
    }
}
