pub mod projection;
pub mod simulation;
pub mod variants;

pub use crate::domain::model::{
    BenchmarkRate, InvestmentVariant, MonthlyRateConversion, ProjectionResult, SimulationInput,
    SimulationReport, SimulationRequest,
};
pub use crate::domain::ports::{ConfigProvider, RateProvider};
pub use crate::utils::error::Result;
