pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{fixed::FixedRateProvider, http::HttpRateProvider};
pub use config::{Settings, TomlConfig};
pub use crate::core::{projection::ProjectionEngine, simulation::SimulationEngine};
pub use utils::error::{Result, SimError};
