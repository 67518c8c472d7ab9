pub mod settings;
pub mod toml_config;

pub use settings::Settings;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::{Settings, TomlConfig};
    use crate::domain::model::{
        HorizonUnit, MonthlyRateConversion, SimulationInput, SimulationRequest, MONTHS_PER_YEAR,
    };
    use crate::render::OutputFormat;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "invest-compare")]
    #[command(about = "Compare fixed-income products against the current benchmark rate")]
    pub struct CliConfig {
        #[arg(long, default_value = "1000", help = "Initial deposit")]
        pub initial_balance: f64,

        #[arg(long, default_value = "200", help = "Contribution added every month")]
        pub monthly_contribution: f64,

        #[arg(long, help = "Time horizon, see --unit [default: 12 months or 1 year]")]
        pub horizon: Option<u32>,

        #[arg(long, default_value = "months", help = "Horizon unit: months or years")]
        pub unit: HorizonUnit,

        #[arg(long, help = "CDB rate as a percentage of CDI (80-130)")]
        pub cdb_percent: Option<u32>,

        #[arg(long, help = "Annual to monthly conversion: linear or compound")]
        pub conversion: Option<MonthlyRateConversion>,

        #[arg(long, help = "Use this annual rate (e.g. 0.1425) instead of fetching it")]
        pub benchmark_rate: Option<f64>,

        #[arg(long, help = "Benchmark rate endpoint")]
        pub endpoint: Option<String>,

        #[arg(long, help = "Rate request timeout in seconds")]
        pub timeout_seconds: Option<u64>,

        #[arg(long, help = "Rate used when the fetch fails")]
        pub fallback_rate: Option<f64>,

        #[arg(short, long, help = "Path to a TOML settings file")]
        pub config: Option<String>,

        #[arg(long, default_value = "table", help = "Output: table, csv or json")]
        pub format: OutputFormat,

        #[arg(long)]
        pub chart_width: Option<usize>,

        #[arg(long)]
        pub chart_height: Option<usize>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// Settings file (if any) with command-line overrides applied, validated.
        pub fn load_settings(&self) -> Result<Settings> {
            let file_config = match &self.config {
                Some(path) => {
                    tracing::info!("📁 Loading configuration from: {}", path);
                    TomlConfig::from_file(path)?
                }
                None => TomlConfig::default(),
            };

            let mut settings = Settings::from(file_config);

            if let Some(endpoint) = &self.endpoint {
                settings.rate_source.endpoint = endpoint.clone();
            }
            if let Some(timeout) = self.timeout_seconds {
                settings.rate_source.timeout_seconds = timeout;
            }
            if let Some(rate) = self.fallback_rate {
                settings.rate_source.fallback_rate = rate;
            }
            if let Some(percent) = self.cdb_percent {
                settings.cdb_percent = percent;
            }
            if let Some(conversion) = self.conversion {
                settings.conversion = conversion;
            }
            if let Some(width) = self.chart_width {
                settings.display.chart_width = width;
            }
            if let Some(height) = self.chart_height {
                settings.display.chart_height = height;
            }
            settings.benchmark_rate = self.benchmark_rate;

            settings.validate()?;
            Ok(settings)
        }

        /// An omitted `--horizon` means one year in either unit.
        pub fn horizon(&self) -> u32 {
            self.horizon.unwrap_or(match self.unit {
                HorizonUnit::Months => MONTHS_PER_YEAR,
                HorizonUnit::Years => 1,
            })
        }

        pub fn simulation_request(&self, settings: &Settings) -> Result<SimulationRequest> {
            let input = SimulationInput::from_horizon(
                self.initial_balance,
                self.monthly_contribution,
                self.horizon(),
                self.unit,
            )?;
            SimulationRequest::new(input, settings.cdb_percent, settings.conversion)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[test]
        fn test_defaults_mirror_the_form() {
            let cli = CliConfig::parse_from(["invest-compare"]);
            let settings = cli.load_settings().unwrap();
            let request = cli.simulation_request(&settings).unwrap();

            assert_eq!(request.input.initial_balance(), 1000.0);
            assert_eq!(request.input.monthly_contribution(), 200.0);
            assert_eq!(request.input.period_count(), 12);
            assert_eq!(request.cdb_percent, 100);
            assert_eq!(request.conversion, MonthlyRateConversion::Compound);
            assert_eq!(cli.format, OutputFormat::Table);
        }

        #[test]
        fn test_flags_override_file() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(
                b"[simulation]\nconversion = \"compound\"\ncdb_percent = 90\n[display]\nchart_width = 40\n",
            )
            .unwrap();
            let path = file.path().to_str().unwrap().to_string();

            let cli = CliConfig::parse_from([
                "invest-compare",
                "--config",
                &path,
                "--conversion",
                "linear",
                "--horizon",
                "3",
                "--unit",
                "years",
            ]);
            let settings = cli.load_settings().unwrap();
            let request = cli.simulation_request(&settings).unwrap();

            assert_eq!(settings.cdb_percent, 90);
            assert_eq!(settings.display.chart_width, 40);
            assert_eq!(request.conversion, MonthlyRateConversion::Linear);
            assert_eq!(request.input.period_count(), 36);
        }

        #[test]
        fn test_years_unit_defaults_to_one_year() {
            let cli = CliConfig::parse_from(["invest-compare", "--unit", "years"]);
            let settings = cli.load_settings().unwrap();
            let request = cli.simulation_request(&settings).unwrap();

            assert_eq!(cli.horizon(), 1);
            assert_eq!(request.input.period_count(), 12);
            assert_eq!(request.input.years(), 1.0);
        }

        #[test]
        fn test_horizon_beyond_a_century_is_rejected() {
            let cli = CliConfig::parse_from(["invest-compare"]);
            let settings = cli.load_settings().unwrap();

            let cli = CliConfig::parse_from(["invest-compare", "--horizon", "1200"]);
            assert_eq!(cli.simulation_request(&settings).unwrap().input.period_count(), 1200);

            let cli = CliConfig::parse_from(["invest-compare", "--horizon", "4294967295"]);
            assert!(cli.simulation_request(&settings).is_err());

            let cli = CliConfig::parse_from(["invest-compare", "--horizon", "101", "--unit", "y"]);
            assert!(cli.simulation_request(&settings).is_err());
        }

        #[test]
        fn test_invalid_inputs_are_rejected() {
            let cli = CliConfig::parse_from(["invest-compare", "--initial-balance=-5"]);
            let settings = cli.load_settings().unwrap();
            assert!(cli.simulation_request(&settings).is_err());

            let cli = CliConfig::parse_from(["invest-compare", "--horizon", "0"]);
            assert!(cli.simulation_request(&settings).is_err());

            let cli = CliConfig::parse_from(["invest-compare", "--cdb-percent", "200"]);
            assert!(cli.load_settings().is_err());

            let cli = CliConfig::parse_from(["invest-compare", "--endpoint", "not a url"]);
            assert!(cli.load_settings().is_err());
        }

        #[test]
        fn test_unknown_conversion_flag_fails_to_parse() {
            let result = CliConfig::try_parse_from(["invest-compare", "--conversion", "daily"]);
            assert!(result.is_err());
        }
    }
}
