use anyhow::Context;
use clap::Parser;
use invest_compare::domain::ports::RateProvider;
use invest_compare::render::{chart, export, table, OutputFormat};
use invest_compare::utils::error::ErrorSeverity;
use invest_compare::utils::logger;
use invest_compare::{CliConfig, FixedRateProvider, HttpRateProvider, SimError, SimulationEngine};

fn exit_with(e: SimError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting invest-compare");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = cli.load_settings().unwrap_or_else(|e| exit_with(e));
    let request = cli
        .simulation_request(&settings)
        .unwrap_or_else(|e| exit_with(e));

    let provider: Box<dyn RateProvider> = match settings.benchmark_rate {
        Some(rate) => Box::new(FixedRateProvider::new(rate)),
        None => Box::new(HttpRateProvider::new(settings.clone()).unwrap_or_else(|e| exit_with(e))),
    };

    let engine = SimulationEngine::new(provider);
    let report = engine.run(&request).await;

    match cli.format {
        OutputFormat::Table => {
            println!(
                "{}",
                table::render_report(&report, &settings.display.currency_symbol)
            );
            print!(
                "{}",
                chart::render_chart(
                    &report.results,
                    settings.display.chart_width,
                    settings.display.chart_height,
                )
            );
        }
        OutputFormat::Csv => {
            if let Some(reason) = report.warning() {
                eprintln!("⚠️  Using the default benchmark rate: {}", reason);
            }
            export::write_csv(&report, std::io::stdout().lock())
                .context("failed to write CSV to stdout")?;
        }
        OutputFormat::Json => {
            if let Some(reason) = report.warning() {
                eprintln!("⚠️  Using the default benchmark rate: {}", reason);
            }
            let json = export::to_json(&report).context("failed to serialize report")?;
            println!("{}", json);
        }
    }

    tracing::info!("✅ Simulation completed");
    Ok(())
}
