use crate::domain::model::{RateSource, SimulationReport};
use crate::render::{format_currency, format_percent};
use std::fmt::Write;

const HEADERS: [&str; 7] = [
    "#",
    "Investment",
    "Description",
    "Annual rate",
    "Total contributed",
    "Final balance",
    "Net gain",
];

/// Text summary of a run: rate line, horizon, ranked table and best performer.
pub fn render_report(report: &SimulationReport, currency_symbol: &str) -> String {
    let mut out = String::new();

    let source = match &report.benchmark.source {
        RateSource::Fetched => match report.benchmark.reference_date {
            Some(date) => format!("fetched, reference {}", date.format("%d/%m/%Y")),
            None => "fetched".to_string(),
        },
        RateSource::Fixed => "fixed".to_string(),
        RateSource::Fallback { .. } => "fallback".to_string(),
    };
    let _ = writeln!(
        out,
        "📌 Benchmark rate: {} a.a. ({})",
        format_percent(report.benchmark.annual_rate),
        source
    );
    if let Some(reason) = report.warning() {
        let _ = writeln!(
            out,
            "⚠️  Rate service unavailable, using the default rate instead: {}",
            reason
        );
    }
    let _ = writeln!(
        out,
        "⏳ Horizon: {} months ({:.2} years), {} monthly conversion",
        report.input.period_count(),
        report.input.years(),
        report.conversion
    );
    let _ = writeln!(
        out,
        "💰 Initial balance {} + {} per month",
        format_currency(currency_symbol, report.input.initial_balance()),
        format_currency(currency_symbol, report.input.monthly_contribution())
    );
    out.push('\n');

    let rows: Vec<[String; 7]> = report
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                (i + 1).to_string(),
                r.variant_name.clone(),
                r.description.clone(),
                format_percent(r.annual_rate),
                format_currency(currency_symbol, r.total_contributed),
                format_currency(currency_symbol, r.final_balance),
                format_currency(currency_symbol, r.net_gain),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    out.push_str("🏆 Ranking\n");
    write_row(&mut out, &HEADERS.map(String::from), &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", separator.join("-+-"));
    for row in &rows {
        write_row(&mut out, row, &widths);
    }

    if let Some(best) = report.best() {
        let _ = writeln!(out, "\n🥇 Best performer: {}", best.variant_name);
    }

    out
}

fn write_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let formatted: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, width))| {
            // Text columns left-aligned, numbers right-aligned.
            if i == 1 || i == 2 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", formatted.join(" | ").trim_end());
}
