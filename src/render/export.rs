use crate::domain::model::SimulationReport;
use crate::utils::error::Result;
use std::io::Write;

/// One row per month with a balance column per variant, in ranking order.
pub fn write_csv<W: Write>(report: &SimulationReport, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["month".to_string()];
    header.extend(report.results.iter().map(|r| r.variant_name.clone()));
    csv_writer.write_record(&header)?;

    let periods = report
        .results
        .iter()
        .map(|r| r.trajectory.len())
        .max()
        .unwrap_or(0);

    for month in 0..periods {
        let mut record = vec![month.to_string()];
        for result in &report.results {
            record.push(
                result
                    .trajectory
                    .get(month)
                    .map(|balance| format!("{:.2}", balance))
                    .unwrap_or_default(),
            );
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn to_json(report: &SimulationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
