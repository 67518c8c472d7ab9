use crate::domain::model::ProjectionResult;
use std::fmt::Write;

const MARKERS: [char; 5] = ['*', '+', 'o', 'x', '#'];

/// Plots every trajectory on one shared scale. Later series draw over earlier
/// ones where they meet.
pub fn render_chart(results: &[ProjectionResult], width: usize, height: usize) -> String {
    let width = width.max(2);
    let height = height.max(2);

    let periods = results
        .iter()
        .map(|r| r.trajectory.len().saturating_sub(1))
        .max()
        .unwrap_or(0);

    let (mut low, mut high) = results
        .iter()
        .flat_map(|r| r.trajectory.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !low.is_finite() || !high.is_finite() {
        low = 0.0;
        high = 0.0;
    }
    if high - low < f64::EPSILON {
        high = low + 1.0;
    }

    let mut grid = vec![vec![' '; width]; height];
    for (series, result) in results.iter().enumerate() {
        if result.trajectory.is_empty() {
            continue;
        }
        let marker = MARKERS[series % MARKERS.len()];
        let last = result.trajectory.len() - 1;
        for col in 0..width {
            let period = col_to_period(col, width, periods);
            let value = result.trajectory[period.min(last)];
            let level = ((value - low) / (high - low) * (height - 1) as f64).round() as usize;
            grid[height - 1 - level.min(height - 1)][col] = marker;
        }
    }

    let top_label = format!("{:.2}", high);
    let bottom_label = format!("{:.2}", low);
    let label_width = top_label.len().max(bottom_label.len());

    let mut out = String::new();
    out.push_str("📈 Balance over time\n");
    for (i, row) in grid.iter().enumerate() {
        let label = if i == 0 {
            top_label.as_str()
        } else if i == height - 1 {
            bottom_label.as_str()
        } else {
            ""
        };
        let line: String = row.iter().collect();
        let _ = writeln!(out, "{:>lw$} │{}", label, line.trim_end(), lw = label_width);
    }
    let _ = writeln!(out, "{:>lw$} └{}", "", "─".repeat(width), lw = label_width);

    let end_label = format!("{} months", periods);
    let gap = width.saturating_sub(1 + end_label.len());
    let _ = writeln!(
        out,
        "{:>lw$}  0{}{}",
        "",
        " ".repeat(gap),
        end_label,
        lw = label_width
    );

    let legend: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{} {}", MARKERS[i % MARKERS.len()], r.variant_name))
        .collect();
    let _ = writeln!(out, "{:>lw$}  {}", "", legend.join("   "), lw = label_width);

    out
}

fn col_to_period(col: usize, width: usize, periods: usize) -> usize {
    if periods == 0 {
        return 0;
    }
    ((col * periods) as f64 / (width - 1) as f64).round() as usize
}
