//! Monthly compound-interest projection with fixed contributions.

use crate::domain::model::{
    InvestmentVariant, MonthlyRateConversion, ProjectionResult, SimulationInput, MONTHS_PER_YEAR,
};

impl MonthlyRateConversion {
    /// Per-period rate equivalent to `annual_rate` under this policy.
    pub fn monthly_rate(self, annual_rate: f64) -> f64 {
        match self {
            MonthlyRateConversion::Linear => annual_rate / MONTHS_PER_YEAR as f64,
            MonthlyRateConversion::Compound => {
                (1.0 + annual_rate).powf(1.0 / MONTHS_PER_YEAR as f64) - 1.0
            }
        }
    }
}

/// Balance after each period, starting with `initial_balance` at period 0.
pub fn accrue(
    monthly_rate: f64,
    initial_balance: f64,
    monthly_contribution: f64,
    period_count: u32,
) -> Vec<f64> {
    let mut trajectory = Vec::with_capacity(period_count as usize + 1);
    let mut balance = initial_balance;
    trajectory.push(balance);

    for _ in 0..period_count {
        balance = balance * (1.0 + monthly_rate) + monthly_contribution;
        trajectory.push(balance);
    }

    trajectory
}

/// Projects one rate over `period_count` months.
///
/// Unlike [`SimulationInput`], this accepts `period_count == 0`, which yields a
/// single-point trajectory. The returned result has no variant name; use
/// [`ProjectionEngine::project_variant`] for named products.
pub fn project(
    annual_rate: f64,
    initial_balance: f64,
    monthly_contribution: f64,
    period_count: u32,
    conversion: MonthlyRateConversion,
) -> ProjectionResult {
    let monthly_rate = conversion.monthly_rate(annual_rate);
    let trajectory = accrue(
        monthly_rate,
        initial_balance,
        monthly_contribution,
        period_count,
    );

    let total_contributed = initial_balance + monthly_contribution * period_count as f64;
    let final_balance = trajectory.last().copied().unwrap_or(initial_balance);

    ProjectionResult {
        variant_name: String::new(),
        description: String::new(),
        annual_rate,
        monthly_rate,
        trajectory,
        total_contributed,
        final_balance,
        net_gain: final_balance - total_contributed,
    }
}

/// Applies a single conversion policy to every variant it projects.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionEngine {
    conversion: MonthlyRateConversion,
}

impl ProjectionEngine {
    pub fn new(conversion: MonthlyRateConversion) -> Self {
        Self { conversion }
    }

    pub fn conversion(&self) -> MonthlyRateConversion {
        self.conversion
    }

    pub fn project_variant(
        &self,
        variant: &InvestmentVariant,
        input: &SimulationInput,
    ) -> ProjectionResult {
        let mut result = project(
            variant.annual_rate,
            input.initial_balance(),
            input.monthly_contribution(),
            input.period_count(),
            self.conversion,
        );
        result.variant_name = variant.name.clone();
        result.description = variant.description.clone();

        tracing::debug!(
            "Projected {} at {:.4}% a.a. ({:.6} per month): final balance {:.2}",
            variant.name,
            variant.annual_rate * 100.0,
            result.monthly_rate,
            result.final_balance
        );

        result
    }

    pub fn project_all(
        &self,
        variants: &[InvestmentVariant],
        input: &SimulationInput,
    ) -> Vec<ProjectionResult> {
        variants
            .iter()
            .map(|variant| self.project_variant(variant, input))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_linear_reference_scenario() {
        let result = project(0.10, 1000.0, 200.0, 12, MonthlyRateConversion::Linear);

        assert_abs_diff_eq!(result.monthly_rate, 0.10 / 12.0, epsilon = EPS);
        assert_eq!(result.trajectory.len(), 13);
        assert_abs_diff_eq!(result.final_balance, 3617.83, epsilon = 0.01);
        assert_abs_diff_eq!(result.total_contributed, 3400.0, epsilon = EPS);
        assert_abs_diff_eq!(result.net_gain, result.final_balance - 3400.0, epsilon = EPS);
    }

    #[test]
    fn test_compound_reference_scenario() {
        let result = project(0.10, 1000.0, 200.0, 12, MonthlyRateConversion::Compound);

        // Twelve compound months reproduce the annual rate exactly.
        assert_abs_diff_eq!((1.0 + result.monthly_rate).powi(12), 1.10, epsilon = 1e-12);
        assert_abs_diff_eq!(result.final_balance, 3608.11, epsilon = 0.01);
    }

    #[test]
    fn test_recurrence_holds_at_every_step() {
        let result = project(0.1375, 2500.0, 350.0, 60, MonthlyRateConversion::Compound);

        assert_eq!(result.trajectory[0], 2500.0);
        for window in result.trajectory.windows(2) {
            let expected = window[0] * (1.0 + result.monthly_rate) + 350.0;
            assert_abs_diff_eq!(window[1], expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_periods_returns_initial_balance() {
        let result = project(0.10, 1234.5, 200.0, 0, MonthlyRateConversion::Linear);

        assert_eq!(result.trajectory, vec![1234.5]);
        assert_eq!(result.final_balance, 1234.5);
        assert_eq!(result.total_contributed, 1234.5);
        assert_eq!(result.net_gain, 0.0);
    }

    #[test]
    fn test_zero_rate_grows_arithmetically() {
        for conversion in [MonthlyRateConversion::Linear, MonthlyRateConversion::Compound] {
            let result = project(0.0, 500.0, 75.0, 24, conversion);
            assert_eq!(result.monthly_rate, 0.0);
            for (k, balance) in result.trajectory.iter().enumerate() {
                assert_abs_diff_eq!(*balance, 500.0 + k as f64 * 75.0, epsilon = EPS);
            }
            assert_abs_diff_eq!(result.net_gain, 0.0, epsilon = EPS);
        }
    }

    #[test]
    fn test_all_zero_inputs_stay_at_zero() {
        let result = project(0.25, 0.0, 0.0, 5, MonthlyRateConversion::Compound);
        assert_eq!(result.trajectory, vec![0.0; 6]);
    }

    #[test]
    fn test_trajectory_is_non_decreasing() {
        let rates = [0.0, 0.0001, 0.065, 0.15, 0.9];
        let contributions = [0.0, 1.0, 200.0];
        for &rate in &rates {
            for &contribution in &contributions {
                for conversion in [MonthlyRateConversion::Linear, MonthlyRateConversion::Compound]
                {
                    let result = project(rate, 100.0, contribution, 120, conversion);
                    assert!(result
                        .trajectory
                        .windows(2)
                        .all(|pair| pair[1] >= pair[0]));
                }
            }
        }
    }

    #[test]
    fn test_linear_rate_exceeds_compound_rate() {
        let linear = MonthlyRateConversion::Linear.monthly_rate(0.12);
        let compound = MonthlyRateConversion::Compound.monthly_rate(0.12);
        assert_abs_diff_eq!(linear, 0.01, epsilon = EPS);
        assert!(compound < linear);
    }

    #[test]
    fn test_engine_names_results() {
        let engine = ProjectionEngine::new(MonthlyRateConversion::Linear);
        let input = SimulationInput::new(1000.0, 200.0, 12).unwrap();
        let variant = InvestmentVariant {
            name: "CDB".to_string(),
            description: "110% of CDI".to_string(),
            annual_rate: 0.11,
        };

        let result = engine.project_variant(&variant, &input);
        assert_eq!(result.variant_name, "CDB");
        assert_eq!(result.description, "110% of CDI");
        assert_eq!(result.trajectory.len(), 13);
        assert_eq!(engine.conversion(), MonthlyRateConversion::Linear);
    }
}
