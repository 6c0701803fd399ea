//! Performance statistics over the equity curve.
//!
//! Sharpe is a per-step ratio scaled by sqrt(252) regardless of the actual
//! snapshot frequency. Drawdown divides by the running peak without guarding
//! a non-positive peak, so a curve that starts at or below zero can produce a
//! non-finite result.

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Standard deviations below this are treated as a flat curve.
const MIN_STD_DEV: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceSummary {
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_return_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
}

impl PerformanceSummary {
    /// `None` for an empty curve. Initial capital is the first equity point,
    /// not the configured starting cash.
    pub fn compute(equity_curve: &[f64]) -> Option<Self> {
        let initial_capital = *equity_curve.first()?;
        let final_capital = *equity_curve.last()?;
        let total_return_pct = (final_capital - initial_capital) / initial_capital * 100.0;

        Some(PerformanceSummary {
            initial_capital,
            final_capital,
            total_return_pct,
            sharpe_ratio: sharpe_ratio(equity_curve),
            max_drawdown_pct: max_drawdown(equity_curve),
        })
    }
}

/// Simple step returns, skipping every step whose previous equity is exactly zero.
pub fn step_returns(equity_curve: &[f64]) -> Vec<f64> {
    equity_curve
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

pub fn sharpe_ratio(equity_curve: &[f64]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }

    let returns = step_returns(equity_curve);
    if returns.is_empty() {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean: f64 = returns.iter().sum::<f64>() / n;
    let variance: f64 = returns
        .iter()
        .map(|r| (r - mean) * (r - mean))
        .sum::<f64>()
        / n;
    let stddev = variance.sqrt();

    if stddev < MIN_STD_DEV {
        return 0.0;
    }

    (mean / stddev) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Largest peak-to-trough decline, in percent of the running peak.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    let Some(&first) = equity_curve.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_dd = 0.0_f64;

    for &value in equity_curve {
        if value > peak {
            peak = value;
        }
        let dd = (peak - value) / peak * 100.0;
        if dd > max_dd {
            max_dd = dd;
        }
    }

    max_dd
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn sharpe_needs_two_points() {
        assert_eq!(sharpe_ratio(&[]), 0.0);
        assert_eq!(sharpe_ratio(&[100_000.0]), 0.0);
    }

    #[test]
    fn sharpe_flat_curve_is_zero() {
        assert_eq!(sharpe_ratio(&[100_000.0, 100_000.0]), 0.0);
    }

    #[test]
    fn sharpe_constant_growth_is_degenerate() {
        // Identical returns have zero variance.
        assert_eq!(sharpe_ratio(&[100.0, 110.0, 121.0]), 0.0);
    }

    #[test]
    fn sharpe_known_value() {
        // Returns: +0.1, -0.1 -> mean 0 -> sharpe 0.
        assert_relative_eq!(sharpe_ratio(&[100.0, 110.0, 99.0]), 0.0, epsilon = 1e-12);

        // Returns: 0.01, 0.03 -> mean 0.02, std 0.01.
        let curve = [100.0, 101.0, 104.03];
        let expected = 2.0 * 252.0_f64.sqrt();
        assert_relative_eq!(sharpe_ratio(&curve), expected, epsilon = 1e-6);
    }

    #[test]
    fn sharpe_skips_zero_denominator_steps() {
        let returns = step_returns(&[0.0, 100.0, 110.0, 0.0, 50.0]);
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns[0], 0.1);
        assert_relative_eq!(returns[1], -1.0);
    }

    #[test]
    fn sharpe_all_zero_denominators_is_zero() {
        assert_eq!(sharpe_ratio(&[0.0, 5.0]), 0.0);
    }

    #[test]
    fn sharpe_positive_for_rising_noisy_curve() {
        let curve = [100.0, 101.0, 100.8, 102.0, 103.5, 103.0, 105.0];
        assert!(sharpe_ratio(&curve) > 0.0);
    }

    #[test]
    fn drawdown_empty_is_zero() {
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn drawdown_known_value() {
        let curve = [100.0, 110.0, 90.0, 95.0, 80.0, 100.0];
        assert_relative_eq!(max_drawdown(&curve), (110.0 - 80.0) / 110.0 * 100.0);
    }

    #[test]
    fn drawdown_non_positive_start_is_not_guarded() {
        assert!(!max_drawdown(&[0.0, -10.0]).is_finite());
    }

    #[test]
    fn summary_empty_curve() {
        assert!(PerformanceSummary::compute(&[]).is_none());
    }

    #[test]
    fn summary_fields() {
        let summary = PerformanceSummary::compute(&[100_000.0, 95_000.0, 110_000.0]).unwrap();
        assert_relative_eq!(summary.initial_capital, 100_000.0);
        assert_relative_eq!(summary.final_capital, 110_000.0);
        assert_relative_eq!(summary.total_return_pct, 10.0);
        assert_relative_eq!(summary.max_drawdown_pct, 5.0);
        assert!(summary.sharpe_ratio.is_finite());
    }

    proptest! {
        #[test]
        fn drawdown_is_non_negative(curve in prop::collection::vec(1.0f64..1e6, 0..200)) {
            prop_assert!(max_drawdown(&curve) >= 0.0);
        }

        #[test]
        fn drawdown_zero_for_non_decreasing(mut curve in prop::collection::vec(1.0f64..1e6, 0..200)) {
            curve.sort_by(|a, b| a.partial_cmp(b).unwrap());
            prop_assert_eq!(max_drawdown(&curve), 0.0);
        }
    }
}
