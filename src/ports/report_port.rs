//! Report generation port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::PairtraderError;
use crate::domain::metrics::PerformanceSummary;
use std::io::Write;

/// Port for writing backtest reports.
pub trait ReportPort {
    /// `summary` is `None` when the run produced no equity points.
    fn write(
        &self,
        result: &BacktestResult,
        summary: Option<&PerformanceSummary>,
        out: &mut dyn Write,
    ) -> Result<(), PairtraderError>;
}
