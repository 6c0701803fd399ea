//! Plain-text console report.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::PairtraderError;
use crate::domain::metrics::PerformanceSummary;
use crate::ports::report_port::ReportPort;
use chrono::{DateTime, Utc};
use std::io::Write;

const NANOS_PER_SEC: u64 = 1_000_000_000;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReportAdapter;

impl ConsoleReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

/// Render a nanosecond epoch timestamp, falling back to the raw number.
pub fn format_timestamp(nanos: u64) -> String {
    let secs = (nanos / NANOS_PER_SEC) as i64;
    let subsec = (nanos % NANOS_PER_SEC) as u32;
    match DateTime::<Utc>::from_timestamp(secs, subsec) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.9f UTC").to_string(),
        None => nanos.to_string(),
    }
}

impl ReportPort for ConsoleReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        summary: Option<&PerformanceSummary>,
        out: &mut dyn Write,
    ) -> Result<(), PairtraderError> {
        let counts = &result.trade_counts;
        writeln!(out)?;
        writeln!(out, "========== Trade Statistics ==========")?;
        writeln!(out, "Total Trades:     {}", counts.total)?;
        writeln!(out, "Long Entries:     {}", counts.long_entries)?;
        writeln!(out, "Short Entries:    {}", counts.short_entries)?;
        writeln!(out, "Position Closes:  {}", counts.closes)?;
        writeln!(out, "======================================")?;

        writeln!(out)?;
        writeln!(out, "========== Performance Report ==========")?;
        match summary {
            Some(s) => {
                if let (Some(first), Some(last)) = (result.first_timestamp, result.last_timestamp)
                {
                    writeln!(out, "Period:           {}", format_timestamp(first))?;
                    writeln!(out, "                  {}", format_timestamp(last))?;
                }
                writeln!(out, "Snapshots:        {}", result.snapshots)?;
                writeln!(out, "Initial Capital:  ${:.2}", s.initial_capital)?;
                writeln!(out, "Final Capital:    ${:.2}", s.final_capital)?;
                writeln!(out, "Total Return:     {:.2}%", s.total_return_pct)?;
                writeln!(out, "Sharpe Ratio:     {:.4}", s.sharpe_ratio)?;
                writeln!(out, "Max Drawdown:     {:.2}%", s.max_drawdown_pct)?;
            }
            None => writeln!(out, "No data available for performance calculation.")?,
        }
        writeln!(out, "========================================")?;
        writeln!(out)?;
        Ok(())
    }
}
