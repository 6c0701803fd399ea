//! Configuration validation.
//!
//! Validates all config fields before a backtest runs. Missing keys fall back
//! to `BacktestConfig::default()`, so only present-but-bad values fail here.

use crate::domain::backtest::BacktestConfig;
use crate::domain::error::PairtraderError;
use crate::ports::config_port::ConfigPort;

/// Largest accepted `lookback_window`.
pub const MAX_LOOKBACK_WINDOW: i64 = 1_000_000;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), PairtraderError> {
    let defaults = BacktestConfig::default();
    validate_initial_cash(config, &defaults)?;
    validate_lot_size(config, &defaults)?;
    validate_lookback(config, &defaults)?;
    validate_thresholds(config, &defaults)?;
    validate_symbols(config, &defaults)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> PairtraderError {
    PairtraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_initial_cash(
    config: &dyn ConfigPort,
    defaults: &BacktestConfig,
) -> Result<(), PairtraderError> {
    let value = config.get_double("backtest", "initial_cash", defaults.initial_cash);
    if !(value > 0.0) || !value.is_finite() {
        return Err(invalid(
            "backtest",
            "initial_cash",
            "initial_cash must be positive",
        ));
    }
    Ok(())
}

fn validate_lot_size(
    config: &dyn ConfigPort,
    defaults: &BacktestConfig,
) -> Result<(), PairtraderError> {
    let value = config.get_int("backtest", "lot_size", defaults.lot_size);
    if value < 1 {
        return Err(invalid("backtest", "lot_size", "lot_size must be at least 1"));
    }
    Ok(())
}

fn validate_lookback(
    config: &dyn ConfigPort,
    defaults: &BacktestConfig,
) -> Result<(), PairtraderError> {
    let value = config.get_int("signal", "lookback_window", defaults.lookback_window as i64);
    if value < 2 {
        return Err(invalid(
            "signal",
            "lookback_window",
            "lookback_window must be at least 2",
        ));
    }
    if value > MAX_LOOKBACK_WINDOW {
        return Err(invalid(
            "signal",
            "lookback_window",
            &format!("lookback_window must be at most {MAX_LOOKBACK_WINDOW}"),
        ));
    }
    Ok(())
}

fn validate_thresholds(
    config: &dyn ConfigPort,
    defaults: &BacktestConfig,
) -> Result<(), PairtraderError> {
    let entry = config.get_double("signal", "entry_threshold", defaults.entry_threshold);
    if !(entry > 0.0) {
        return Err(invalid(
            "signal",
            "entry_threshold",
            "entry_threshold must be positive",
        ));
    }

    let exit = config.get_double("signal", "exit_threshold", defaults.exit_threshold);
    if !(exit >= 0.0) {
        return Err(invalid(
            "signal",
            "exit_threshold",
            "exit_threshold must be non-negative",
        ));
    }

    if exit >= entry {
        tracing::warn!(
            entry_threshold = entry,
            exit_threshold = exit,
            "exit_threshold is not below entry_threshold; positions will close on the next full window"
        );
    }
    Ok(())
}

fn validate_symbols(
    config: &dyn ConfigPort,
    defaults: &BacktestConfig,
) -> Result<(), PairtraderError> {
    let a = config
        .get_string("data", "symbol_a")
        .unwrap_or_else(|| defaults.symbol_a.clone());
    let b = config
        .get_string("data", "symbol_b")
        .unwrap_or_else(|| defaults.symbol_b.clone());

    if a.trim().is_empty() {
        return Err(invalid("data", "symbol_a", "symbol_a must not be empty"));
    }
    if b.trim().is_empty() {
        return Err(invalid("data", "symbol_b", "symbol_b must not be empty"));
    }
    if a == b {
        return Err(invalid(
            "data",
            "symbol_b",
            "symbol_a and symbol_b must differ",
        ));
    }
    Ok(())
}
