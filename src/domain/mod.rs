//! Core domain types and logic.

pub mod backtest;
pub mod config_validation;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod position;
pub mod signal;
pub mod spread_window;
pub mod synchronizer;
pub mod synthetic;
pub mod tick;
