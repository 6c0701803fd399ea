//! Backtest engine and event loop.
//!
//! One synchronous pass over the tick stream. For every snapshot the ledger is
//! marked to market first, then the signal is evaluated, then any non-hold
//! decision is executed at the snapshot prices.

use super::ledger::{DEFAULT_LOT_SIZE, PortfolioLedger};
use super::position::PairPosition;
use super::signal::{Decision, SignalConfig, SignalEngine};
use super::synchronizer::Synchronizer;
use super::tick::{Snapshot, Tick};

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub initial_cash: f64,
    pub lookback_window: usize,
    pub entry_threshold: f64,
    pub exit_threshold: f64,
    pub lot_size: i64,
    pub symbol_a: String,
    pub symbol_b: String,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_cash: 100_000.0,
            lookback_window: 200,
            entry_threshold: 2.0,
            exit_threshold: 0.5,
            lot_size: DEFAULT_LOT_SIZE,
            symbol_a: "SYM_A".into(),
            symbol_b: "SYM_B".into(),
        }
    }
}

impl BacktestConfig {
    pub fn signal_config(&self) -> SignalConfig {
        SignalConfig {
            lookback_window: self.lookback_window,
            entry_threshold: self.entry_threshold,
            exit_threshold: self.exit_threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradeCounts {
    pub total: usize,
    pub long_entries: usize,
    pub short_entries: usize,
    pub closes: usize,
}

impl TradeCounts {
    pub fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Hold => return,
            Decision::GoLong => self.long_entries += 1,
            Decision::GoShort => self.short_entries += 1,
            Decision::GoFlat => self.closes += 1,
        }
        self.total += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub equity_curve: Vec<f64>,
    pub trade_counts: TradeCounts,
    pub ticks_read: usize,
    pub snapshots: usize,
    pub first_timestamp: Option<u64>,
    pub last_timestamp: Option<u64>,
    pub final_position: PairPosition,
}

/// Owns every stage of the pipeline for one run.
#[derive(Debug, Clone)]
pub struct Backtest {
    sync: Synchronizer,
    signal: SignalEngine,
    ledger: PortfolioLedger,
    counts: TradeCounts,
    ticks_read: usize,
    snapshots: usize,
    first_timestamp: Option<u64>,
    last_timestamp: Option<u64>,
}

impl Backtest {
    pub fn new(config: &BacktestConfig) -> Self {
        Self {
            sync: Synchronizer::new(config.symbol_a.clone(), config.symbol_b.clone()),
            signal: SignalEngine::new(config.signal_config()),
            ledger: PortfolioLedger::new(config.initial_cash, config.lot_size),
            counts: TradeCounts::default(),
            ticks_read: 0,
            snapshots: 0,
            first_timestamp: None,
            last_timestamp: None,
        }
    }

    pub fn on_tick(&mut self, tick: &Tick) -> Option<Decision> {
        self.ticks_read += 1;
        self.first_timestamp.get_or_insert(tick.timestamp);
        self.last_timestamp = Some(tick.timestamp);

        let snap = self.sync.on_tick(tick)?;
        Some(self.on_snapshot(&snap))
    }

    pub fn on_snapshot(&mut self, snap: &Snapshot) -> Decision {
        self.snapshots += 1;
        self.ledger.update_market_value(snap.price_a, snap.price_b);

        let decision = self.signal.on_snapshot(snap.price_a, snap.price_b);
        if decision != Decision::Hold {
            self.ledger
                .execute_trade(decision, snap.price_a, snap.price_b);
            self.counts.record(decision);
            tracing::debug!(
                timestamp = snap.timestamp,
                %decision,
                zscore = self.signal.last_zscore(),
                price_a = snap.price_a,
                price_b = snap.price_b,
                "trade"
            );
        }
        decision
    }

    pub fn trade_counts(&self) -> TradeCounts {
        self.counts
    }

    pub fn ledger(&self) -> &PortfolioLedger {
        &self.ledger
    }

    pub fn signal(&self) -> &SignalEngine {
        &self.signal
    }

    pub fn synchronizer(&self) -> &Synchronizer {
        &self.sync
    }

    pub fn finish(self) -> BacktestResult {
        if let Some(pending) = self.sync.pending() {
            tracing::debug!(
                timestamp = pending.timestamp,
                "final instant left unprocessed at end of stream"
            );
        }
        BacktestResult {
            final_position: *self.ledger.position(),
            equity_curve: self.ledger.into_equity_curve(),
            trade_counts: self.counts,
            ticks_read: self.ticks_read,
            snapshots: self.snapshots,
            first_timestamp: self.first_timestamp,
            last_timestamp: self.last_timestamp,
        }
    }
}

pub fn run_backtest<I>(ticks: I, config: &BacktestConfig) -> BacktestResult
where
    I: IntoIterator<Item = Tick>,
{
    let mut backtest = Backtest::new(config);
    for tick in ticks {
        backtest.on_tick(&tick);
    }
    let result = backtest.finish();

    tracing::info!(
        ticks = result.ticks_read,
        snapshots = result.snapshots,
        trades = result.trade_counts.total,
        "backtest complete"
    );
    result
}
