//! Rolling z-score signal state machine over the pair spread.
//!
//! FLAT opens on |z| beyond the entry threshold (short the spread when it is
//! high, long when low). ENGAGED closes once |z| falls under the exit
//! threshold. Every snapshot yields exactly one decision.

use crate::domain::spread_window::SpreadWindow;
use std::fmt;

/// Standard deviations below this are treated as a constant spread.
pub const MIN_STD_DEV: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Hold,
    /// Long A, short B.
    GoLong,
    /// Short A, long B.
    GoShort,
    GoFlat,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Decision::Hold => "HOLD",
            Decision::GoLong => "GO_LONG",
            Decision::GoShort => "GO_SHORT",
            Decision::GoFlat => "GO_FLAT",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketState {
    #[default]
    Flat,
    Engaged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalConfig {
    pub lookback_window: usize,
    pub entry_threshold: f64,
    pub exit_threshold: f64,
}

#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: SignalConfig,
    window: SpreadWindow,
    state: MarketState,
    last_zscore: Option<f64>,
}

impl SignalEngine {
    pub fn new(config: SignalConfig) -> Self {
        Self {
            window: SpreadWindow::new(config.lookback_window),
            config,
            state: MarketState::Flat,
            last_zscore: None,
        }
    }

    pub fn on_snapshot(&mut self, price_a: f64, price_b: f64) -> Decision {
        let spread = price_a - price_b;
        self.window.push(spread);
        self.last_zscore = None;

        if !self.window.is_full() {
            return Decision::Hold;
        }

        let mean = self.window.mean();
        let std_dev = self.window.std_dev();
        if std_dev < MIN_STD_DEV {
            return Decision::Hold;
        }

        let z = (spread - mean) / std_dev;
        self.last_zscore = Some(z);

        match self.state {
            MarketState::Flat => {
                if z > self.config.entry_threshold {
                    self.state = MarketState::Engaged;
                    Decision::GoShort
                } else if z < -self.config.entry_threshold {
                    self.state = MarketState::Engaged;
                    Decision::GoLong
                } else {
                    Decision::Hold
                }
            }
            MarketState::Engaged => {
                if z.abs() < self.config.exit_threshold {
                    self.state = MarketState::Flat;
                    Decision::GoFlat
                } else {
                    Decision::Hold
                }
            }
        }
    }

    pub fn state(&self) -> MarketState {
        self.state
    }

    pub fn is_in_market(&self) -> bool {
        self.state == MarketState::Engaged
    }

    /// Z-score computed on the most recent snapshot, if the window allowed one.
    pub fn last_zscore(&self) -> Option<f64> {
        self.last_zscore
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine(lookback: usize, entry: f64, exit: f64) -> SignalEngine {
        SignalEngine::new(SignalConfig {
            lookback_window: lookback,
            entry_threshold: entry,
            exit_threshold: exit,
        })
    }

    /// Feed spreads as (spread, 0.0) price pairs.
    fn feed(engine: &mut SignalEngine, spreads: &[f64]) -> Vec<Decision> {
        spreads.iter().map(|&s| engine.on_snapshot(s, 0.0)).collect()
    }

    #[test]
    fn holds_during_warmup() {
        let mut e = engine(3, 1.0, 0.2);
        let decisions = feed(&mut e, &[1.0, 50.0]);
        assert_eq!(decisions, vec![Decision::Hold, Decision::Hold]);
        assert!(e.last_zscore().is_none());
    }

    #[test]
    fn constant_spread_always_holds() {
        let mut e = engine(4, 0.5, 0.1);
        let decisions = feed(&mut e, &[-20.0; 20]);
        assert!(decisions.iter().all(|d| *d == Decision::Hold));
        assert_eq!(e.state(), MarketState::Flat);
    }

    #[test]
    fn high_spread_goes_short() {
        // Window [0,0,0,0,10]: mean 2, std 4, z = 2.
        let mut e = engine(5, 1.5, 0.5);
        let decisions = feed(&mut e, &[0.0, 0.0, 0.0, 0.0, 10.0]);
        assert_eq!(decisions[4], Decision::GoShort);
        assert_eq!(e.state(), MarketState::Engaged);
        assert!((e.last_zscore().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn low_spread_goes_long() {
        let mut e = engine(5, 1.5, 0.5);
        let decisions = feed(&mut e, &[0.0, 0.0, 0.0, 0.0, -10.0]);
        assert_eq!(decisions[4], Decision::GoLong);
        assert!(e.is_in_market());
    }

    #[test]
    fn z_exactly_at_entry_threshold_holds() {
        let mut e = engine(5, 2.0, 0.5);
        let decisions = feed(&mut e, &[0.0, 0.0, 0.0, 0.0, 10.0]);
        assert_eq!(decisions[4], Decision::Hold);
    }

    #[test]
    fn engaged_closes_when_z_reverts() {
        // lookback 2: window [a,b] always gives z = +-1 unless a == b.
        let mut e = engine(2, 0.5, 1.5);
        let decisions = feed(&mut e, &[0.0, 1.0, 0.0]);
        assert_eq!(decisions[1], Decision::GoShort);
        assert_eq!(decisions[2], Decision::GoFlat);
        assert_eq!(e.state(), MarketState::Flat);
    }

    #[test]
    fn engaged_holds_while_z_stays_wide() {
        let mut e = engine(2, 0.5, 0.5);
        let decisions = feed(&mut e, &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(
            decisions,
            vec![
                Decision::Hold,
                Decision::GoShort,
                Decision::Hold,
                Decision::Hold
            ]
        );
    }

    #[test]
    fn degenerate_window_while_engaged_holds() {
        let mut e = engine(2, 0.5, 1.5);
        feed(&mut e, &[0.0, 1.0]);
        assert!(e.is_in_market());
        assert_eq!(e.on_snapshot(1.0, 0.0), Decision::Hold);
        assert!(e.is_in_market());
    }

    #[test]
    fn decision_display() {
        assert_eq!(Decision::GoLong.to_string(), "GO_LONG");
        assert_eq!(Decision::GoFlat.to_string(), "GO_FLAT");
    }

    proptest! {
        #[test]
        fn decisions_respect_market_state(
            spreads in prop::collection::vec(-50.0f64..50.0, 1..300),
            lookback in 2usize..20,
            entry in 0.1f64..3.0,
            exit_frac in 0.0f64..1.0,
        ) {
            let mut e = engine(lookback, entry, entry * exit_frac);
            for s in spreads {
                let before = e.state();
                let d = e.on_snapshot(s, 0.0);
                match d {
                    Decision::GoLong | Decision::GoShort => {
                        prop_assert_eq!(before, MarketState::Flat);
                        prop_assert_eq!(e.state(), MarketState::Engaged);
                    }
                    Decision::GoFlat => {
                        prop_assert_eq!(before, MarketState::Engaged);
                        prop_assert_eq!(e.state(), MarketState::Flat);
                    }
                    Decision::Hold => prop_assert_eq!(before, e.state()),
                }
            }
        }
    }
}
