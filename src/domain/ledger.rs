//! Portfolio ledger: applies decisions to the pair position and marks equity.

use super::position::PairPosition;
use super::signal::Decision;

/// Units traded per leg on every entry.
pub const DEFAULT_LOT_SIZE: i64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioLedger {
    pub initial_cash: f64,
    pub lot_size: i64,
    position: PairPosition,
    equity_curve: Vec<f64>,
}

impl PortfolioLedger {
    pub fn new(initial_cash: f64, lot_size: i64) -> Self {
        PortfolioLedger {
            initial_cash,
            lot_size,
            position: PairPosition::new(initial_cash),
            equity_curve: Vec::new(),
        }
    }

    /// Entries trade both legs at `lot_size`; a flat decision liquidates both
    /// legs at the given prices. `Hold` is a no-op.
    pub fn execute_trade(&mut self, decision: Decision, price_a: f64, price_b: f64) {
        let lot = self.lot_size;
        let pos = &mut self.position;

        match decision {
            Decision::GoLong => {
                pos.position_a += lot;
                pos.position_b -= lot;
                pos.cash -= price_a * lot as f64;
                pos.cash += price_b * lot as f64;
            }
            // Same cash flow as GoLong; only the leg directions differ.
            Decision::GoShort => {
                pos.position_a -= lot;
                pos.position_b += lot;
                pos.cash -= price_a * lot as f64;
                pos.cash += price_b * lot as f64;
            }
            Decision::GoFlat => {
                pos.cash += pos.position_a as f64 * price_a;
                pos.cash += pos.position_b as f64 * price_b;
                pos.position_a = 0;
                pos.position_b = 0;
            }
            Decision::Hold => {}
        }
    }

    /// Append the mark-to-market equity at these prices to the curve.
    pub fn update_market_value(&mut self, price_a: f64, price_b: f64) -> f64 {
        let equity = self.position.market_value(price_a, price_b);
        self.equity_curve.push(equity);
        equity
    }

    pub fn position(&self) -> &PairPosition {
        &self.position
    }

    pub fn cash(&self) -> f64 {
        self.position.cash
    }

    pub fn equity_curve(&self) -> &[f64] {
        &self.equity_curve
    }

    pub fn into_equity_curve(self) -> Vec<f64> {
        self.equity_curve
    }
}
