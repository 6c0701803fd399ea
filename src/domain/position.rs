//! Two-leg position state.

/// Signed share counts of both legs plus available cash.
///
/// No bounds are enforced: cash may go negative and leverage is unlimited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairPosition {
    pub position_a: i64,
    pub position_b: i64,
    pub cash: f64,
}

impl PairPosition {
    pub fn new(cash: f64) -> Self {
        Self {
            position_a: 0,
            position_b: 0,
            cash,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.position_a == 0 && self.position_b == 0
    }

    /// Signed value of both legs at the given prices.
    pub fn holdings_value(&self, price_a: f64, price_b: f64) -> f64 {
        self.position_a as f64 * price_a + self.position_b as f64 * price_b
    }

    /// cash + position_a * price_a + position_b * price_b
    pub fn market_value(&self, price_a: f64, price_b: f64) -> f64 {
        self.cash + self.holdings_value(price_a, price_b)
    }
}
