//! Tick and snapshot representation.

/// Marker for a leg whose price has not been observed yet.
pub const UNKNOWN_PRICE: f64 = -1.0;

/// One trade print from the merged, timestamp-ordered stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Nanoseconds since the Unix epoch.
    pub timestamp: u64,
    pub symbol: String,
    pub price: f64,
    pub volume: u64,
}

impl Tick {
    pub fn new(timestamp: u64, symbol: impl Into<String>, price: f64, volume: u64) -> Self {
        Self {
            timestamp,
            symbol: symbol.into(),
            price,
            volume,
        }
    }
}

/// Latest known prices of both legs as of the close of one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// The instant this snapshot closes out.
    pub timestamp: u64,
    pub price_a: f64,
    pub price_b: f64,
}

impl Snapshot {
    /// price_a - price_b
    pub fn spread(&self) -> f64 {
        self.price_a - self.price_b
    }
}

/// Two-slot last-known-price record for the tracked pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairPrices {
    pub price_a: f64,
    pub price_b: f64,
}

impl Default for PairPrices {
    fn default() -> Self {
        Self {
            price_a: UNKNOWN_PRICE,
            price_b: UNKNOWN_PRICE,
        }
    }
}

impl PairPrices {
    /// Both legs have been observed with a positive price.
    pub fn is_complete(&self) -> bool {
        self.price_a > 0.0 && self.price_b > 0.0
    }

    pub fn snapshot(&self, timestamp: u64) -> Option<Snapshot> {
        self.is_complete().then_some(Snapshot {
            timestamp,
            price_a: self.price_a,
            price_b: self.price_b,
        })
    }
}
