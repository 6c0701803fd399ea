//! Pair synchronization: merged tick stream to per-instant snapshots.
//!
//! All ticks sharing a timestamp are coalesced. When a strictly greater
//! timestamp arrives, the instant just closed is emitted using prices from
//! ticks strictly before the new timestamp, then the new tick is buffered.
//! The last instant of the stream is never flushed: with no later tick to
//! close it, it is dropped.

use crate::domain::tick::{PairPrices, Snapshot, Tick};

#[derive(Debug, Clone)]
pub struct Synchronizer {
    symbol_a: String,
    symbol_b: String,
    prices: PairPrices,
    current_timestamp: Option<u64>,
}

impl Synchronizer {
    pub fn new(symbol_a: impl Into<String>, symbol_b: impl Into<String>) -> Self {
        Self {
            symbol_a: symbol_a.into(),
            symbol_b: symbol_b.into(),
            prices: PairPrices::default(),
            current_timestamp: None,
        }
    }

    /// Feed one tick; returns the snapshot for the instant it closes, if any.
    ///
    /// Ticks for symbols other than the tracked pair still advance the clock
    /// but never change a buffered price.
    pub fn on_tick(&mut self, tick: &Tick) -> Option<Snapshot> {
        let current = *self.current_timestamp.get_or_insert(tick.timestamp);

        let emitted = if tick.timestamp > current {
            self.current_timestamp = Some(tick.timestamp);
            self.prices.snapshot(current)
        } else {
            None
        };

        if tick.symbol == self.symbol_a {
            self.prices.price_a = tick.price;
        } else if tick.symbol == self.symbol_b {
            self.prices.price_b = tick.price;
        }

        emitted
    }

    /// The buffered instant that has not been closed by a later tick.
    pub fn pending(&self) -> Option<Snapshot> {
        self.current_timestamp
            .and_then(|ts| self.prices.snapshot(ts))
    }

    pub fn current_timestamp(&self) -> Option<u64> {
        self.current_timestamp
    }
}

/// Lazily turns a tick iterator into a snapshot iterator.
pub struct Snapshots<I> {
    ticks: I,
    sync: Synchronizer,
}

impl<I> Snapshots<I>
where
    I: Iterator<Item = Tick>,
{
    pub fn new(ticks: I, sync: Synchronizer) -> Self {
        Self { ticks, sync }
    }
}

impl<I> Iterator for Snapshots<I>
where
    I: Iterator<Item = Tick>,
{
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        for tick in self.ticks.by_ref() {
            if let Some(snap) = self.sync.on_tick(&tick) {
                return Some(snap);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(ts: u64, symbol: &str, price: f64) -> Tick {
        Tick::new(ts, symbol, price, 10)
    }

    fn collect(ticks: Vec<Tick>) -> Vec<Snapshot> {
        Snapshots::new(ticks.into_iter(), Synchronizer::new("A", "B")).collect()
    }

    #[test]
    fn first_emission_uses_previous_instant_only() {
        let snaps = collect(vec![
            tick(1, "A", 100.0),
            tick(1, "B", 120.0),
            tick(2, "A", 101.0),
            tick(2, "B", 119.0),
            tick(3, "A", 100.0),
        ]);

        assert_eq!(snaps.len(), 2);
        assert_eq!(
            snaps[0],
            Snapshot {
                timestamp: 1,
                price_a: 100.0,
                price_b: 120.0
            }
        );
        assert_eq!(
            snaps[1],
            Snapshot {
                timestamp: 2,
                price_a: 101.0,
                price_b: 119.0
            }
        );
    }

    #[test]
    fn final_instant_is_not_flushed() {
        let mut sync = Synchronizer::new("A", "B");
        assert!(sync.on_tick(&tick(1, "A", 100.0)).is_none());
        assert!(sync.on_tick(&tick(1, "B", 120.0)).is_none());

        let pending = sync.pending().unwrap();
        assert_eq!(pending.timestamp, 1);
        assert_eq!(sync.current_timestamp(), Some(1));
    }

    #[test]
    fn arriving_tick_does_not_leak_into_closed_instant() {
        let mut sync = Synchronizer::new("A", "B");
        sync.on_tick(&tick(1, "A", 100.0));
        sync.on_tick(&tick(1, "B", 120.0));

        let snap = sync.on_tick(&tick(2, "A", 999.0)).unwrap();
        assert_eq!(snap.price_a, 100.0);
        assert_eq!(sync.pending().unwrap().price_a, 999.0);
    }

    #[test]
    fn single_symbol_stream_yields_nothing() {
        let snaps = collect((1..=50).map(|i| tick(i, "A", 100.0 + i as f64)).collect());
        assert!(snaps.is_empty());
    }

    #[test]
    fn ties_are_coalesced() {
        let snaps = collect(vec![
            tick(1, "A", 100.0),
            tick(1, "A", 101.0),
            tick(1, "B", 120.0),
            tick(1, "B", 121.0),
            tick(2, "A", 102.0),
        ]);
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].price_a, 101.0);
        assert_eq!(snaps[0].price_b, 121.0);
    }

    #[test]
    fn unknown_symbol_advances_clock_without_price_change() {
        let snaps = collect(vec![
            tick(1, "A", 100.0),
            tick(1, "B", 120.0),
            tick(2, "C", 5.0),
            tick(3, "C", 6.0),
        ]);
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[1].timestamp, 2);
        assert_eq!(snaps[1].price_a, 100.0);
        assert_eq!(snaps[1].price_b, 120.0);
    }

    #[test]
    fn no_emission_until_both_legs_seen() {
        let snaps = collect(vec![
            tick(1, "A", 100.0),
            tick(2, "A", 101.0),
            tick(3, "B", 120.0),
            tick(4, "A", 102.0),
        ]);
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].timestamp, 3);
        assert_eq!(snaps[0].price_a, 101.0);
    }

    #[test]
    fn empty_stream_has_no_pending() {
        let sync = Synchronizer::new("A", "B");
        assert!(sync.pending().is_none());
        assert_eq!(sync.current_timestamp(), None);
    }
}
