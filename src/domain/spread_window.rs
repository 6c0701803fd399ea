//! Fixed-capacity rolling window of spread values.
//!
//! Storage grows with the values pushed, up to the capacity. Once full the
//! buffer acts as a ring and the oldest value is overwritten in place.

/// Upper bound on the storage reserved up front.
const MAX_INITIAL_RESERVE: usize = 4096;

#[derive(Debug, Clone)]
pub struct SpreadWindow {
    values: Vec<f64>,
    capacity: usize,
    /// Slot of the oldest value once the window is full.
    head: usize,
}

impl SpreadWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity.min(MAX_INITIAL_RESERVE)),
            capacity,
            head: 0,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.values.len() < self.capacity {
            self.values.push(value);
        } else {
            self.values[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.values.len() == self.capacity
    }

    /// Values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (newer, older) = self.values.split_at(self.head);
        older.iter().chain(newer).copied()
    }

    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.iter().sum::<f64>() / self.len() as f64
    }

    /// Population standard deviation (divides by N).
    pub fn std_dev(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / self.len() as f64;
        variance.sqrt()
    }
}
