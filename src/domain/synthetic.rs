//! Synthetic pair tick generation for fixtures and demos.
//!
//! The spread follows a mean-reverting walk around `price_a - price_b` with
//! gaussian noise and occasional uniform shocks. B drifts as a random walk and
//! A tracks B plus the spread. Each pair step emits an A tick then a B tick on
//! consecutive nanosecond timestamps.

use crate::domain::error::PairtraderError;
use crate::domain::tick::Tick;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal, Uniform};

/// Upper bound on ticks reserved before generation starts.
const MAX_INITIAL_RESERVE: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    pub pairs: usize,
    pub seed: u64,
    pub start_timestamp: u64,
    pub symbol_a: String,
    pub symbol_b: String,
    pub price_a: f64,
    pub price_b: f64,
    /// Fraction of the spread carried into the next step.
    pub mean_reversion: f64,
    pub spread_vol: f64,
    pub price_vol: f64,
    pub shock_probability: f64,
    pub shock_scale: f64,
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            pairs: 100_000,
            seed: 42,
            // 2022-10-07T16:00:00Z
            start_timestamp: 1_665_158_400_000_000_000,
            symbol_a: "SYM_A".into(),
            symbol_b: "SYM_B".into(),
            price_a: 100.0,
            price_b: 120.0,
            mean_reversion: 0.995,
            spread_vol: 0.08,
            price_vol: 0.01,
            shock_probability: 0.1,
            shock_scale: 0.5,
            min_price: 50.0,
            max_price: 150.0,
        }
    }
}

pub fn generate_ticks(config: &SyntheticConfig) -> Result<Vec<Tick>, PairtraderError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let price_noise = noise("price_vol", config.price_vol)?;
    let spread_noise = noise("spread_vol", config.spread_vol)?;
    let unit = Uniform::new(0.0, 1.0);

    let spread_mean = config.price_a - config.price_b;
    let mut spread = spread_mean;
    let mut price_b = config.price_b;
    let mut timestamp = config.start_timestamp;

    let tick_count = config
        .pairs
        .checked_mul(2)
        .filter(|&n| config.start_timestamp.checked_add(n as u64).is_some())
        .ok_or_else(|| PairtraderError::ConfigInvalid {
            section: "generate".to_string(),
            key: "pairs".to_string(),
            reason: format!("{} pairs overflow the tick count or timestamps", config.pairs),
        })?;
    let mut ticks = Vec::with_capacity(tick_count.min(MAX_INITIAL_RESERVE));

    for i in 0..config.pairs {
        spread = spread * config.mean_reversion + spread_mean * (1.0 - config.mean_reversion);
        spread += spread_noise.sample(&mut rng);

        if unit.sample(&mut rng) < config.shock_probability {
            spread += (unit.sample(&mut rng) - 0.5) * config.shock_scale;
        }

        price_b += price_noise.sample(&mut rng);
        let price_a = (price_b + spread + price_noise.sample(&mut rng) * 0.5)
            .clamp(config.min_price, config.max_price);
        price_b = price_b.clamp(config.min_price, config.max_price);

        let volume_a = 50 + (i as u64 * 17 + 13) % 150;
        let volume_b = 50 + (i as u64 * 23 + 7) % 150;

        ticks.push(Tick::new(timestamp, config.symbol_a.clone(), price_a, volume_a));
        timestamp += 1;
        ticks.push(Tick::new(timestamp, config.symbol_b.clone(), price_b, volume_b));
        timestamp += 1;
    }

    tracing::debug!(pairs = config.pairs, seed = config.seed, "generated synthetic ticks");
    Ok(ticks)
}

fn noise(key: &str, std_dev: f64) -> Result<Normal<f64>, PairtraderError> {
    Normal::new(0.0, std_dev).map_err(|e| PairtraderError::ConfigInvalid {
        section: "generate".to_string(),
        key: key.to_string(),
        reason: e.to_string(),
    })
}
