#![allow(dead_code)]

use pairtrader::domain::backtest::BacktestConfig;
use pairtrader::domain::error::PairtraderError;
pub use pairtrader::domain::tick::Tick;
use pairtrader::ports::tick_port::TickPort;
use std::io::Write;

pub struct MockTickPort {
    pub ticks: Vec<Tick>,
    pub unavailable: bool,
}

impl MockTickPort {
    pub fn new(ticks: Vec<Tick>) -> Self {
        Self {
            ticks,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            ticks: Vec::new(),
            unavailable: true,
        }
    }
}

impl TickPort for MockTickPort {
    fn open_ticks(&self) -> Result<Box<dyn Iterator<Item = Tick> + '_>, PairtraderError> {
        if self.unavailable {
            return Err(PairtraderError::SourceUnavailable {
                path: "mock".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock source"),
            });
        }
        Ok(Box::new(self.ticks.iter().cloned()))
    }
}

pub fn tick(ts: u64, symbol: &str, price: f64) -> Tick {
    Tick::new(ts, symbol, price, 10)
}

/// One A and one B tick per instant, timestamps starting at 1.
pub fn pair_ticks(prices: &[(f64, f64)]) -> Vec<Tick> {
    prices
        .iter()
        .enumerate()
        .flat_map(|(i, &(a, b))| {
            let ts = i as u64 + 1;
            [tick(ts, "SYM_A", a), tick(ts, "SYM_B", b)]
        })
        .collect()
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig {
        lookback_window: 20,
        entry_threshold: 1.5,
        exit_threshold: 0.25,
        ..BacktestConfig::default()
    }
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn exit_code_eq(a: std::process::ExitCode, b: std::process::ExitCode) -> bool {
    format!("{a:?}") == format!("{b:?}")
}
