//! INI file configuration adapter.
//!
//! Recognised sections: `[backtest]` (initial_cash, lot_size), `[signal]`
//! (lookback_window, entry_threshold, exit_threshold) and `[data]` (path,
//! symbol_a, symbol_b).

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let mut config = Ini::new();
        config.load(path)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        or_default(self.config.getint(section, key), section, key, default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        or_default(self.config.getfloat(section, key), section, key, default)
    }
}

/// Missing keys fall back quietly; unparsable values fall back with a warning.
fn or_default<T: std::fmt::Display>(
    parsed: Result<Option<T>, String>,
    section: &str,
    key: &str,
    default: T,
) -> T {
    match parsed {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(reason) => {
            tracing::warn!(section, key, %reason, %default, "unparsable config value, using default");
            default
        }
    }
}
