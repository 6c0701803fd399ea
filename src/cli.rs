//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::console_report_adapter::ConsoleReportAdapter;
use crate::adapters::csv_adapter::{CsvTickAdapter, write_equity_curve, write_ticks_to_path};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestResult};
use crate::domain::config_validation::validate_backtest_config;
use crate::domain::error::PairtraderError;
use crate::domain::metrics::PerformanceSummary;
use crate::domain::synthetic::{SyntheticConfig, generate_ticks};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::tick_port::TickPort;

pub const DEFAULT_DATA_PATH: &str = "data/tick_data.csv";

#[derive(Parser, Debug)]
#[command(name = "pairtrader", about = "Pairs-trading tick backtester")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over a tick file
    Backtest {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Tick CSV, overrides [data] path
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Write the equity curve as CSV
        #[arg(long)]
        equity_out: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Generate a synthetic tick file
    Generate {
        #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
        output: PathBuf,
        #[arg(long, default_value_t = 100_000)]
        pairs: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "pairtrader=debug"
    } else {
        "pairtrader=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Command::Backtest {
            config,
            data,
            equity_out,
            dry_run,
        } => run_backtest(config.as_deref(), data.as_deref(), equity_out.as_deref(), dry_run),
        Command::Validate { config } => run_validate(&config),
        Command::Generate {
            output,
            pairs,
            seed,
        } => run_generate(&output, pairs, seed),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, PairtraderError> {
    FileConfigAdapter::from_file(path).map_err(|reason| PairtraderError::ConfigParse {
        file: path.display().to_string(),
        reason,
    })
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, PairtraderError> {
    let defaults = BacktestConfig::default();

    let lookback = adapter.get_int("signal", "lookback_window", defaults.lookback_window as i64);
    let lookback_window = usize::try_from(lookback).map_err(|_| PairtraderError::ConfigInvalid {
        section: "signal".into(),
        key: "lookback_window".into(),
        reason: "lookback_window must be non-negative".into(),
    })?;

    Ok(BacktestConfig {
        initial_cash: adapter.get_double("backtest", "initial_cash", defaults.initial_cash),
        lookback_window,
        entry_threshold: adapter.get_double("signal", "entry_threshold", defaults.entry_threshold),
        exit_threshold: adapter.get_double("signal", "exit_threshold", defaults.exit_threshold),
        lot_size: adapter.get_int("backtest", "lot_size", defaults.lot_size),
        symbol_a: adapter
            .get_string("data", "symbol_a")
            .unwrap_or(defaults.symbol_a),
        symbol_b: adapter
            .get_string("data", "symbol_b")
            .unwrap_or(defaults.symbol_b),
    })
}

/// `--data` wins over `[data] path`, which wins over the built-in default.
pub fn resolve_data_path(data_override: Option<&Path>, config: Option<&dyn ConfigPort>) -> PathBuf {
    if let Some(p) = data_override {
        return p.to_path_buf();
    }
    config
        .and_then(|c| c.get_string("data", "path"))
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

fn run_backtest(
    config_path: Option<&Path>,
    data_override: Option<&Path>,
    equity_out: Option<&Path>,
    dry_run: bool,
) -> Result<(), PairtraderError> {
    let adapter = match config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            let adapter = load_config(path)?;
            validate_backtest_config(&adapter)?;
            Some(adapter)
        }
        None => None,
    };

    let config = match &adapter {
        Some(a) => build_backtest_config(a)?,
        None => BacktestConfig::default(),
    };
    let data_path = resolve_data_path(data_override, adapter.as_ref().map(|a| a as &dyn ConfigPort));

    if dry_run {
        print_config(&config, &data_path, &mut io::stdout().lock())?;
        eprintln!("Dry run complete: configuration is valid");
        return Ok(());
    }

    let source = CsvTickAdapter::new(data_path);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_backtest_pipeline(&source, &config, &ConsoleReportAdapter::new(), &mut out, equity_out)?;
    writeln!(out, "Backtest finished.")?;
    Ok(())
}

/// Tick source to report, without touching process state.
pub fn run_backtest_pipeline(
    source: &dyn TickPort,
    config: &BacktestConfig,
    report: &dyn ReportPort,
    out: &mut dyn Write,
    equity_out: Option<&Path>,
) -> Result<BacktestResult, PairtraderError> {
    let ticks = source.open_ticks()?;

    tracing::info!(
        symbol_a = %config.symbol_a,
        symbol_b = %config.symbol_b,
        lookback = config.lookback_window,
        entry = config.entry_threshold,
        exit = config.exit_threshold,
        "running backtest"
    );
    let result = backtest_engine::run_backtest(ticks, config);

    let summary = PerformanceSummary::compute(&result.equity_curve);
    report.write(&result, summary.as_ref(), out)?;

    if let Some(path) = equity_out {
        let file = File::create(path)?;
        write_equity_curve(BufWriter::new(file), &result.equity_curve)?;
        tracing::info!(path = %path.display(), points = result.equity_curve.len(), "equity curve written");
    }

    Ok(result)
}

fn print_config(config: &BacktestConfig, data_path: &Path, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "data:            {}", data_path.display())?;
    writeln!(out, "symbols:         {} / {}", config.symbol_a, config.symbol_b)?;
    writeln!(out, "initial_cash:    {:.2}", config.initial_cash)?;
    writeln!(out, "lot_size:        {}", config.lot_size)?;
    writeln!(out, "lookback_window: {}", config.lookback_window)?;
    writeln!(out, "entry_threshold: {}", config.entry_threshold)?;
    writeln!(out, "exit_threshold:  {}", config.exit_threshold)?;
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), PairtraderError> {
    let adapter = load_config(config_path)?;
    validate_backtest_config(&adapter)?;
    let config = build_backtest_config(&adapter)?;
    let data_path = resolve_data_path(None, Some(&adapter as &dyn ConfigPort));

    print_config(&config, &data_path, &mut io::stdout().lock())?;
    eprintln!("Configuration is valid.");
    Ok(())
}

fn run_generate(output: &Path, pairs: usize, seed: u64) -> Result<(), PairtraderError> {
    let config = SyntheticConfig {
        pairs,
        seed,
        ..SyntheticConfig::default()
    };
    tracing::info!(pairs, seed, path = %output.display(), "generating synthetic ticks");

    let ticks = generate_ticks(&config)?;
    write_ticks_to_path(output, &ticks)?;

    eprintln!("Generated {} ticks in {}", ticks.len(), output.display());
    Ok(())
}
