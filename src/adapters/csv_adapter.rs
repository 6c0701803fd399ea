//! CSV tick and equity adapters.
//!
//! Tick files are headerless, one record per line:
//! `timestamp,symbol,price,volume`. Reading is lazy and lenient: the first
//! record with fewer than four fields, or with a field that does not parse,
//! ends the stream as if the file had ended there. A blank line counts as a
//! record with no fields. The `csv` reader skips blank lines, so they are
//! detected as a gap in record line numbers.

use crate::domain::error::PairtraderError;
use crate::domain::tick::Tick;
use crate::ports::tick_port::TickPort;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

const TICK_FIELDS: usize = 4;

pub struct CsvTickAdapter {
    path: PathBuf,
}

impl CsvTickAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TickPort for CsvTickAdapter {
    fn open_ticks(&self) -> Result<Box<dyn Iterator<Item = Tick> + '_>, PairtraderError> {
        let file = File::open(&self.path).map_err(|source| PairtraderError::SourceUnavailable {
            path: self.path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "reading ticks");
        Ok(Box::new(read_ticks(file)))
    }
}

/// Lazily parse ticks from any reader, stopping at the first malformed record.
pub fn read_ticks<R: io::Read>(reader: R) -> impl Iterator<Item = Tick> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(reader)
        .into_records()
        .scan(1u64, |next_line, result| {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::debug!(error = %e, "unreadable record, treating as end of stream");
                    return None;
                }
            };
            let line = record.position().map_or(*next_line, |p| p.line());
            if line != *next_line {
                tracing::debug!(line = *next_line, "blank line, treating as end of stream");
                return None;
            }
            *next_line = line + 1;
            parse_record(&record)
        })
}

fn parse_record(record: &StringRecord) -> Option<Tick> {
    if record.len() < TICK_FIELDS {
        tracing::debug!(
            line = record.position().map(|p| p.line()),
            fields = record.len(),
            "short record, treating as end of stream"
        );
        return None;
    }

    let parsed = (|| {
        Some(Tick {
            timestamp: record.get(0)?.trim().parse().ok()?,
            symbol: record.get(1)?.to_string(),
            price: record.get(2)?.trim().parse().ok()?,
            volume: record.get(3)?.trim().parse().ok()?,
        })
    })();

    if parsed.is_none() {
        tracing::debug!(
            line = record.position().map(|p| p.line()),
            "unparsable record, treating as end of stream"
        );
    }
    parsed
}

/// Write ticks in the same headerless format, prices at 4 decimal places.
pub fn write_ticks<'a, W, I>(writer: W, ticks: I) -> Result<(), PairtraderError>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Tick>,
{
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    for tick in ticks {
        wtr.write_record([
            tick.timestamp.to_string(),
            tick.symbol.clone(),
            format!("{:.4}", tick.price),
            tick.volume.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_ticks_to_path(path: &Path, ticks: &[Tick]) -> Result<(), PairtraderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_ticks(io::BufWriter::new(file), ticks)
}

/// Export the equity curve as `step,equity` rows.
pub fn write_equity_curve<W: io::Write>(writer: W, curve: &[f64]) -> Result<(), PairtraderError> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(["step", "equity"])?;
    for (step, equity) in curve.iter().enumerate() {
        wtr.write_record([step.to_string(), equity.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
