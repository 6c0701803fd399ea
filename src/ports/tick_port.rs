//! Tick source port trait.

use crate::domain::error::PairtraderError;
use crate::domain::tick::Tick;

/// A lazily read, timestamp-ordered sequence of ticks.
pub trait TickPort {
    /// Fails with [`PairtraderError::SourceUnavailable`] if the source cannot
    /// be opened. Once open, the iterator never errors: a malformed record
    /// simply ends it.
    fn open_ticks(&self) -> Result<Box<dyn Iterator<Item = Tick> + '_>, PairtraderError>;
}
