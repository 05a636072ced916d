//! Bar retrieval port trait.
//!
//! Implementations own every I/O concern. They may return an empty series
//! when a symbol has no data, and must never hand back bars that are out of
//! order or share a timestamp.

use chrono_tz::Tz;

use crate::domain::error::TikrscopeError;
use crate::domain::ohlcv::BarSeries;
use crate::domain::period::Period;

pub trait DataPort {
    /// Bars for `symbol` covering `period`, timestamps expressed in `timezone`.
    fn fetch_bars(
        &self,
        symbol: &str,
        period: Period,
        timezone: Tz,
    ) -> Result<BarSeries, TikrscopeError>;

    fn list_symbols(&self) -> Result<Vec<String>, TikrscopeError>;
}
