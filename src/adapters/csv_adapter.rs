//! CSV file bar adapter.
//!
//! Bars for one symbol and interval live in `<base>/<SYMBOL>_<interval>.csv`
//! with the header `timestamp,open,high,low,close,volume`. Timestamps are
//! RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`; the last two are read as
//! UTC.

use crate::domain::error::TikrscopeError;
use crate::domain::ohlcv::{Bar, BarSeries};
use crate::domain::period::Period;
use crate::ports::data_port::DataPort;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, interval: &str) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.csv", symbol.to_uppercase(), interval))
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TikrscopeError> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .ok_or_else(|| TikrscopeError::Data {
            reason: format!("invalid timestamp '{}'", value),
        })
}

fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, TikrscopeError> {
    let raw = record.get(index).ok_or_else(|| TikrscopeError::Data {
        reason: format!("missing {} column", name),
    })?;
    raw.trim().parse().map_err(|e| TikrscopeError::Data {
        reason: format!("invalid {} value '{}': {}", name, raw, e),
    })
}

fn to_zone(ts: DateTime<Utc>, timezone: Tz) -> DateTime<FixedOffset> {
    ts.with_timezone(&timezone).fixed_offset()
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        period: Period,
        timezone: Tz,
    ) -> Result<BarSeries, TikrscopeError> {
        let path = self.csv_path(symbol, period.interval());
        let content = fs::read_to_string(&path).map_err(|e| TikrscopeError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TikrscopeError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let ts = record.get(0).ok_or_else(|| TikrscopeError::Data {
                reason: "missing timestamp column".into(),
            })?;

            bars.push(Bar {
                timestamp: to_zone(parse_timestamp(ts)?, timezone),
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);

        if let Some(start) = bars.last().and_then(|b| period.window_start(b.timestamp)) {
            bars.retain(|b| b.timestamp >= start);
        }

        log::debug!(
            "loaded {} {} bars for {} from {}",
            bars.len(),
            period.interval(),
            symbol,
            path.display()
        );

        BarSeries::new(symbol.to_uppercase(), bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, TikrscopeError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TikrscopeError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = BTreeSet::new();

        for entry in entries {
            let entry = entry.map_err(|e| TikrscopeError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(stem) = name_str.strip_suffix(".csv") {
                if let Some((symbol, _interval)) = stem.rsplit_once('_') {
                    symbols.insert(symbol.to_string());
                }
            }
        }

        Ok(symbols.into_iter().collect())
    }
}
