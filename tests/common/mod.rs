#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use chrono_tz::Tz;
pub use tikrscope::domain::ohlcv::{Bar, BarSeries};
use tikrscope::domain::error::TikrscopeError;
use tikrscope::domain::period::Period;
use tikrscope::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        _period: Period,
        _timezone: Tz,
    ) -> Result<BarSeries, TikrscopeError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TikrscopeError::Data {
                reason: reason.clone(),
            });
        }
        BarSeries::new(symbol, self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, TikrscopeError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn start_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
        .unwrap()
}

pub fn make_bar(day: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Bar {
    Bar {
        timestamp: start_time() + Duration::days(day),
        open,
        high,
        low,
        close,
        volume,
    }
}

/// Daily bars with close = base + day * step and a one-point range.
pub fn generate_bars(count: usize, base: f64, step: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let close = base + i as f64 * step;
            make_bar(i as i64, close, close + 1.0, close - 1.0, close, 1000.0)
        })
        .collect()
}

/// Oscillating closes that exercise both up and down moves.
pub fn wave_bars(count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let close = 100.0 + 10.0 * (i as f64 * 0.4).sin() + i as f64 * 0.1;
            let volume = 1000.0 + (i % 7) as f64 * 150.0;
            make_bar(i as i64, close - 0.5, close + 1.5, close - 1.5, close, volume)
        })
        .collect()
}

pub fn flat_bars(count: usize, price: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| make_bar(i as i64, price, price, price, price, 1000.0))
        .collect()
}

pub fn series(symbol: &str, bars: Vec<Bar>) -> BarSeries {
    BarSeries::new(symbol, bars).unwrap()
}
