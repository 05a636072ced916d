//! OHLCV bar and bar series representation.

use chrono::{DateTime, FixedOffset};

use crate::domain::error::TikrscopeError;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Ordered, immutable run of bars for one symbol.
///
/// Timestamps are strictly increasing. An empty series is valid and means
/// "no data". Indicators borrow the bars read-only through [`BarSeries::bars`].
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, TikrscopeError> {
        if let Some(pair) = bars
            .windows(2)
            .find(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(TikrscopeError::InvalidSeries {
                reason: format!(
                    "timestamp {} does not follow {}",
                    pair[1].timestamp.to_rfc3339(),
                    pair[0].timestamp.to_rfc3339()
                ),
            });
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
