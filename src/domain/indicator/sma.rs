//! Simple Moving Average of close.
//!
//! SMA(n)[i] = mean(close[i-n+1 ..= i])
//! Warmup: first (n-1) bars are unavailable.

use crate::domain::error::TikrscopeError;
use crate::domain::indicator::rolling::rolling_mean;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::Bar;

pub fn calculate_sma(bars: &[Bar], period: usize) -> Result<IndicatorSeries, TikrscopeError> {
    require_period("sma period", period)?;

    let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values: rolling_mean(&closes, period),
    })
}
