//! RSI (Relative Strength Index) indicator implementation.
//!
//! Average gain/loss are simple trailing means of the last n close-to-close
//! changes:
//! - gain = max(close[i] - close[i-1], 0)
//! - loss = max(close[i-1] - close[i], 0)
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: unavailable.
//!
//! Warmup: first n bars are unavailable (need n price changes).

use crate::domain::error::TikrscopeError;
use crate::domain::indicator::rolling::rolling_mean;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::Bar;

pub fn calculate_rsi(bars: &[Bar], period: usize) -> Result<IndicatorSeries, TikrscopeError> {
    require_period("rsi period", period)?;

    let mut gains: Vec<Option<f64>> = Vec::with_capacity(bars.len());
    let mut losses: Vec<Option<f64>> = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        if i == 0 {
            gains.push(None);
            losses.push(None);
            continue;
        }
        let change = bar.close - bars[i - 1].close;
        gains.push(Some(if change > 0.0 { change } else { 0.0 }));
        losses.push(Some(if change < 0.0 { -change } else { 0.0 }));
    }

    let avg_gains = rolling_mean(&gains, period);
    let avg_losses = rolling_mean(&losses, period);

    let values = avg_gains
        .iter()
        .zip(avg_losses.iter())
        .map(|averages| match averages {
            (Some(gain), Some(loss)) if *loss > 0.0 => Some(100.0 - 100.0 / (1.0 + gain / loss)),
            _ => None,
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    })
}
