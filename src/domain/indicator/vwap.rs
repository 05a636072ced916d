//! Volume-Weighted Average Price, cumulative over the whole loaded window.
//!
//! VWAP[i] = Σ(volume × typical) / Σ(volume), sums over 0..=i.
//! Unavailable while cumulative volume is zero. There is no session reset:
//! callers that want a session VWAP slice the series first.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::Bar;

pub fn calculate_vwap(bars: &[Bar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let mut cum_pv = 0.0;
    let mut cum_volume = 0.0;

    for bar in bars {
        cum_pv += bar.volume * bar.typical_price();
        cum_volume += bar.volume;

        values.push(if cum_volume > 0.0 {
            Some(cum_pv / cum_volume)
        } else {
            None
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Vwap,
        values,
    }
}
