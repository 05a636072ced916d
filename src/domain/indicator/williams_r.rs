//! Williams %R oscillator.
//!
//! %R = (highest_high - close) / (highest_high - lowest_low) × -100
//! over a trailing window of n bars. Range [-100, 0].
//! Warmup: first (n-1) bars are unavailable; a flat window (high == low)
//! is unavailable too.

use crate::domain::error::TikrscopeError;
use crate::domain::indicator::rolling::{rolling_max, rolling_min};
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_PERIOD: usize = 14;

/// Threshold lines drawn alongside %R.
pub const REFERENCE_LEVELS: [f64; 2] = [-20.0, -80.0];

pub fn calculate_williams_r(bars: &[Bar], period: usize) -> Result<IndicatorSeries, TikrscopeError> {
    require_period("williams_r period", period)?;

    let highs: Vec<Option<f64>> = bars.iter().map(|b| Some(b.high)).collect();
    let lows: Vec<Option<f64>> = bars.iter().map(|b| Some(b.low)).collect();
    let highest = rolling_max(&highs, period);
    let lowest = rolling_min(&lows, period);

    let values = bars
        .iter()
        .zip(highest.iter().zip(lowest.iter()))
        .map(|(bar, window)| match window {
            (Some(high), Some(low)) if high != low => {
                Some((high - bar.close) / (high - low) * -100.0)
            }
            _ => None,
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::WilliamsR(period),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, TimeZone};

    fn make_bar(day: i64, high: f64, low: f64, close: f64) -> Bar {
        let start = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        Bar {
            timestamp: start + Duration::days(day),
            open: close,
            high,
            low,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn williams_warmup() {
        let bars: Vec<Bar> = (0..5)
            .map(|i| make_bar(i, 110.0 + i as f64, 90.0, 100.0))
            .collect();
        let series = calculate_williams_r(&bars, 3).unwrap();

        assert_eq!(series.get(0), None);
        assert_eq!(series.get(1), None);
        assert!(series.get(2).is_some());
    }

    #[test]
    fn williams_known_value() {
        let bars = vec![
            make_bar(0, 110.0, 100.0, 105.0),
            make_bar(1, 120.0, 95.0, 100.0),
            make_bar(2, 115.0, 105.0, 110.0),
        ];
        let series = calculate_williams_r(&bars, 3).unwrap();
        // high=120, low=95, close=110 → (120-110)/25 × -100 = -40
        assert!((series.get(2).unwrap() + 40.0).abs() < 1e-9);
    }

    #[test]
    fn williams_close_at_high_is_zero() {
        let bars: Vec<Bar> = (0..4)
            .map(|i| {
                let close = 100.0 + i as f64;
                make_bar(i, close, close - 5.0, close)
            })
            .collect();
        let series = calculate_williams_r(&bars, 2).unwrap();
        for (_, v) in series.defined() {
            assert!(v.abs() < f64::EPSILON);
        }
    }

    #[test]
    fn williams_close_at_low_is_minus_hundred() {
        let bars = vec![make_bar(0, 110.0, 100.0, 105.0), make_bar(1, 108.0, 95.0, 95.0)];
        let series = calculate_williams_r(&bars, 2).unwrap();
        assert!((series.get(1).unwrap() + 100.0).abs() < 1e-9);
    }

    #[test]
    fn williams_flat_window_unavailable() {
        let bars: Vec<Bar> = (0..5).map(|i| make_bar(i, 100.0, 100.0, 100.0)).collect();
        let series = calculate_williams_r(&bars, 3).unwrap();
        assert_eq!(series.valid_count(), 0);
    }

    #[test]
    fn williams_zero_period() {
        assert!(calculate_williams_r(&[], 0).is_err());
    }
}
