//! Stochastic RSI with %K / %D smoothing.
//!
//! stoch[i] = (RSI[i] - min(RSI, n)) / (max(RSI, n) - min(RSI, n))
//! %K = mean(stoch × 100, smooth_k)
//! %D = mean(%K, smooth_d)
//!
//! A window with a zero RSI range is unavailable and so is every smoothed
//! value whose window covers it.

use crate::domain::error::TikrscopeError;
use crate::domain::indicator::rolling::{rolling_max, rolling_mean, rolling_min};
use crate::domain::indicator::{calculate_rsi, require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::Bar;

pub const REFERENCE_LEVELS: [f64; 2] = [20.0, 80.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StochRsiParams {
    pub period: usize,
    pub smooth_k: usize,
    pub smooth_d: usize,
}

impl Default for StochRsiParams {
    fn default() -> Self {
        Self {
            period: 14,
            smooth_k: 3,
            smooth_d: 3,
        }
    }
}

impl StochRsiParams {
    pub fn validate(&self) -> Result<(), TikrscopeError> {
        require_period("stoch_rsi period", self.period)?;
        require_period("stoch_rsi smooth_k", self.smooth_k)?;
        require_period("stoch_rsi smooth_d", self.smooth_d)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StochRsi {
    pub k: IndicatorSeries,
    pub d: IndicatorSeries,
}

pub fn calculate_stoch_rsi(bars: &[Bar], params: StochRsiParams) -> Result<StochRsi, TikrscopeError> {
    params.validate()?;
    let StochRsiParams {
        period,
        smooth_k,
        smooth_d,
    } = params;

    let rsi = calculate_rsi(bars, period)?;
    let highest = rolling_max(&rsi.values, period);
    let lowest = rolling_min(&rsi.values, period);

    let stoch: Vec<Option<f64>> = rsi
        .values
        .iter()
        .zip(highest.iter().zip(lowest.iter()))
        .map(|(value, window)| match (value, window) {
            (Some(rsi), (Some(high), Some(low))) if high > low => {
                Some((rsi - low) / (high - low) * 100.0)
            }
            _ => None,
        })
        .collect();

    let k = rolling_mean(&stoch, smooth_k);
    let d = rolling_mean(&k, smooth_d);

    Ok(StochRsi {
        k: IndicatorSeries {
            indicator_type: IndicatorType::StochRsiK { period, smooth_k },
            values: k,
        },
        d: IndicatorSeries {
            indicator_type: IndicatorType::StochRsiD {
                period,
                smooth_k,
                smooth_d,
            },
            values: d,
        },
    })
}
