//! MFI (Money Flow Index).
//!
//! raw_flow[i] = typical[i] × volume[i]
//! A bar whose typical price rose against the previous bar adds its raw flow
//! to the positive bucket, a bar whose typical price fell adds it to the
//! negative bucket. Unchanged bars and the first bar feed neither. A binary
//! up/not-up split would count those bars as negative flow instead, so the
//! first defined value (and any window holding unchanged bars) reads higher
//! here than under that rule.
//!
//! MFI = 100 - 100 / (1 + Σpos / Σneg) over a trailing window of n bars.
//! Range [0, 100]. Unavailable while Σneg == 0 (this covers flat windows).

use crate::domain::error::TikrscopeError;
use crate::domain::indicator::rolling::rolling_sum;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_PERIOD: usize = 14;

pub const REFERENCE_LEVELS: [f64; 2] = [20.0, 80.0];

pub fn calculate_mfi(bars: &[Bar], period: usize) -> Result<IndicatorSeries, TikrscopeError> {
    require_period("mfi period", period)?;

    let mut positive: Vec<Option<f64>> = Vec::with_capacity(bars.len());
    let mut negative: Vec<Option<f64>> = Vec::with_capacity(bars.len());
    let mut prev_typical: Option<f64> = None;

    for bar in bars {
        let typical = bar.typical_price();
        let flow = typical * bar.volume;
        let (pos, neg) = match prev_typical {
            Some(prev) if typical > prev => (flow, 0.0),
            Some(prev) if typical < prev => (0.0, flow),
            _ => (0.0, 0.0),
        };
        positive.push(Some(pos));
        negative.push(Some(neg));
        prev_typical = Some(typical);
    }

    let pos_sums = rolling_sum(&positive, period);
    let neg_sums = rolling_sum(&negative, period);

    let values = pos_sums
        .iter()
        .zip(neg_sums.iter())
        .map(|sums| match sums {
            (Some(pos), Some(neg)) if *neg > 0.0 => Some(100.0 - 100.0 / (1.0 + pos / neg)),
            _ => None,
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Mfi(period),
        values,
    })
}
