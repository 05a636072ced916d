//! Technical indicator implementations.
//!
//! Every indicator is a pure function from a read-only slice of bars to one
//! or more [`IndicatorSeries`] aligned index-for-index with the input:
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: one `Option<f64>` per input bar, `None` meaning the
//!   value is unavailable (short history or a zero divisor)

pub mod mfi;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stoch_rsi;
pub mod vwap;
pub mod williams_r;

pub use mfi::calculate_mfi;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stoch_rsi::{calculate_stoch_rsi, StochRsi, StochRsiParams};
pub use vwap::calculate_vwap;
pub use williams_r::calculate_williams_r;

use std::fmt;

use crate::domain::error::TikrscopeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Vwap,
    WilliamsR(usize),
    Mfi(usize),
    Rsi(usize),
    StochRsiK {
        period: usize,
        smooth_k: usize,
    },
    StochRsiD {
        period: usize,
        smooth_k: usize,
        smooth_d: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn first_valid_index(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Defined values in index order, paired with their index.
    pub fn defined(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v)))
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA{}", period),
            IndicatorType::Vwap => write!(f, "VWAP"),
            IndicatorType::WilliamsR(period) => write!(f, "WILLIAMS_R({})", period),
            IndicatorType::Mfi(period) => write!(f, "MFI({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::StochRsiK { period, smooth_k } => {
                write!(f, "STOCH_RSI_K({},{})", period, smooth_k)
            }
            IndicatorType::StochRsiD {
                period,
                smooth_k,
                smooth_d,
            } => write!(f, "STOCH_RSI_D({},{},{})", period, smooth_k, smooth_d),
        }
    }
}

/// Rejects a zero-length rolling window before any computation runs.
pub(crate) fn require_period(name: &str, period: usize) -> Result<(), TikrscopeError> {
    if period == 0 {
        return Err(TikrscopeError::InvalidParameter {
            name: name.to_string(),
            reason: "period must be a positive integer".to_string(),
        });
    }
    Ok(())
}
