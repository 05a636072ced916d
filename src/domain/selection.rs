//! Closed sets of chart selections: price style, overlays, oscillators.
//!
//! Configuration keys are parsed into these enums once, at the edge. Unknown
//! keys and bad parameters are rejected there, so the composer only ever
//! sees supported combinations.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::TikrscopeError;
use crate::domain::indicator::{mfi, require_period, stoch_rsi, williams_r, StochRsiParams};

/// SMA windows offered on the price panel.
pub const SUPPORTED_SMA_PERIODS: [usize; 4] = [5, 20, 60, 120];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceStyle {
    Line,
    Candlestick,
}

impl FromStr for PriceStyle {
    type Err = TikrscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(PriceStyle::Line),
            "candlestick" => Ok(PriceStyle::Candlestick),
            _ => Err(TikrscopeError::UnknownKey {
                kind: "price style",
                key: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PriceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceStyle::Line => write!(f, "line"),
            PriceStyle::Candlestick => write!(f, "candlestick"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Sma { period: usize },
    Vwap,
}

impl Overlay {
    pub fn sma(period: usize) -> Result<Self, TikrscopeError> {
        let overlay = Overlay::Sma { period };
        overlay.validate()?;
        Ok(overlay)
    }

    pub fn validate(&self) -> Result<(), TikrscopeError> {
        if let Overlay::Sma { period } = *self {
            require_period("sma period", period)?;
            if !SUPPORTED_SMA_PERIODS.contains(&period) {
                return Err(TikrscopeError::InvalidParameter {
                    name: "sma period".to_string(),
                    reason: format!(
                        "{} is not one of {:?}",
                        period, SUPPORTED_SMA_PERIODS
                    ),
                });
            }
        }
        Ok(())
    }

    /// Configuration key, e.g. `sma20`.
    pub fn key(&self) -> String {
        match self {
            Overlay::Sma { period } => format!("sma{}", period),
            Overlay::Vwap => "vwap".to_string(),
        }
    }

    /// Legend name of the overlay trace.
    pub fn display_name(&self) -> String {
        match self {
            Overlay::Sma { period } => format!("SMA{}", period),
            Overlay::Vwap => "VWAP".to_string(),
        }
    }
}

impl FromStr for Overlay {
    type Err = TikrscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        let unknown = || TikrscopeError::UnknownKey {
            kind: "overlay",
            key: s.to_string(),
        };

        if key == "vwap" {
            return Ok(Overlay::Vwap);
        }
        let period: usize = key
            .strip_prefix("sma")
            .and_then(|p| p.parse().ok())
            .ok_or_else(unknown)?;
        Overlay::sma(period)
    }
}

/// Parses a comma-separated overlay list, keeping the requested order.
pub fn parse_overlays(list: &str) -> Result<Vec<Overlay>, TikrscopeError> {
    let overlays = list
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(Overlay::from_str)
        .collect::<Result<Vec<_>, _>>()?;
    validate_overlays(&overlays)?;
    Ok(overlays)
}

/// Every overlay must be valid and appear at most once.
pub fn validate_overlays(overlays: &[Overlay]) -> Result<(), TikrscopeError> {
    let mut seen = HashSet::with_capacity(overlays.len());
    for overlay in overlays {
        overlay.validate()?;
        if !seen.insert(*overlay) {
            return Err(TikrscopeError::DuplicateOverlay { key: overlay.key() });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Oscillator {
    WilliamsR { period: usize },
    Mfi { period: usize },
    StochRsi(StochRsiParams),
}

impl Oscillator {
    pub fn williams_r() -> Self {
        Oscillator::WilliamsR {
            period: williams_r::DEFAULT_PERIOD,
        }
    }

    pub fn mfi() -> Self {
        Oscillator::Mfi {
            period: mfi::DEFAULT_PERIOD,
        }
    }

    pub fn stoch_rsi() -> Self {
        Oscillator::StochRsi(StochRsiParams::default())
    }

    pub fn validate(&self) -> Result<(), TikrscopeError> {
        match self {
            Oscillator::WilliamsR { period } => require_period("williams_r period", *period),
            Oscillator::Mfi { period } => require_period("mfi period", *period),
            Oscillator::StochRsi(params) => params.validate(),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Oscillator::WilliamsR { .. } => "williams_r",
            Oscillator::Mfi { .. } => "mfi",
            Oscillator::StochRsi(_) => "stoch_rsi",
        }
    }

    /// Oscillator panel title.
    pub fn title(&self) -> &'static str {
        match self {
            Oscillator::WilliamsR { .. } => "Williams %R",
            Oscillator::Mfi { .. } => "MFI (Money Flow Index)",
            Oscillator::StochRsi(_) => "Stochastic RSI",
        }
    }

    pub fn reference_levels(&self) -> [f64; 2] {
        match self {
            Oscillator::WilliamsR { .. } => williams_r::REFERENCE_LEVELS,
            Oscillator::Mfi { .. } => mfi::REFERENCE_LEVELS,
            Oscillator::StochRsi(_) => stoch_rsi::REFERENCE_LEVELS,
        }
    }
}

impl FromStr for Oscillator {
    type Err = TikrscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "williams_r" => Ok(Oscillator::williams_r()),
            "mfi" => Ok(Oscillator::mfi()),
            "stoch_rsi" => Ok(Oscillator::stoch_rsi()),
            _ => Err(TikrscopeError::UnknownKey {
                kind: "oscillator",
                key: s.to_string(),
            }),
        }
    }
}
