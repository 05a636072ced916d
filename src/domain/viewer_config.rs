//! Viewer configuration, parsed and validated up front.
//!
//! Every key lives in the `[viewer]` section except the bar directory in
//! `[data]`. Missing keys fall back to the defaults below; present but
//! unparseable keys are errors naming the section and key.

use chrono_tz::Tz;
use std::path::PathBuf;

use crate::domain::error::TikrscopeError;
use crate::domain::period::Period;
use crate::domain::selection::{parse_overlays, Oscillator, Overlay, PriceStyle};
use crate::ports::config_port::ConfigPort;

pub const VIEWER_SECTION: &str = "viewer";
pub const DATA_SECTION: &str = "data";

pub const DEFAULT_TICKERS: &str = "NDAQ,SPY";
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";
pub const DEFAULT_CHART_TYPE: &str = "line";
pub const DEFAULT_PERIOD: &str = "1y";
pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_MAIN_INDICATORS: &str = "sma5,sma20,sma60,sma120,vwap";
pub const DEFAULT_SUB_INDICATOR: &str = "williams_r";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub tickers: Vec<String>,
    pub timezone: Tz,
    pub price_style: PriceStyle,
    pub period: Period,
    pub theme: String,
    pub overlays: Vec<Overlay>,
    pub oscillator: Oscillator,
    pub data_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tickers: vec!["NDAQ".to_string(), "SPY".to_string()],
            timezone: chrono_tz::Asia::Seoul,
            price_style: PriceStyle::Line,
            period: Period::OneYear,
            theme: DEFAULT_THEME.to_string(),
            overlays: vec![
                Overlay::Sma { period: 5 },
                Overlay::Sma { period: 20 },
                Overlay::Sma { period: 60 },
                Overlay::Sma { period: 120 },
                Overlay::Vwap,
            ],
            oscillator: Oscillator::williams_r(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl ViewerConfig {
    pub fn from_port(config: &dyn ConfigPort) -> Result<Self, TikrscopeError> {
        let tickers = parse_tickers(&viewer_value(config, "tickers", DEFAULT_TICKERS))?;

        let timezone_str = viewer_value(config, "timezone", DEFAULT_TIMEZONE);
        let timezone: Tz = timezone_str
            .trim()
            .parse()
            .map_err(|_| invalid("timezone", format!("unknown IANA timezone '{}'", timezone_str)))?;

        let price_style: PriceStyle = viewer_value(config, "chart_type", DEFAULT_CHART_TYPE)
            .parse()
            .map_err(|e: TikrscopeError| invalid("chart_type", e.to_string()))?;

        let period: Period = viewer_value(config, "period", DEFAULT_PERIOD)
            .parse()
            .map_err(|e: TikrscopeError| invalid("period", e.to_string()))?;

        let overlays = parse_overlays(&viewer_value(config, "main_indicator", DEFAULT_MAIN_INDICATORS))
            .map_err(|e| invalid("main_indicator", e.to_string()))?;

        let oscillator: Oscillator = viewer_value(config, "sub_indicator", DEFAULT_SUB_INDICATOR)
            .parse()
            .map_err(|e: TikrscopeError| invalid("sub_indicator", e.to_string()))?;

        let theme = viewer_value(config, "theme", DEFAULT_THEME).trim().to_string();

        let data_dir = config
            .get_string(DATA_SECTION, "dir")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let parsed = Self {
            tickers,
            timezone,
            price_style,
            period,
            theme,
            overlays,
            oscillator,
            data_dir: PathBuf::from(data_dir.trim()),
        };
        log::info!(
            "viewer config: {} tickers, {} {} chart, period {}, oscillator {}",
            parsed.tickers.len(),
            parsed.timezone,
            parsed.price_style,
            parsed.period,
            parsed.oscillator.key()
        );
        Ok(parsed)
    }
}

fn viewer_value(config: &dyn ConfigPort, key: &str, default: &str) -> String {
    config
        .get_string(VIEWER_SECTION, key)
        .unwrap_or_else(|| default.to_string())
}

fn invalid(key: &str, reason: String) -> TikrscopeError {
    TikrscopeError::ConfigInvalid {
        section: VIEWER_SECTION.to_string(),
        key: key.to_string(),
        reason,
    }
}

/// Comma-separated, trimmed and upper-cased. At least one ticker is required.
pub fn parse_tickers(list: &str) -> Result<Vec<String>, TikrscopeError> {
    let tickers: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .collect();
    if tickers.is_empty() {
        return Err(invalid("tickers", "at least one ticker is required".to_string()));
    }
    Ok(tickers)
}
