//! Chart composition.
//!
//! [`compose`] turns a bar series plus a selection of overlays and one
//! oscillator into a [`ChartSpec`]: an immutable, renderer-agnostic value
//! with a price panel and an oscillator panel. Nothing here draws; a
//! [`ChartRenderer`](crate::ports::render_port::ChartRenderer) consumes the
//! result.
//!
//! Unavailable indicator values are left out of their trace, so renderers
//! draw through the gaps. Trace order is the price trace followed by the
//! overlays in the order they were requested.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::domain::error::TikrscopeError;
use crate::domain::indicator::{
    calculate_mfi, calculate_sma, calculate_stoch_rsi, calculate_vwap, calculate_williams_r,
    IndicatorSeries,
};
use crate::domain::ohlcv::{Bar, BarSeries};
use crate::domain::selection::{validate_overlays, Oscillator, Overlay, PriceStyle};

pub const NO_DATA_MESSAGE: &str = "No data available.";

const PRICE_HEIGHT: f64 = 0.7;
const OSCILLATOR_HEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Any theme name mentioning "dark" selects the dark template.
    pub fn from_name(name: &str) -> Self {
        if name.to_lowercase().contains("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    Price,
    Oscillator,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Line,
    Candlestick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dash {
    Solid,
    Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStyle {
    pub kind: TraceKind,
    pub color: Option<String>,
    pub width: Option<f64>,
}

impl TraceStyle {
    fn line(color: Option<&str>, width: Option<f64>) -> Self {
        Self {
            kind: TraceKind::Line,
            color: color.map(str::to_string),
            width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XyPoint {
    pub x: DateTime<FixedOffset>,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcPoint {
    pub x: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "points", rename_all = "snake_case")]
pub enum TraceData {
    Xy(Vec<XyPoint>),
    Ohlc(Vec<OhlcPoint>),
}

impl TraceData {
    pub fn len(&self) -> usize {
        match self {
            TraceData::Xy(points) => points.len(),
            TraceData::Ohlc(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub style: TraceStyle,
    pub data: TraceData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub dash: Dash,
}

/// Horizontal threshold line spanning the visible x-range of a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub panel: PanelId,
    pub y: f64,
    pub x0: DateTime<FixedOffset>,
    pub x1: DateTime<FixedOffset>,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: PanelId,
    pub title: String,
    pub height_ratio: f64,
    pub traces: Vec<Trace>,
    pub reference_lines: Vec<ReferenceLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub symbol: String,
    pub theme: Theme,
    pub shared_x_axis: bool,
    pub panels: Vec<Panel>,
}

impl ChartSpec {
    /// Single informational panel with no traces.
    pub fn no_data(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            theme: Theme::Light,
            shared_x_axis: false,
            panels: vec![Panel {
                id: PanelId::Info,
                title: NO_DATA_MESSAGE.to_string(),
                height_ratio: 1.0,
                traces: Vec::new(),
                reference_lines: Vec::new(),
            }],
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn has_data(&self) -> bool {
        self.panel(PanelId::Info).is_none()
    }
}

/// Builds the two-panel chart for `series`.
///
/// The selection is validated before any indicator runs; an invalid overlay
/// or oscillator fails the whole call. An empty series is not an error and
/// yields [`ChartSpec::no_data`].
pub fn compose(
    series: &BarSeries,
    price_style: PriceStyle,
    overlays: &[Overlay],
    oscillator: Oscillator,
) -> Result<ChartSpec, TikrscopeError> {
    validate_overlays(overlays)?;
    oscillator.validate()?;

    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first.timestamp, last.timestamp),
        _ => {
            log::debug!("no bars for {}, composing empty chart", series.symbol());
            return Ok(ChartSpec::no_data(series.symbol()));
        }
    };

    log::debug!(
        "composing {} chart for {}: {} bars, overlays [{}], oscillator {}",
        price_style,
        series.symbol(),
        series.len(),
        overlays
            .iter()
            .map(Overlay::key)
            .collect::<Vec<_>>()
            .join(","),
        oscillator.key()
    );

    let bars = series.bars();

    let mut price_traces = Vec::with_capacity(overlays.len() + 1);
    price_traces.push(price_trace(bars, price_style));
    for overlay in overlays {
        price_traces.push(overlay_trace(bars, overlay)?);
    }

    let oscillator_traces = oscillator_traces(bars, &oscillator)?;
    let reference_lines = oscillator
        .reference_levels()
        .iter()
        .map(|&y| ReferenceLine {
            panel: PanelId::Oscillator,
            y,
            x0: first,
            x1: last,
            style: LineStyle {
                color: "gray".to_string(),
                dash: Dash::Dot,
            },
        })
        .collect();

    Ok(ChartSpec {
        symbol: series.symbol().to_uppercase(),
        theme: Theme::Light,
        shared_x_axis: true,
        panels: vec![
            Panel {
                id: PanelId::Price,
                title: format!("{} Chart", series.symbol().to_uppercase()),
                height_ratio: PRICE_HEIGHT,
                traces: price_traces,
                reference_lines: Vec::new(),
            },
            Panel {
                id: PanelId::Oscillator,
                title: oscillator.title().to_string(),
                height_ratio: OSCILLATOR_HEIGHT,
                traces: oscillator_traces,
                reference_lines,
            },
        ],
    })
}

fn price_trace(bars: &[Bar], style: PriceStyle) -> Trace {
    match style {
        PriceStyle::Line => Trace {
            name: "Close".to_string(),
            style: TraceStyle::line(None, None),
            data: TraceData::Xy(
                bars.iter()
                    .map(|b| XyPoint {
                        x: b.timestamp,
                        y: b.close,
                    })
                    .collect(),
            ),
        },
        PriceStyle::Candlestick => Trace {
            name: "Candlestick".to_string(),
            style: TraceStyle {
                kind: TraceKind::Candlestick,
                color: None,
                width: None,
            },
            data: TraceData::Ohlc(
                bars.iter()
                    .map(|b| OhlcPoint {
                        x: b.timestamp,
                        open: b.open,
                        high: b.high,
                        low: b.low,
                        close: b.close,
                    })
                    .collect(),
            ),
        },
    }
}

fn overlay_trace(bars: &[Bar], overlay: &Overlay) -> Result<Trace, TikrscopeError> {
    let (series, style) = match overlay {
        Overlay::Sma { period } => (
            calculate_sma(bars, *period)?,
            TraceStyle::line(None, Some(1.0)),
        ),
        Overlay::Vwap => (calculate_vwap(bars), TraceStyle::line(Some("purple"), Some(1.0))),
    };
    Ok(indicator_trace(bars, overlay.display_name(), &series, style))
}

fn oscillator_traces(bars: &[Bar], oscillator: &Oscillator) -> Result<Vec<Trace>, TikrscopeError> {
    let traces = match oscillator {
        Oscillator::WilliamsR { period } => vec![indicator_trace(
            bars,
            "Williams %R".to_string(),
            &calculate_williams_r(bars, *period)?,
            TraceStyle::line(Some("orange"), Some(1.0)),
        )],
        Oscillator::Mfi { period } => vec![indicator_trace(
            bars,
            "MFI".to_string(),
            &calculate_mfi(bars, *period)?,
            TraceStyle::line(Some("green"), Some(1.0)),
        )],
        Oscillator::StochRsi(params) => {
            let lines = calculate_stoch_rsi(bars, *params)?;
            vec![
                indicator_trace(
                    bars,
                    "%K".to_string(),
                    &lines.k,
                    TraceStyle::line(Some("blue"), Some(1.0)),
                ),
                indicator_trace(
                    bars,
                    "%D".to_string(),
                    &lines.d,
                    TraceStyle::line(Some("orange"), Some(1.0)),
                ),
            ]
        }
    };
    Ok(traces)
}

fn indicator_trace(bars: &[Bar], name: String, series: &IndicatorSeries, style: TraceStyle) -> Trace {
    log::debug!(
        "{}: {} of {} points defined",
        series.indicator_type,
        series.valid_count(),
        series.len()
    );
    let points = series
        .defined()
        .map(|(i, y)| XyPoint {
            x: bars[i].timestamp,
            y,
        })
        .collect();
    Trace {
        name,
        style,
        data: TraceData::Xy(points),
    }
}
