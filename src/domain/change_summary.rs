//! Trailing percentage change summary.
//!
//! For each lookback the reference bar is the latest bar at or before
//! `latest.timestamp - lookback`. Day and week lookbacks are fixed
//! durations; month and year lookbacks are calendar months.

use chrono::{DateTime, Duration, FixedOffset, Months};
use std::fmt;

use crate::domain::ohlcv::{Bar, BarSeries};
use crate::domain::period::Period;

/// Fetch span for summaries, independent of the chart period. Strictly longer
/// than the longest lookback so its reference bar is never cut off.
pub const SUMMARY_PERIOD: Period = Period::FiveYears;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookback {
    OneDay,
    OneWeek,
    OneMonth,
    SixMonths,
    OneYear,
}

impl Lookback {
    /// Output order of [`ChangeSummary`] slots.
    pub const ALL: [Lookback; 5] = [
        Lookback::OneDay,
        Lookback::OneWeek,
        Lookback::OneMonth,
        Lookback::SixMonths,
        Lookback::OneYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Lookback::OneDay => "1D",
            Lookback::OneWeek => "1W",
            Lookback::OneMonth => "1M",
            Lookback::SixMonths => "6M",
            Lookback::OneYear => "1Y",
        }
    }

    /// `None` when the target falls outside the representable time range.
    pub fn target(&self, latest: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        match self {
            Lookback::OneDay => latest.checked_sub_signed(Duration::days(1)),
            Lookback::OneWeek => latest.checked_sub_signed(Duration::days(7)),
            Lookback::OneMonth => latest.checked_sub_months(Months::new(1)),
            Lookback::SixMonths => latest.checked_sub_months(Months::new(6)),
            Lookback::OneYear => latest.checked_sub_months(Months::new(12)),
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeSummary {
    changes: [Option<f64>; 5],
}

impl ChangeSummary {
    pub fn unavailable() -> Self {
        Self { changes: [None; 5] }
    }

    pub fn get(&self, lookback: Lookback) -> Option<f64> {
        Lookback::ALL
            .iter()
            .position(|l| *l == lookback)
            .and_then(|i| self.changes[i])
    }

    pub fn as_array(&self) -> [Option<f64>; 5] {
        self.changes
    }

    pub fn iter(&self) -> impl Iterator<Item = (Lookback, Option<f64>)> {
        Lookback::ALL.into_iter().zip(self.changes)
    }
}

/// Percentage change of the latest close over each lookback in
/// [`Lookback::ALL`] order.
pub fn summarize(series: &BarSeries) -> ChangeSummary {
    let bars = series.bars();
    let latest = match bars.last() {
        Some(latest) if bars.len() >= 2 => latest,
        _ => return ChangeSummary::unavailable(),
    };

    let mut changes = [None; 5];
    for (slot, lookback) in changes.iter_mut().zip(Lookback::ALL.iter()) {
        *slot = lookback
            .target(latest.timestamp)
            .and_then(|target| reference_bar(bars, target))
            .and_then(|reference| percent_change(reference.close, latest.close));
    }

    ChangeSummary { changes }
}

/// Latest bar at or before `target`. Bars are sorted by timestamp.
fn reference_bar(bars: &[Bar], target: DateTime<FixedOffset>) -> Option<&Bar> {
    let after = bars.partition_point(|b| b.timestamp <= target);
    after.checked_sub(1).map(|i| &bars[i])
}

fn percent_change(reference: f64, latest: f64) -> Option<f64> {
    if reference == 0.0 {
        return None;
    }
    Some((latest - reference) / reference * 100.0)
}
