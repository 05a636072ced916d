//! History periods offered by the viewer.

use chrono::{DateTime, Duration, FixedOffset, Months};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::TikrscopeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
}

impl Period {
    pub const ALL: [Period; 7] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::FiveYears,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::FiveYears => "5y",
        }
    }

    /// Bar interval fetched for this period: minute bars for one day,
    /// daily bars otherwise.
    pub fn interval(&self) -> &'static str {
        match self {
            Period::OneDay => "1m",
            _ => "1d",
        }
    }

    /// Oldest timestamp still inside the period when the newest bar is at
    /// `latest`.
    pub fn window_start(&self, latest: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        match self {
            Period::OneDay => latest.checked_sub_signed(Duration::days(1)),
            Period::FiveDays => latest.checked_sub_signed(Duration::days(5)),
            Period::OneMonth => latest.checked_sub_months(Months::new(1)),
            Period::ThreeMonths => latest.checked_sub_months(Months::new(3)),
            Period::SixMonths => latest.checked_sub_months(Months::new(6)),
            Period::OneYear => latest.checked_sub_months(Months::new(12)),
            Period::FiveYears => latest.checked_sub_months(Months::new(60)),
        }
    }
}

impl FromStr for Period {
    type Err = TikrscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Period::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| TikrscopeError::UnknownKey {
                kind: "period",
                key: s.to_string(),
            })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
