//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod selection;
pub mod chart;
pub mod change_summary;
pub mod period;
pub mod viewer_config;
pub mod error;
