//! CLI integration tests for config loading and chart/summary orchestration.
//!
//! Tests cover:
//! - Viewer config loading from INI files on disk
//! - Chart building with MockDataPort, including fetch failures
//! - Change summary formatting
//! - End-to-end with CSV bar files in a temp directory

mod common;

use approx::assert_relative_eq;
use chrono::{Datelike, NaiveDate, Weekday};
use common::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tikrscope::adapters::csv_adapter::CsvAdapter;
use tikrscope::adapters::json_chart_adapter::JsonChartAdapter;
use tikrscope::cli;
use tikrscope::domain::change_summary::Lookback;
use tikrscope::domain::chart::{PanelId, Theme, NO_DATA_MESSAGE};
use tikrscope::domain::error::TikrscopeError;
use tikrscope::domain::period::Period;
use tikrscope::domain::selection::{Oscillator, Overlay, PriceStyle};
use tikrscope::domain::viewer_config::ViewerConfig;
use tikrscope::ports::render_port::ChartRenderer;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[viewer]
tickers = SPY,NDAQ
timezone = UTC
chart_type = candlestick
period = 5y
theme = dark_amber.xml
main_indicator = sma20,vwap
sub_indicator = mfi

[data]
dir = ./bars
"#;

mod config_loading {
    use super::*;

    #[test]
    fn load_viewer_config_from_file() {
        let file = write_temp_ini(VALID_INI);
        let config = cli::load_viewer_config(Some(file.path())).unwrap();

        assert_eq!(config.tickers, vec!["SPY", "NDAQ"]);
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert_eq!(config.price_style, PriceStyle::Candlestick);
        assert_eq!(config.period, Period::FiveYears);
        assert_eq!(config.overlays, vec![Overlay::Sma { period: 20 }, Overlay::Vwap]);
        assert_eq!(config.oscillator, Oscillator::mfi());
        assert_eq!(config.data_dir, PathBuf::from("./bars"));
    }

    #[test]
    fn no_path_uses_defaults() {
        let config = cli::load_viewer_config(None).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = cli::load_viewer_config(Some(std::path::Path::new("/nonexistent/tikrscope.ini")))
            .unwrap_err();
        assert!(matches!(err, TikrscopeError::ConfigParse { .. }));
    }

    #[test]
    fn duplicate_overlay_in_file_rejected() {
        let file = write_temp_ini("[viewer]\nmain_indicator = vwap,sma5,vwap\n");
        let err = cli::load_viewer_config(Some(file.path())).unwrap_err();
        assert!(err.is_configuration());
    }
}

mod chart_building {
    use super::*;

    fn config() -> ViewerConfig {
        ViewerConfig {
            theme: "dark_teal.xml".to_string(),
            overlays: vec![Overlay::Vwap],
            oscillator: Oscillator::williams_r(),
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn builds_two_panel_chart_with_theme() {
        let port = MockDataPort::new().with_bars("SPY", wave_bars(60));
        let spec = cli::build_chart(&port, &config(), "SPY").unwrap();

        assert_eq!(spec.theme, Theme::Dark);
        assert_eq!(spec.panels.len(), 2);
        assert_eq!(spec.panel(PanelId::Price).unwrap().traces.len(), 2);
        assert_eq!(spec.panel(PanelId::Oscillator).unwrap().title, "Williams %R");
    }

    #[test]
    fn fetch_failure_renders_no_data() {
        let port = MockDataPort::new().with_error("SPY", "connection refused");
        let spec = cli::build_chart(&port, &config(), "SPY").unwrap();

        assert!(!spec.has_data());
        assert_eq!(spec.panels[0].title, NO_DATA_MESSAGE);
    }

    #[test]
    fn unknown_symbol_renders_no_data() {
        let port = MockDataPort::new();
        let spec = cli::build_chart(&port, &config(), "XYZ").unwrap();
        assert!(!spec.has_data());
    }

    #[test]
    fn summaries_follow_ticker_order() {
        let port = MockDataPort::new()
            .with_bars("NDAQ", generate_bars(30, 50.0, 1.0))
            .with_error("SPY", "timeout");
        let config = ViewerConfig {
            tickers: vec!["SPY".to_string(), "NDAQ".to_string()],
            ..ViewerConfig::default()
        };

        let summaries = cli::build_summaries(&port, &config);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].0, "SPY");
        assert!(summaries[0].1.as_array().iter().all(Option::is_none));
        assert_eq!(summaries[1].0, "NDAQ");
        assert!(summaries[1].1.get(Lookback::OneDay).unwrap() > 0.0);
    }
}

mod symbol_selection {
    use super::*;

    #[test]
    fn explicit_symbol_is_trimmed_and_upper_cased() {
        let config = ViewerConfig::default();
        assert_eq!(cli::chart_symbol(&config, Some(" aapl ")).unwrap(), "AAPL");
    }

    #[test]
    fn falls_back_to_first_ticker() {
        let config = ViewerConfig::default();
        assert_eq!(cli::chart_symbol(&config, None).unwrap(), "NDAQ");
        assert_eq!(cli::chart_symbol(&config, Some("  ")).unwrap(), "NDAQ");
    }

    #[test]
    fn no_symbol_and_no_tickers_is_config_error() {
        let config = ViewerConfig {
            tickers: Vec::new(),
            ..ViewerConfig::default()
        };
        let err = cli::chart_symbol(&config, None).unwrap_err();
        assert!(matches!(err, TikrscopeError::ConfigInvalid { ref key, .. } if key == "tickers"));
    }
}

mod formatting {
    use super::*;

    #[test]
    fn format_change_signs() {
        assert_eq!(cli::format_change(Some(1.234)), "+1.23%");
        assert_eq!(cli::format_change(Some(0.0)), "+0.00%");
        assert_eq!(cli::format_change(Some(-0.5)), "-0.50%");
        assert_eq!(cli::format_change(None), "n/a");
    }

    #[test]
    fn summary_line_lists_every_lookback() {
        let port = MockDataPort::new().with_bars("SPY", generate_bars(10, 100.0, 1.0));
        let summaries = cli::build_summaries(
            &port,
            &ViewerConfig {
                tickers: vec!["SPY".to_string()],
                ..ViewerConfig::default()
            },
        );
        let line = cli::format_summary_line(&summaries[0].0, &summaries[0].1);

        assert!(line.starts_with("SPY"));
        for label in ["1D", "1W", "1M", "6M", "1Y"] {
            assert!(line.contains(label), "missing {} in {}", label, line);
        }
        assert!(line.contains("n/a"));
        assert!(line.contains('+'));
    }
}

mod end_to_end {
    use super::*;

    fn write_bars(dir: &std::path::Path, symbol: &str, days: usize) {
        let mut content = String::from("timestamp,open,high,low,close,volume\n");
        for bar in wave_bars(days) {
            content.push_str(&format!(
                "{},{},{},{},{},{}\n",
                bar.timestamp.format("%Y-%m-%d"),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            ));
        }
        fs::write(dir.join(format!("{}_1d.csv", symbol)), content).unwrap();
    }

    #[test]
    fn config_and_csv_to_json_chart() {
        let dir = tempfile::TempDir::new().unwrap();
        write_bars(dir.path(), "SPY", 120);

        let ini = format!(
            "[viewer]\ntickers = spy\ntimezone = UTC\nperiod = 1y\nmain_indicator = sma5,sma20,vwap\nsub_indicator = stoch_rsi\n\n[data]\ndir = {}\n",
            dir.path().display()
        );
        let file = write_temp_ini(&ini);
        let config = cli::load_viewer_config(Some(file.path())).unwrap();

        let port = CsvAdapter::new(config.data_dir.clone());
        let spec = cli::build_chart(&port, &config, &config.tickers[0]).unwrap();
        let json = JsonChartAdapter::new().render(&spec).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["symbol"], "SPY");
        assert_eq!(value["panels"][0]["title"], "SPY Chart");
        assert_eq!(value["panels"][0]["traces"].as_array().unwrap().len(), 4);
        assert_eq!(value["panels"][1]["traces"][0]["name"], "%K");
        assert_eq!(value["panels"][1]["traces"][1]["name"], "%D");
    }

    fn write_weekday_bars(dir: &std::path::Path, symbol: &str, from: NaiveDate, to: NaiveDate) -> Vec<(NaiveDate, f64)> {
        let mut rows = Vec::new();
        let mut content = String::from("timestamp,open,high,low,close,volume\n");
        let mut day = from;
        while day <= to {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                let close = 100.0 + rows.len() as f64 * 0.1;
                content.push_str(&format!(
                    "{},{},{},{},{},1000\n",
                    day.format("%Y-%m-%d"),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close
                ));
                rows.push((day, close));
            }
            day = day.succ_opt().unwrap();
        }
        fs::write(dir.join(format!("{}_1d.csv", symbol)), content).unwrap();
        rows
    }

    fn close_on_or_before(rows: &[(NaiveDate, f64)], target: NaiveDate) -> f64 {
        rows.iter().rev().find(|(d, _)| *d <= target).unwrap().1
    }

    #[test]
    fn summary_ignores_chart_period() {
        let dir = tempfile::TempDir::new().unwrap();
        // 2023-06-10 is a Saturday, so the 1Y reference is the Friday before.
        let rows = write_weekday_bars(
            dir.path(),
            "SPY",
            NaiveDate::from_ymd_opt(2022, 6, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        );
        let latest = rows.last().unwrap().1;
        let one_year = close_on_or_before(&rows, NaiveDate::from_ymd_opt(2023, 6, 10).unwrap());
        let six_months = close_on_or_before(&rows, NaiveDate::from_ymd_opt(2023, 12, 10).unwrap());

        for period in [Period::OneMonth, Period::OneYear, Period::FiveYears] {
            let config = ViewerConfig {
                tickers: vec!["SPY".to_string()],
                timezone: chrono_tz::UTC,
                period,
                data_dir: dir.path().to_path_buf(),
                ..ViewerConfig::default()
            };
            let port = CsvAdapter::new(config.data_dir.clone());
            let summaries = cli::build_summaries(&port, &config);
            let summary = &summaries[0].1;

            assert!(
                summary.as_array().iter().all(Option::is_some),
                "period {} left a gap: {:?}",
                period,
                summary
            );
            assert_relative_eq!(
                summary.get(Lookback::OneYear).unwrap(),
                (latest - one_year) / one_year * 100.0,
                epsilon = 1e-9
            );
            assert_relative_eq!(
                summary.get(Lookback::SixMonths).unwrap(),
                (latest - six_months) / six_months * 100.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn missing_csv_gives_no_data_chart() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ViewerConfig {
            data_dir: dir.path().to_path_buf(),
            ..ViewerConfig::default()
        };
        let port = CsvAdapter::new(config.data_dir.clone());
        let spec = cli::build_chart(&port, &config, "NDAQ").unwrap();
        assert!(!spec.has_data());
    }
}
