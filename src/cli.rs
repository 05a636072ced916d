//! CLI definition and dispatch.

use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_chart_adapter::JsonChartAdapter;
use crate::domain::change_summary::{summarize, ChangeSummary, SUMMARY_PERIOD};
use crate::domain::chart::{compose, ChartSpec, Theme};
use crate::domain::error::TikrscopeError;
use crate::domain::ohlcv::BarSeries;
use crate::domain::period::Period;
use crate::domain::viewer_config::{ViewerConfig, VIEWER_SECTION};
use crate::ports::data_port::DataPort;
use crate::ports::render_port::ChartRenderer;

#[derive(Parser, Debug)]
#[command(name = "tikrscope", about = "Price charts with technical indicator overlays")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose a chart and write it as JSON
    Chart {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Defaults to the first configured ticker
        #[arg(short, long)]
        symbol: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        compact: bool,
    },
    /// Print trailing price changes for every configured ticker
    Summary {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// List symbols with bar files in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a viewer configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Chart {
            config,
            symbol,
            data_dir,
            output,
            compact,
        } => run_chart(
            config.as_deref(),
            symbol.as_deref(),
            data_dir.as_deref(),
            output.as_deref(),
            compact,
        ),
        Command::Summary { config, data_dir } => run_summary(config.as_deref(), data_dir.as_deref()),
        Command::ListSymbols { config, data_dir } => {
            run_list_symbols(config.as_deref(), data_dir.as_deref())
        }
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: TikrscopeError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(&err)
}

/// Without a path the built-in defaults apply.
pub fn load_viewer_config(path: Option<&Path>) -> Result<ViewerConfig, TikrscopeError> {
    match path {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            let adapter = FileConfigAdapter::from_file(path)?;
            ViewerConfig::from_port(&adapter)
        }
        None => Ok(ViewerConfig::default()),
    }
}

fn resolve_config(
    config_path: Option<&Path>,
    data_dir: Option<&Path>,
) -> Result<ViewerConfig, TikrscopeError> {
    let mut config = load_viewer_config(config_path)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir.to_path_buf();
    }
    Ok(config)
}

/// A failed fetch is reported and treated as "no data".
pub fn fetch_or_empty(data_port: &dyn DataPort, symbol: &str, period: Period, timezone: Tz) -> BarSeries {
    match data_port.fetch_bars(symbol, period, timezone) {
        Ok(series) => series,
        Err(e) => {
            log::warn!("no data for {}: {}", symbol, e);
            BarSeries::empty(symbol.to_uppercase())
        }
    }
}

/// An explicit symbol wins over the first configured ticker.
pub fn chart_symbol(config: &ViewerConfig, symbol: Option<&str>) -> Result<String, TikrscopeError> {
    symbol
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .or_else(|| config.tickers.first().cloned())
        .ok_or_else(|| TikrscopeError::ConfigInvalid {
            section: VIEWER_SECTION.to_string(),
            key: "tickers".to_string(),
            reason: "no symbol given and no tickers configured".to_string(),
        })
}

pub fn build_chart(
    data_port: &dyn DataPort,
    config: &ViewerConfig,
    symbol: &str,
) -> Result<ChartSpec, TikrscopeError> {
    let series = fetch_or_empty(data_port, symbol, config.period, config.timezone);
    let spec = compose(&series, config.price_style, &config.overlays, config.oscillator)?;
    Ok(spec.with_theme(Theme::from_name(&config.theme)))
}

/// Summaries use their own long fetch so the chart period never truncates a
/// lookback.
pub fn build_summaries(data_port: &dyn DataPort, config: &ViewerConfig) -> Vec<(String, ChangeSummary)> {
    config
        .tickers
        .iter()
        .map(|ticker| {
            let series = fetch_or_empty(data_port, ticker, SUMMARY_PERIOD, config.timezone);
            (ticker.clone(), summarize(&series))
        })
        .collect()
}

/// Signed percentage with two decimals, or `n/a`.
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(pct) if pct >= 0.0 => format!("+{:.2}%", pct),
        Some(pct) => format!("{:.2}%", pct),
        None => "n/a".to_string(),
    }
}

pub fn format_summary_line(symbol: &str, summary: &ChangeSummary) -> String {
    let cells: Vec<String> = summary
        .iter()
        .map(|(lookback, change)| format!("{} {:>8}", lookback, format_change(change)))
        .collect();
    format!("{:<8} {}", symbol, cells.join("  "))
}

fn run_chart(
    config_path: Option<&Path>,
    symbol: Option<&str>,
    data_dir: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
) -> ExitCode {
    let config = match resolve_config(config_path, data_dir) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    let symbol = match chart_symbol(&config, symbol) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let data_port = CsvAdapter::new(config.data_dir.clone());
    let spec = match build_chart(&data_port, &config, &symbol) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let renderer = if compact {
        JsonChartAdapter::compact()
    } else {
        JsonChartAdapter::new()
    };
    let rendered = match renderer.render(&spec) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, rendered) {
                return fail(e.into());
            }
            eprintln!("Chart for {} written to {}", symbol, path.display());
        }
        None => println!("{}", rendered),
    }
    ExitCode::SUCCESS
}

fn run_summary(config_path: Option<&Path>, data_dir: Option<&Path>) -> ExitCode {
    let config = match resolve_config(config_path, data_dir) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    let data_port = CsvAdapter::new(config.data_dir.clone());
    for (symbol, summary) in build_summaries(&data_port, &config) {
        println!("{}", format_summary_line(&symbol, &summary));
    }
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: Option<&Path>, data_dir: Option<&Path>) -> ExitCode {
    let config = match resolve_config(config_path, data_dir) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    let data_port = CsvAdapter::new(config.data_dir.clone());
    let symbols = match data_port.list_symbols() {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    if symbols.is_empty() {
        eprintln!("No symbols found in {}", config.data_dir.display());
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    match load_viewer_config(Some(config_path)) {
        Ok(config) => {
            eprintln!(
                "Config is valid: {} tickers, {} overlays, oscillator {}",
                config.tickers.len(),
                config.overlays.len(),
                config.oscillator.key()
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
