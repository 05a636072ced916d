use clap::Parser;
use tikrscope::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    let crate_level = if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Warn)
        .filter(Some("tikrscope"), crate_level)
        .parse_default_env()
        .init();

    run(Cli::parse())
}
