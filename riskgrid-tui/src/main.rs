mod app;
mod buffer;
mod config;
mod feed;
mod hit;
mod paint;
mod paths;
mod surface;
mod terminal;
mod theme;

use std::fs::{self, File};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::config::TuiConfig;
use crate::feed::FeedSource;

/// Terminal risk grid: renders datasets pushed as JSON-line envelopes.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Read envelopes from this file instead of stdin
    #[arg(long)]
    feed: Option<PathBuf>,

    /// JSON config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (defaults to latest.log in the platform cache dir)
    #[arg(long)]
    log: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let path = match &args.log {
        Some(path) => path.clone(),
        None => {
            if let Err(e) = paths::rotate_logs() {
                eprintln!("Warning: log rotation failed: {}", e);
            }
            let Some(path) = paths::log_file() else {
                return Ok(());
            };
            path
        }
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    WriteLogger::init(args.log_level.into(), Config::default(), File::create(&path)?)?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if !io::stdout().is_terminal() {
        log::warn!("stdout is not a terminal, nothing to render into");
        return ExitCode::SUCCESS;
    }

    let config = TuiConfig::load_or_default(args.config.as_deref());
    let feed = match args.feed {
        Some(path) => feed::spawn(FeedSource::File(path)),
        None if io::stdin().is_terminal() => {
            log::info!("stdin is a terminal and no --feed given, showing the fallback");
            feed::idle()
        }
        None => feed::spawn(FeedSource::Stdin),
    };

    // The terminal is restored when `App` drops, before the error prints
    let result = match App::new(config) {
        Ok(app) => app.run(feed).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
