// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use vaani::app_config::{self, Config};
use vaani::errors::AppError;
use vaani::pipeline::SpeechPipeline;
use vaani::server::{self, AppState};

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Vaani - speech round-trip backend
///
/// Serves the Bhashini-backed speech pipeline over HTTP: transcription,
/// translation to a pivot language and back, and speech synthesis.
#[derive(Parser, Debug)]
#[command(name = "vaani")]
#[command(version = "1.0.0")]
#[command(about = "Speech round-trip backend for Bhashini ASR, translation and TTS")]
#[command(long_about = "Vaani chains the Bhashini remote services into a single pipeline:
speech-to-text, translation to a pivot language and back, and speech
synthesis of the final text.

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist, a
    default one will be created automatically. Credentials are taken from
    the ULCA_USER_ID, ULCA_API_KEY and BHASHINI_AUTH environment variables
    (a .env file is honored) unless set in the config file.")]
struct CommandLineOptions {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Bind address override
    #[arg(long)]
    host: Option<String>,

    /// Bind port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    /// ANSI color for a log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the level is
    // updated after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Honor a local .env file for the ULCA credentials
    dotenvy::dotenv().ok();

    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &cli.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        config
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Apply CLI overrides after load
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    // Credentials left empty in the file are taken from the environment
    config.credentials.overlay_env();

    // Missing credentials are fatal at startup, not per-request
    config
        .validate()
        .map_err(|e| AppError::Configuration(e.to_string()))?;

    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let pipeline = SpeechPipeline::from_config(&config);
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    server::serve(&addr, state).await
}
