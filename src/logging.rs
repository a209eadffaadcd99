//! Logging configuration and initialization

use std::env;

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logging output format
#[derive(Debug, Clone)]
pub enum LogFormat {
    Human,
    Json,
}

/// Logging output destination
#[derive(Debug, Clone)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    pub format: LogFormat,
    pub output: LogOutput,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Human,
            output: LogOutput::Stderr,
        }
    }
}

/// Initialize structured logging with the given configuration.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy()
        .add_directive("noughts=trace".parse()?)
        .add_directive("hyper=info".parse()?)
        .add_directive("reqwest=info".parse()?);

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Human => {
            let fmt_layer = fmt::layer().with_target(true);

            match config.output {
                LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).init(),
                LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).init(),
            }
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_span_events(fmt::format::FmtSpan::CLOSE);

            match config.output {
                LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).init(),
                LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).init(),
            }
        }
    }

    Ok(())
}

/// Initialize logging with environment-based configuration.
pub fn init_from_env() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = env::var("NOUGHTS_LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .parse::<Level>()
        .unwrap_or(Level::INFO);

    let format = match env::var("NOUGHTS_LOG_FORMAT").as_ref().map(|s| s.as_str()) {
        Ok("json") => LogFormat::Json,
        _ => LogFormat::Human,
    };

    let output = match env::var("NOUGHTS_LOG_OUTPUT").as_ref().map(|s| s.as_str()) {
        Ok("stdout") => LogOutput::Stdout,
        _ => LogOutput::Stderr,
    };

    init_logging(LoggingConfig {
        level,
        format,
        output,
    })
}
