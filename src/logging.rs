//! Logging setup for the command-line front end.
//!
//! Output goes to stderr as plain text, JSON lines or pretty colored text.
//! `RUST_LOG` takes precedence over the configured level.

use std::error::Error;
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    Text,
    /// One JSON object per line
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    /// Forces `debug` unless `RUST_LOG` is set.
    pub verbose: bool,
}

impl LoggingConfig {
    pub fn new(format: LogFormat, level: impl Into<String>, verbose: bool) -> Self {
        LoggingConfig {
            format,
            level: level.into(),
            verbose,
        }
    }

    fn filter(&self) -> EnvFilter {
        let level = if self.verbose { "debug" } else { self.level.as_str() };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }

    /// Install the global subscriber. Fails if one is already installed.
    pub fn init(&self) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
        let filter = self.filter();
        match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .flatten_event(true)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(false)
                .try_init(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig::new(LogFormat::Text, "info", false)
    }
}
