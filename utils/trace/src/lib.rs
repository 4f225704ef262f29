//! Tracing subscriber setup shared by the workspace binaries.

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = TracingInitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(TracingInitError::UnknownFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `level` when set. `LOG_FORMAT=json` switches to
/// structured output.
pub fn init(level: &str) -> Result<(), TracingInitError> {
    let format = match std::env::var("LOG_FORMAT") {
        Ok(value) => value.parse()?,
        Err(_) => LogFormat::default(),
    };

    init_with_format(level, format)
}

pub fn init_with_format(level: &str, format: LogFormat) -> Result<(), TracingInitError> {
    let filter = build_filter(level)?;

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().compact()),
        ),
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().json()),
        ),
    }
    .map_err(|source| TracingInitError::SetGlobalDefault { source })?;

    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter, TracingInitError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|source| TracingInitError::InvalidFilter { source })
}

#[derive(Debug, Error)]
pub enum TracingInitError {
    #[error("Invalid filter config")]
    InvalidFilter {
        #[from]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Unknown log format: {format}")]
    UnknownFormat {
        format: String,
    },

    #[error("Failed to set global default subscriber")]
    SetGlobalDefault {
        #[from]
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}
