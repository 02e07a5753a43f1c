//! Tracing subscriber setup.

use std::io;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set. Noisy dependency
/// targets are capped regardless.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = build_filter(config);
    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_target(true)
                .with_writer(io::stdout)
                .with_span_events(span_events)
                .json();
            registry.with(layer).try_init()?;
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_target(true)
                .with_writer(io::stdout)
                .with_span_events(span_events);
            registry.with(layer).try_init()?;
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stdout)
                .with_span_events(FmtSpan::NONE);
            registry.with(layer).try_init()?;
        }
    }

    info!(
        service.version = env!("CARGO_PKG_VERSION"),
        log.level = %config.level,
        log.format = ?config.format,
        "calorie balance engine logging initialized"
    );
    Ok(())
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    let base = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    ["sqlx=warn", "sqlx::query=warn"]
        .iter()
        .filter_map(|directive| directive.parse().ok())
        .fold(base, EnvFilter::add_directive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_builds_from_config_level() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            ..Default::default()
        };
        let filter = build_filter(&config);
        assert!(filter.to_string().contains("sqlx=warn"));
    }

    #[test]
    fn second_init_reports_error() {
        let config = LoggingConfig::default();
        let first = init_tracing(&config);
        let second = init_tracing(&config);
        // another test may already have installed a subscriber
        assert!(first.is_err() || second.is_err());
    }
}
