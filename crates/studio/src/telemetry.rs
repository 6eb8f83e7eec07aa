//! Tracing subscriber setup.

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info,studio=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global tracing subscriber.
///
/// # Arguments
///
/// * `service_name` - Name recorded in the startup event
/// * `export_console` - Whether to print events to the console
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry(
    service_name: &str,
    export_console: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::registry().with(env_filter());

    if export_console {
        subscriber.with(tracing_subscriber::fmt::layer()).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    info!(service_name, "Telemetry initialized");
    Ok(())
}

/// Install a console-only subscriber.
///
/// Useful for tests and small tools.
pub fn init_console_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;
    Ok(())
}
